use std::hash::{Hash, Hasher};

use clinaccess_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::name_match::names_match_exact;

/// Atomic named permission granted through roles.
///
/// Two privileges are equal when their names are equal; the description is
/// informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Privilege {
    name: NonEmptyString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Privilege {
    /// Creates a privilege with a validated name.
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            description: None,
        })
    }

    /// Attaches a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the privilege name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the description, if one was provided.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether this privilege is the one named `name`.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        names_match_exact(self.name(), name)
    }
}

impl PartialEq for Privilege {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Privilege {}

impl Hash for Privilege {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
