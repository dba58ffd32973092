//! Domain entities and invariants for account role and privilege resolution.

#![forbid(unsafe_code)]

mod account;
pub mod name_match;
mod privilege;
mod registry;
mod role;

pub use account::{Account, SuperuserOverride};
pub use privilege::Privilege;
pub use registry::{RoleDefinitionInput, RoleRegistry};
pub use role::Role;

/// Reserved role name that designates unrestricted access.
pub const SUPERUSER_ROLE_NAME: &str = "System Developer";
