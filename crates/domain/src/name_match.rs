//! Name comparison policies for roles and privileges.
//!
//! Access decisions compare names exactly. Membership inspection used by
//! management screens compares names ignoring case. The two policies stay
//! separate functions so a caller always states which one it relies on.

/// Returns whether two names are identical, including case.
#[must_use]
pub fn names_match_exact(left: &str, right: &str) -> bool {
    left == right
}

/// Returns whether two names are equal after Unicode lowercase folding.
#[must_use]
pub fn names_match_ignoring_case(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::{names_match_exact, names_match_ignoring_case};

    #[test]
    fn exact_match_is_case_sensitive() {
        assert!(names_match_exact("Maternity Nurse", "Maternity Nurse"));
        assert!(!names_match_exact("Maternity Nurse", "maternity nurse"));
    }

    #[test]
    fn case_insensitive_match_folds_unicode() {
        assert!(names_match_ignoring_case("Maternity Nurse", "maternity nurse"));
        assert!(names_match_ignoring_case("ÄRZTIN", "ärztin"));
        assert!(!names_match_ignoring_case("Nurse", "Nurses"));
    }
}
