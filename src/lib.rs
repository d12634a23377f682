//! One Africa Hub - directory matching and connection service
//!
//! This library provides the matching pipeline behind the mentor and
//! expert directories (filter, preference bias, rank, paginate) and the
//! connection-request workflow between viewers and profiles.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{ConnectionBook, ConnectionError, Matcher, MatchResult, Page};
pub use models::{FilterCriteria, Profile, ProfileKind, RankedCandidate, ViewerPreferences};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        let result = matcher.find_matches(
            &[],
            &FilterCriteria::default(),
            &ViewerPreferences::default(),
            1,
            None,
        );
        assert!(result.page.items.is_empty());
        assert_eq!(result.page.page_size, core::DEFAULT_PAGE_SIZE);
    }
}
