// Core algorithm exports
pub mod bias;
pub mod connections;
pub mod filters;
pub mod matcher;
pub mod pagination;
pub mod scoring;

pub use bias::{apply_preferences, shared_interests};
pub use connections::{ConnectionBook, ConnectionError};
pub use filters::{filter_directory, matches_criteria};
pub use matcher::{Matcher, MatchResult, DEFAULT_PAGE_SIZE};
pub use pagination::{paginate, total_pages, Page};
pub use scoring::{calculate_match_score, rank_candidates};
