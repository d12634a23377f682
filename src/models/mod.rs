// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Availability, AvailabilityFilter, ConnectionRequest, ConnectionStatus, FilterCriteria,
    InterestFilterMode, Profile, ProfileKind, RankedCandidate, RawProfile, ScoreSource,
    ScoringWeights, ViewerPreferences,
};
pub use requests::{ConnectionDecisionBody, ConnectionRequestBody, DirectoryQuery};
pub use responses::{
    ConnectionResponse, ConnectionsOverview, DirectoryResponse, ErrorResponse, HealthResponse,
};
