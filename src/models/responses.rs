use serde::{Deserialize, Serialize};
use crate::models::domain::{ConnectionRequest, ConnectionStatus, RankedCandidate};
use crate::services::StoreStats;

/// Response for the directory endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResponse {
    pub items: Vec<RankedCandidate>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// The directory source failed and the built-in sample set was used
    pub degraded: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub store: StoreStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for connection request mutations
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionResponse {
    pub request: ConnectionRequest,
    pub status: ConnectionStatus,
}

/// A user's connected set and the requests waiting on them
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsOverview {
    pub user_id: String,
    pub connected: Vec<String>,
    pub pending: Vec<ConnectionRequest>,
}
