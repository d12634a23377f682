use std::collections::{BTreeMap, BTreeSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::models::{ConnectionRequest, ConnectionStatus};

/// Errors from connection request transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("Cannot request a connection with yourself")]
    SelfRequest,

    #[error("A connection request message is required")]
    EmptyMessage,

    #[error("Request from {viewer_id} to {target_id} already exists ({status:?})")]
    AlreadyRequested {
        viewer_id: String,
        target_id: String,
        status: ConnectionStatus,
    },

    #[error("No request from {viewer_id} to {target_id}")]
    NotFound { viewer_id: String, target_id: String },

    #[error("Request from {viewer_id} to {target_id} is {status:?}, not pending")]
    NotPending {
        viewer_id: String,
        target_id: String,
        status: ConnectionStatus,
    },

    #[error("Only the owner of {target_id} can answer this request")]
    NotOwner { target_id: String },
}

/// Connection requests and established connections for every pair.
///
/// Per (viewer, target): `none -> pending -> {approved, rejected}`.
/// Approved and rejected are terminal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionBook {
    /// viewer id -> target id -> request
    requests: BTreeMap<String, BTreeMap<String, ConnectionRequest>>,
    connected: BTreeMap<String, BTreeSet<String>>,
}

impl ConnectionBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, viewer_id: &str, target_id: &str) -> ConnectionStatus {
        self.get(viewer_id, target_id)
            .map(|r| r.status)
            .unwrap_or(ConnectionStatus::None)
    }

    pub fn get(&self, viewer_id: &str, target_id: &str) -> Option<&ConnectionRequest> {
        self.requests.get(viewer_id)?.get(target_id)
    }

    /// `none -> pending`
    pub fn request(
        &mut self,
        viewer_id: &str,
        target_id: &str,
        message: &str,
    ) -> Result<&ConnectionRequest, ConnectionError> {
        if viewer_id == target_id {
            return Err(ConnectionError::SelfRequest);
        }
        if message.trim().is_empty() {
            return Err(ConnectionError::EmptyMessage);
        }

        if let Some(existing) = self.get(viewer_id, target_id) {
            return Err(ConnectionError::AlreadyRequested {
                viewer_id: viewer_id.to_string(),
                target_id: target_id.to_string(),
                status: existing.status,
            });
        }

        let request = ConnectionRequest {
            id: uuid::Uuid::new_v4(),
            viewer_id: viewer_id.to_string(),
            target_id: target_id.to_string(),
            message: message.trim().to_string(),
            status: ConnectionStatus::Pending,
            requested_at: chrono::Utc::now(),
            resolved_at: None,
        };

        tracing::debug!("Connection requested: {} -> {}", viewer_id, target_id);

        Ok(self
            .requests
            .entry(viewer_id.to_string())
            .or_default()
            .entry(target_id.to_string())
            .or_insert(request))
    }

    /// `pending -> approved`; both parties record the connection
    pub fn approve(
        &mut self,
        actor_id: &str,
        viewer_id: &str,
        target_id: &str,
    ) -> Result<&ConnectionRequest, ConnectionError> {
        self.resolve(actor_id, viewer_id, target_id, ConnectionStatus::Approved)?;

        self.connected
            .entry(viewer_id.to_string())
            .or_default()
            .insert(target_id.to_string());
        self.connected
            .entry(target_id.to_string())
            .or_default()
            .insert(viewer_id.to_string());

        tracing::debug!("Connection approved: {} <-> {}", viewer_id, target_id);

        self.get(viewer_id, target_id).ok_or_else(|| ConnectionError::NotFound {
            viewer_id: viewer_id.to_string(),
            target_id: target_id.to_string(),
        })
    }

    /// `pending -> rejected`
    pub fn reject(
        &mut self,
        actor_id: &str,
        viewer_id: &str,
        target_id: &str,
    ) -> Result<&ConnectionRequest, ConnectionError> {
        self.resolve(actor_id, viewer_id, target_id, ConnectionStatus::Rejected)?;

        tracing::debug!("Connection rejected: {} -> {}", viewer_id, target_id);

        self.get(viewer_id, target_id).ok_or_else(|| ConnectionError::NotFound {
            viewer_id: viewer_id.to_string(),
            target_id: target_id.to_string(),
        })
    }

    fn resolve(
        &mut self,
        actor_id: &str,
        viewer_id: &str,
        target_id: &str,
        outcome: ConnectionStatus,
    ) -> Result<(), ConnectionError> {
        let request = self
            .requests
            .get_mut(viewer_id)
            .and_then(|sent| sent.get_mut(target_id))
            .ok_or_else(|| ConnectionError::NotFound {
                viewer_id: viewer_id.to_string(),
                target_id: target_id.to_string(),
            })?;

        if actor_id != request.target_id {
            return Err(ConnectionError::NotOwner {
                target_id: target_id.to_string(),
            });
        }

        if request.status != ConnectionStatus::Pending {
            return Err(ConnectionError::NotPending {
                viewer_id: viewer_id.to_string(),
                target_id: target_id.to_string(),
                status: request.status,
            });
        }

        request.status = outcome;
        request.resolved_at = Some(chrono::Utc::now());
        Ok(())
    }

    /// Everyone `user_id` is connected with, sorted
    pub fn connected(&self, user_id: &str) -> Vec<String> {
        self.connected
            .get(user_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Pending requests addressed to `target_id`, oldest first
    pub fn pending_for(&self, target_id: &str) -> Vec<ConnectionRequest> {
        let mut pending: Vec<ConnectionRequest> = self
            .requests
            .values()
            .filter_map(|sent| sent.get(target_id))
            .filter(|r| r.target_id == target_id && r.status == ConnectionStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.requested_at.cmp(&b.requested_at));
        pending
    }
}
