use crate::models::domain::profile_kind;
use crate::models::{Profile, ProfileKind, RawProfile};
use crate::services::samples::sample_directory;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

/// Errors that can occur when fetching a directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Directory source returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("No directory source configured")]
    NotConfigured,
}

/// HTTP client for the directory source
///
/// `GET {base_url}/mentors` and `GET {base_url}/experts` return either a
/// bare array of profile records or `{"documents": [...]}`.
pub struct DirectoryClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl DirectoryClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Fetch every profile of one directory
    pub async fn fetch(&self, kind: ProfileKind) -> Result<Vec<Profile>, DirectoryError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(kind.collection())
        );

        tracing::debug!("Fetching {} directory from: {}", kind.as_str(), url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch {}: {}",
                kind.collection(),
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let profiles = parse_directory(json, kind)?;

        tracing::debug!("Fetched {} {} profiles", profiles.len(), kind.as_str());

        Ok(profiles)
    }
}

/// Normalize a directory payload into profiles.
///
/// Records that cannot be read or carry no id are skipped; a profile
/// without a declared kind takes the kind of the directory it came from.
pub fn parse_directory(json: Value, kind: ProfileKind) -> Result<Vec<Profile>, DirectoryError> {
    let documents = match json {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("documents") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(DirectoryError::InvalidResponse(
                    "Missing documents array".into(),
                ))
            }
        },
        _ => {
            return Err(DirectoryError::InvalidResponse(
                "Expected an array of profiles".into(),
            ))
        }
    };

    let total = documents.len();
    let profiles: Vec<Profile> = documents
        .into_iter()
        .filter_map(|mut doc| {
            let data = if doc.get("data").is_some() {
                doc["data"].take()
            } else {
                doc
            };
            let mut raw: RawProfile = serde_json::from_value(data).ok()?;
            if raw.kind.as_ref().and_then(profile_kind).is_none() {
                raw.kind = Some(Value::String(kind.as_str().to_string()));
            }
            Some(Profile::from(raw))
        })
        .filter(|p| !p.id.is_empty())
        .collect();

    if profiles.len() < total {
        tracing::warn!(
            "Skipped {} unreadable {} records",
            total - profiles.len(),
            kind.as_str()
        );
    }

    Ok(profiles)
}

/// A published directory
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    pub kind: ProfileKind,
    pub profiles: Arc<Vec<Profile>>,
    /// Request token of the fetch that produced this snapshot
    pub token: u64,
    /// The source failed or was empty and the sample set stands in
    pub degraded: bool,
    pub fetched_at: Instant,
}

/// Loads directories, falls back to the sample set, and refuses to
/// publish stale responses.
///
/// Every fetch takes a token from a monotonically increasing counter.
/// A finished fetch is published only if its token is still the latest
/// issued for that directory; otherwise it is discarded.
pub struct DirectoryLoader {
    client: Option<DirectoryClient>,
    fallback_enabled: bool,
    refresh_after: Duration,
    next_token: AtomicU64,
    issued: Mutex<HashMap<ProfileKind, u64>>,
    published: RwLock<HashMap<ProfileKind, DirectorySnapshot>>,
}

impl DirectoryLoader {
    pub fn new(client: Option<DirectoryClient>, fallback_enabled: bool, refresh_after: Duration) -> Self {
        Self {
            client,
            fallback_enabled,
            refresh_after,
            next_token: AtomicU64::new(0),
            issued: Mutex::new(HashMap::new()),
            published: RwLock::new(HashMap::new()),
        }
    }

    async fn issue_token(&self, kind: ProfileKind) -> u64 {
        let token = self.next_token.fetch_add(1, Ordering::SeqCst) + 1;
        self.issued.lock().await.insert(kind, token);
        token
    }

    /// True while no newer fetch of `kind` has been issued
    pub async fn is_latest(&self, kind: ProfileKind, token: u64) -> bool {
        self.issued.lock().await.get(&kind).copied() == Some(token)
    }

    /// The last published snapshot, if any
    pub async fn current(&self, kind: ProfileKind) -> Option<DirectorySnapshot> {
        self.published.read().await.get(&kind).cloned()
    }

    /// Published snapshot while it is fresh, otherwise a new fetch
    pub async fn directory(&self, kind: ProfileKind) -> DirectorySnapshot {
        if let Some(snapshot) = self.current(kind).await {
            if snapshot.fetched_at.elapsed() < self.refresh_after {
                return snapshot;
            }
        }
        self.load(kind).await
    }

    /// Fetch `kind` from the source, falling back to the sample set.
    pub async fn load(&self, kind: ProfileKind) -> DirectorySnapshot {
        let token = self.issue_token(kind).await;

        let fetched = match &self.client {
            Some(client) => client.fetch(kind).await,
            None => Err(DirectoryError::NotConfigured),
        };

        let (profiles, degraded) = match fetched {
            Ok(profiles) if !profiles.is_empty() => (profiles, false),
            Ok(_) => {
                tracing::warn!("Directory source returned no {} profiles", kind.as_str());
                self.fallback(kind)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {} directory: {}", kind.as_str(), e);
                self.fallback(kind)
            }
        };

        let snapshot = DirectorySnapshot {
            kind,
            profiles: Arc::new(profiles),
            token,
            degraded,
            fetched_at: Instant::now(),
        };

        self.publish(snapshot).await
    }

    fn fallback(&self, kind: ProfileKind) -> (Vec<Profile>, bool) {
        if self.fallback_enabled {
            (sample_directory(kind), true)
        } else {
            (Vec::new(), true)
        }
    }

    /// Publish `snapshot` if its token is still the latest.
    ///
    /// A stale snapshot is discarded; the caller gets whatever is
    /// published if that is newer, otherwise its own data unpublished.
    pub async fn publish(&self, snapshot: DirectorySnapshot) -> DirectorySnapshot {
        let kind = snapshot.kind;
        let issued = self.issued.lock().await;
        let mut published = self.published.write().await;

        if issued.get(&kind).copied() == Some(snapshot.token) {
            published.insert(kind, snapshot.clone());
            return snapshot;
        }

        tracing::debug!(
            "Discarding stale {} directory response (token {})",
            kind.as_str(),
            snapshot.token
        );

        match published.get(&kind) {
            Some(current) if current.token > snapshot.token => current.clone(),
            _ => snapshot,
        }
    }

    /// Look a profile up in the published mentor and expert directories
    pub async fn find_profile(&self, id: &str) -> Option<Profile> {
        for kind in [ProfileKind::Mentor, ProfileKind::Expert] {
            let snapshot = self.directory(kind).await;
            if let Some(profile) = snapshot.profiles.iter().find(|p| p.id == id) {
                return Some(profile.clone());
            }
        }
        None
    }
}
