// Route exports
pub mod connections;
pub mod directory;
pub mod health;

use actix_web::{http::StatusCode, web, HttpResponse};
use crate::config::Settings;
use crate::core::Matcher;
use crate::models::{ErrorResponse, ProfileKind};
use crate::services::{DirectoryLoader, HubState};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryLoader>,
    pub hub: Arc<HubState>,
    pub mentor_matcher: Matcher,
    pub expert_matcher: Matcher,
    pub max_page_size: usize,
}

impl AppState {
    /// Build per-directory matchers from the matching and scoring settings
    pub fn new(directory: Arc<DirectoryLoader>, hub: Arc<HubState>, settings: &Settings) -> Self {
        let base = Matcher::new((&settings.scoring.weights).into())
            .with_score_source(settings.matching.score_source)
            .with_page_size(settings.matching.page_size);

        Self {
            directory,
            hub,
            mentor_matcher: base
                .clone()
                .with_interest_mode(settings.matching.mentor_interest_mode),
            expert_matcher: base.with_interest_mode(settings.matching.expert_interest_mode),
            max_page_size: settings.matching.max_page_size,
        }
    }

    pub fn matcher(&self, kind: ProfileKind) -> &Matcher {
        match kind {
            ProfileKind::Mentor => &self.mentor_matcher,
            ProfileKind::Expert => &self.expert_matcher,
        }
    }
}

/// JSON error body with the matching status code
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(directory::configure)
            .configure(connections::configure),
    );
}
