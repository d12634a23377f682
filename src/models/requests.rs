use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{AvailabilityFilter, FilterCriteria, ViewerPreferences};

/// Query string of the directory endpoints
///
/// `GET /api/v1/experts?q=tax&region=Lagos&availability=available&page=2`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub expertise: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub availability: AvailabilityFilter,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: usize,
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub viewer_id: Option<String>,
    /// Comma-separated interest tags, overriding stored preferences
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(default)]
    pub home_region: Option<String>,
}

fn default_page() -> usize {
    1
}

impl Default for DirectoryQuery {
    fn default() -> Self {
        Self {
            q: None,
            expertise: None,
            region: None,
            availability: AvailabilityFilter::All,
            page: default_page(),
            page_size: None,
            viewer_id: None,
            interests: None,
            home_region: None,
        }
    }
}

impl DirectoryQuery {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            query: self.q.clone(),
            expertise: self.expertise.clone(),
            region: self.region.clone(),
            availability: self.availability,
        }
    }

    /// Preferences passed inline; fields left out fall back to `stored`
    pub fn preferences(&self, stored: Option<ViewerPreferences>) -> ViewerPreferences {
        let mut prefs = stored.unwrap_or_default();
        if let Some(interests) = &self.interests {
            prefs.interests = interests
                .split(',')
                .map(str::trim)
                .filter(|i| !i.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(region) = &self.home_region {
            prefs.home_region = Some(region.clone());
        }
        prefs
    }
}

/// Body of `POST /api/v1/connections`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequestBody {
    #[validate(length(min = 1))]
    #[serde(alias = "target_id")]
    pub target_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id")]
    pub viewer_id: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

/// Body of the approve / reject endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDecisionBody {
    #[validate(length(min = 1))]
    pub actor_id: String,
    #[validate(length(min = 1))]
    pub viewer_id: String,
    #[validate(length(min = 1))]
    pub target_id: String,
}
