use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which directory a profile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Mentor,
    Expert,
}

impl ProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Mentor => "mentor",
            ProfileKind::Expert => "expert",
        }
    }

    /// Path segment used by the directory source (`mentors` / `experts`)
    pub fn collection(&self) -> &'static str {
        match self {
            ProfileKind::Mentor => "mentors",
            ProfileKind::Expert => "experts",
        }
    }
}

/// Availability state of a mentor or expert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Limited,
    Busy,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// Mentor or expert record consumed by the directory views.
///
/// Deserialization goes through [`RawProfile`], which accepts the loose
/// upstream shapes and applies every default in one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProfile", rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub kind: ProfileKind,
    pub titles: Vec<String>,
    pub location: String,
    pub expertise: Vec<String>,
    pub languages: Vec<String>,
    pub rating: Option<f64>,
    pub review_count: u32,
    pub availability: Availability,
    pub bio: String,
}

impl Profile {
    /// Minimal profile with every optional field defaulted
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ProfileKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            titles: Vec::new(),
            location: String::new(),
            expertise: Vec::new(),
            languages: Vec::new(),
            rating: None,
            review_count: 0,
            availability: Availability::default(),
            bio: String::new(),
        }
    }

    /// The user who owns this profile and may answer connection requests
    pub fn owner_id(&self) -> &str {
        &self.id
    }
}

/// Wire shape of an upstream profile record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    #[serde(default, alias = "$id", alias = "userId")]
    pub id: Value,
    #[serde(default, alias = "fullName")]
    pub name: Option<Value>,
    #[serde(default, alias = "role")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default, alias = "roles")]
    pub titles: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default, alias = "specializations")]
    pub expertise: Option<Value>,
    #[serde(default)]
    pub languages: Option<Value>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default, alias = "reviews")]
    pub review_count: Option<Value>,
    #[serde(default)]
    pub availability: Option<Value>,
    #[serde(default)]
    pub bio: Option<Value>,
}

/// Availability arrives either as a flag or as a named state
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAvailability {
    Flag(bool),
    State(String),
}

impl From<RawAvailability> for Availability {
    fn from(value: RawAvailability) -> Self {
        match value {
            RawAvailability::Flag(true) => Availability::Available,
            RawAvailability::Flag(false) => Availability::Busy,
            RawAvailability::State(state) => match state.trim().to_lowercase().as_str() {
                "available" | "open" => Availability::Available,
                "limited" => Availability::Limited,
                _ => Availability::Busy,
            },
        }
    }
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        let mut titles = string_list(raw.titles);
        if let Some(title) = text(raw.title).filter(|t| !t.trim().is_empty()) {
            if !titles.contains(&title) {
                titles.insert(0, title);
            }
        }

        let rating = number(raw.rating)
            .filter(|r| r.is_finite())
            .map(|r| r.clamp(0.0, 5.0));

        let review_count = number(raw.review_count)
            .filter(|n| n.is_finite())
            .map(|n| n.clamp(0.0, u32::MAX as f64) as u32)
            .unwrap_or(0);

        let availability = raw
            .availability
            .and_then(|value| serde_json::from_value::<RawAvailability>(value).ok())
            .map(Availability::from)
            .unwrap_or_default();

        Profile {
            id: id_string(&raw.id),
            name: text(raw.name).unwrap_or_default(),
            kind: raw.kind.as_ref().and_then(profile_kind).unwrap_or(ProfileKind::Expert),
            titles,
            location: text(raw.location).unwrap_or_default(),
            expertise: string_list(raw.expertise),
            languages: string_list(raw.languages),
            rating,
            review_count,
            availability,
            bio: text(raw.bio).unwrap_or_default(),
        }
    }
}

/// Kind of a record from its declared role; unknown roles count as absent
pub(crate) fn profile_kind(value: &Value) -> Option<ProfileKind> {
    match value.as_str()?.trim().to_lowercase().as_str() {
        "mentor" | "mentors" => Some(ProfileKind::Mentor),
        "expert" | "experts" => Some(ProfileKind::Expert),
        _ => None,
    }
}

/// Strings as-is, numbers in their decimal form, anything else absent
fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers, or strings holding a number
fn number(value: Option<Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Arrays keep their string entries, comma-separated strings are split,
/// anything else is treated as empty.
fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Viewer's declared interests and home region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerPreferences {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub home_region: Option<String>,
}

impl ViewerPreferences {
    pub fn home_region(&self) -> Option<&str> {
        non_empty(&self.home_region)
    }

    pub fn interests(&self) -> impl Iterator<Item = &str> {
        self.interests
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
    }
}

/// Availability toggle of the directory filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AvailabilityFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "available")]
    AvailableOnly,
}

/// Conjunctive constraints narrowing a directory to candidates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub expertise: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub availability: AvailabilityFilter,
}

impl FilterCriteria {
    pub fn query(&self) -> Option<&str> {
        non_empty(&self.query)
    }

    pub fn expertise(&self) -> Option<&str> {
        non_empty(&self.expertise)
    }

    pub fn region(&self) -> Option<&str> {
        non_empty(&self.region)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// How viewer interests act on the candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterestFilterMode {
    /// Drop candidates sharing no interest with the viewer
    Restrict,
    /// Move interest-sharing candidates ahead, drop nothing
    BiasOnly,
}

/// Where match scores come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreSource {
    /// Weighted interest overlap plus rating
    #[default]
    Relevance,
    /// Declared rating, or a random 80..=100 when there is none
    Declared,
}

/// Scoring weights for the relevance score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub tag_overlap: f64,
    pub rating: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            tag_overlap: 0.6,
            rating: 0.4,
        }
    }
}

/// Profile plus its derived match score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub profile: Profile,
    pub match_score: u8,
    pub shared_interests: Vec<String>,
}

/// State of a connection request between a viewer and a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    None,
    Pending,
    Approved,
    Rejected,
}

/// A viewer's request to connect with a mentor or expert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    pub id: uuid::Uuid,
    pub viewer_id: String,
    pub target_id: String,
    pub message: String,
    pub status: ConnectionStatus,
    pub requested_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}
