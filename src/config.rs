use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::{InterestFilterMode, ScoreSource, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub directory: DirectorySettings,
    pub store: StoreSettings,
    pub matching: MatchingSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectorySettings {
    /// Base URL serving `/mentors` and `/experts`; unset means samples only
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// How long a fetched directory is served before refetching
    pub refresh_secs: u64,
    pub fallback_to_samples: bool,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: 10,
            refresh_secs: 60,
            fallback_to_samples: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Unset keeps all state in process memory
    pub redis_url: Option<String>,
    pub l1_capacity: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            redis_url: None,
            l1_capacity: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    pub page_size: usize,
    pub max_page_size: usize,
    pub score_source: ScoreSource,
    pub mentor_interest_mode: InterestFilterMode,
    pub expert_interest_mode: InterestFilterMode,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            page_size: 6,
            max_page_size: 100,
            score_source: ScoreSource::Relevance,
            mentor_interest_mode: InterestFilterMode::Restrict,
            expert_interest_mode: InterestFilterMode::BiasOnly,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_tag_overlap_weight")]
    pub tag_overlap: f64,
    #[serde(default = "default_rating_weight")]
    pub rating: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            tag_overlap: default_tag_overlap_weight(),
            rating: default_rating_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(value: &WeightsConfig) -> Self {
        Self {
            tag_overlap: value.tag_overlap,
            rating: value.rating,
        }
    }
}

fn default_tag_overlap_weight() -> f64 { 0.6 }
fn default_rating_weight() -> f64 { 0.4 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn environment() -> Environment {
    // e.g., HUB__SERVER__PORT -> server.port
    Environment::with_prefix("HUB")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HUB__)
    /// 5. `DIRECTORY_URL` and `REDIS_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional unprefixed variables used by deployment tooling
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let directory_url = env::var("DIRECTORY_URL").ok();
    let redis_url = env::var("REDIS_URL").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = directory_url {
        builder = builder.set_override("directory.endpoint", url)?;
    }
    if let Some(url) = redis_url {
        builder = builder.set_override("store.redis_url", url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.tag_overlap, 0.6);
        assert_eq!(weights.rating, 0.4);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_defaults_match_directory_flows() {
        let settings = Settings::default();
        assert_eq!(settings.matching.page_size, 6);
        assert_eq!(settings.matching.mentor_interest_mode, InterestFilterMode::Restrict);
        assert_eq!(settings.matching.expert_interest_mode, InterestFilterMode::BiasOnly);
        assert!(settings.directory.fallback_to_samples);
        assert_eq!(settings.matching.max_page_size, 100);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("hub-settings-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"
[server]
port = 9090

[matching]
page_size = 9
score_source = "declared"
expert_interest_mode = "restrict"

[scoring.weights]
rating = 0.7
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.matching.page_size, 9);
        assert_eq!(settings.matching.score_source, ScoreSource::Declared);
        assert_eq!(settings.matching.expert_interest_mode, InterestFilterMode::Restrict);
        assert_eq!(settings.scoring.weights.rating, 0.7);
        assert_eq!(settings.scoring.weights.tag_overlap, 0.6);
    }
}
