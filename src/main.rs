use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use africa_hub::config::Settings;
use africa_hub::routes::{self, AppState};
use africa_hub::services::{DirectoryClient, DirectoryLoader, HubState, KvStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap_or_default())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn config_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        config_error(e)
    })?;

    // Initialize logging; LOG_LEVEL / LOG_FORMAT override the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting One Africa Hub matching service...");

    // Initialize key-value store (Redis optional - memory-only without it)
    let store = match &settings.store.redis_url {
        Some(url) => match KvStore::with_redis(url, settings.store.l1_capacity).await {
            Ok(store) => {
                info!("Key-value store backed by Redis");
                store
            }
            Err(e) => {
                error!("Failed to connect to Redis ({}), keeping state in memory only", e);
                KvStore::in_memory(settings.store.l1_capacity)
            }
        },
        None => {
            warn!("No Redis URL configured, state will not survive a restart");
            KvStore::in_memory(settings.store.l1_capacity)
        }
    };

    let hub = Arc::new(HubState::load(store).await.map_err(|e| {
        error!("Failed to load hub state: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?);

    // Initialize directory source
    let client = match &settings.directory.endpoint {
        Some(endpoint) => Some(
            DirectoryClient::new(
                endpoint.clone(),
                settings.directory.api_key.clone(),
                Duration::from_secs(settings.directory.timeout_secs),
            )
            .map_err(config_error)?,
        ),
        None => {
            warn!("No directory endpoint configured, serving the built-in sample directory");
            None
        }
    };

    let directory = Arc::new(DirectoryLoader::new(
        client,
        settings.directory.fallback_to_samples,
        Duration::from_secs(settings.directory.refresh_secs),
    ));

    info!("Directory loader initialized");

    // Build application state
    let app_state = AppState::new(directory, hub.clone(), &settings);

    info!(
        "Matchers initialized (score source: {:?}, mentors: {:?}, experts: {:?}, page size: {})",
        settings.matching.score_source,
        app_state.mentor_matcher.interest_mode(),
        app_state.expert_matcher.interest_mode(),
        app_state.expert_matcher.page_size()
    );

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await?;

    info!("HTTP server stopped, saving hub state");
    if let Err(e) = hub.save().await {
        error!("Failed to save hub state on shutdown: {}", e);
    }

    Ok(())
}
