use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::ConnectionError;
use crate::models::{
    ConnectionDecisionBody, ConnectionRequestBody, ConnectionResponse, ConnectionsOverview,
};
use crate::routes::{error_response, AppState};

/// Configure connection request routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/connections", web::post().to(request_connection))
        .route("/connections/approve", web::post().to(approve_connection))
        .route("/connections/reject", web::post().to(reject_connection))
        .route("/connections/{user_id}", web::get().to(get_connections));
}

fn connection_error_response(err: ConnectionError) -> HttpResponse {
    let status = match &err {
        ConnectionError::SelfRequest | ConnectionError::EmptyMessage => StatusCode::BAD_REQUEST,
        ConnectionError::AlreadyRequested { .. } | ConnectionError::NotPending { .. } => {
            StatusCode::CONFLICT
        }
        ConnectionError::NotFound { .. } => StatusCode::NOT_FOUND,
        ConnectionError::NotOwner { .. } => StatusCode::FORBIDDEN,
    };
    error_response(status, "Connection request failed", err.to_string())
}

/// Request a connection
///
/// POST /api/v1/connections
///
/// Request body:
/// ```json
/// { "targetId": "string", "viewerId": "string", "message": "string" }
/// ```
async fn request_connection(
    state: web::Data<AppState>,
    req: web::Json<ConnectionRequestBody>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    if state.directory.find_profile(&req.target_id).await.is_none() {
        return error_response(
            StatusCode::NOT_FOUND,
            "Unknown profile",
            format!("No mentor or expert with id {}", req.target_id),
        );
    }

    match state
        .hub
        .request_connection(&req.viewer_id, &req.target_id, &req.message)
        .await
    {
        Ok(request) => {
            tracing::info!("Connection requested: {} -> {}", req.viewer_id, req.target_id);
            HttpResponse::Created().json(ConnectionResponse {
                status: request.status,
                request,
            })
        }
        Err(e) => {
            tracing::info!("Connection request {} -> {} refused: {}", req.viewer_id, req.target_id, e);
            connection_error_response(e)
        }
    }
}

/// POST /api/v1/connections/approve
async fn approve_connection(
    state: web::Data<AppState>,
    req: web::Json<ConnectionDecisionBody>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state
        .hub
        .approve_connection(&req.actor_id, &req.viewer_id, &req.target_id)
        .await
    {
        Ok(request) => {
            tracing::info!("Connection approved: {} <-> {}", req.viewer_id, req.target_id);
            HttpResponse::Ok().json(ConnectionResponse {
                status: request.status,
                request,
            })
        }
        Err(e) => connection_error_response(e),
    }
}

/// POST /api/v1/connections/reject
async fn reject_connection(
    state: web::Data<AppState>,
    req: web::Json<ConnectionDecisionBody>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state
        .hub
        .reject_connection(&req.actor_id, &req.viewer_id, &req.target_id)
        .await
    {
        Ok(request) => {
            tracing::info!("Connection rejected: {} -> {}", req.viewer_id, req.target_id);
            HttpResponse::Ok().json(ConnectionResponse {
                status: request.status,
                request,
            })
        }
        Err(e) => connection_error_response(e),
    }
}

/// Connected users and pending inbound requests
///
/// GET /api/v1/connections/{userId}
async fn get_connections(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();
    let (connected, pending) = state.hub.connections_of(&user_id).await;

    HttpResponse::Ok().json(ConnectionsOverview {
        user_id,
        connected,
        pending,
    })
}
