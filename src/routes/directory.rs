use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{DirectoryQuery, DirectoryResponse, ProfileKind, ViewerPreferences};
use crate::routes::{error_response, AppState};

/// Configure directory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/mentors", web::get().to(list_mentors))
        .route("/experts", web::get().to(list_experts))
        .route("/viewers/{viewer_id}/preferences", web::get().to(get_preferences))
        .route("/viewers/{viewer_id}/preferences", web::put().to(put_preferences));
}

/// Mentor directory
///
/// GET /api/v1/mentors?q=tax&region=Ghana&availability=available&page=1&viewerId=abc
async fn list_mentors(
    state: web::Data<AppState>,
    query: web::Query<DirectoryQuery>,
) -> impl Responder {
    list_directory(state, ProfileKind::Mentor, query.into_inner()).await
}

/// Expert directory, six per page unless `pageSize` says otherwise
///
/// GET /api/v1/experts?q=esg&expertise=ESG&page=2
async fn list_experts(
    state: web::Data<AppState>,
    query: web::Query<DirectoryQuery>,
) -> impl Responder {
    list_directory(state, ProfileKind::Expert, query.into_inner()).await
}

async fn list_directory(
    state: web::Data<AppState>,
    kind: ProfileKind,
    query: DirectoryQuery,
) -> HttpResponse {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for {} directory query: {:?}", kind.as_str(), errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let stored = match &query.viewer_id {
        Some(viewer_id) => state.hub.preferences(viewer_id).await,
        None => None,
    };
    let preferences = query.preferences(stored);
    let criteria = query.criteria();

    let snapshot = state.directory.directory(kind).await;
    let page_size = query.page_size.map(|size| size.min(state.max_page_size));

    let result = state.matcher(kind).find_matches(
        &snapshot.profiles,
        &criteria,
        &preferences,
        query.page,
        page_size,
    );

    tracing::info!(
        "Returning {} of {} {} matches (page {}, from {} profiles)",
        result.page.items.len(),
        result.page.total_items,
        kind.as_str(),
        result.page.page,
        result.total_candidates
    );

    HttpResponse::Ok().json(DirectoryResponse {
        items: result.page.items,
        page: result.page.page,
        page_size: result.page.page_size,
        total_items: result.page.total_items,
        total_pages: result.page.total_pages,
        degraded: snapshot.degraded,
    })
}

/// GET /api/v1/viewers/{viewerId}/preferences
async fn get_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let viewer_id = path.into_inner();
    let preferences = state.hub.preferences(&viewer_id).await.unwrap_or_default();
    HttpResponse::Ok().json(preferences)
}

/// PUT /api/v1/viewers/{viewerId}/preferences
///
/// Request body:
/// ```json
/// { "interests": ["Tax", "ESG"], "homeRegion": "Nigeria" }
/// ```
async fn put_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ViewerPreferences>,
) -> impl Responder {
    let viewer_id = path.into_inner();
    let preferences = body.into_inner();

    tracing::debug!(
        "Storing preferences for {}: {} interests, home region {:?}",
        viewer_id,
        preferences.interests.len(),
        preferences.home_region
    );

    state.hub.set_preferences(&viewer_id, preferences.clone()).await;
    HttpResponse::Ok().json(preferences)
}
