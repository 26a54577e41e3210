use actix_web::{web, HttpResponse, Responder};
use crate::core::MatchingGateway;
use crate::models::{MatchRequest, StatusResponse};
use crate::routes::ApiError;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<MatchingGateway>,
}

/// Configure match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/match", web::post().to(match_developers_to_tickets));
}

/// Root status endpoint
///
/// GET /
pub async fn root(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(StatusResponse {
        message: "AI Pops API is running".to_string(),
        openai_configured: state.gateway.is_configured(),
    })
}

/// Match developers to tickets
///
/// POST /api/match
///
/// Request body:
/// ```json
/// {
///   "developers": [{"name": "...", "skills": [], "experience_years": 5, "profile_summary": "..."}],
///   "tickets": [{"id": "...", "title": "...", "description": "..."}]
/// }
/// ```
async fn match_developers_to_tickets(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> Result<HttpResponse, ApiError> {
    tracing::info!(
        "Matching {} developers to {} tickets",
        req.developers.len(),
        req.tickets.len()
    );

    let assignments = state.gateway.match_tickets(&req).await.map_err(|e| {
        tracing::error!("Match request rejected: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(assignments))
}
