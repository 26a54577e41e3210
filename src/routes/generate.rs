use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::GenerateQuery;
use crate::routes::{ApiError, AppState};

/// Configure generation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/generate-developers", web::post().to(generate_developers))
        .route("/generate-tickets", web::post().to(generate_tickets));
}

fn validate_count(query: &GenerateQuery) -> Result<(), ApiError> {
    query.validate().map_err(|errors| {
        tracing::info!("Validation failed for generate request: count={}", query.count);
        ApiError::InvalidQuery(errors.to_string())
    })
}

/// POST /api/generate-developers?count=10
async fn generate_developers(
    state: web::Data<AppState>,
    query: web::Query<GenerateQuery>,
) -> Result<HttpResponse, ApiError> {
    validate_count(&query)?;

    let developers = state.gateway.generate_developers(query.count).await;
    tracing::info!("Returning {} developer profiles", developers.len());
    Ok(HttpResponse::Ok().json(developers))
}

/// POST /api/generate-tickets?count=10
async fn generate_tickets(
    state: web::Data<AppState>,
    query: web::Query<GenerateQuery>,
) -> Result<HttpResponse, ApiError> {
    validate_count(&query)?;

    let tickets = state.gateway.generate_tickets(query.count).await;
    tracing::info!("Returning {} tickets", tickets.len());
    Ok(HttpResponse::Ok().json(tickets))
}
