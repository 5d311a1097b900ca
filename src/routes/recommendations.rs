use crate::core::RecommendationEngine;
use crate::models::{
    ErrorResponse, GenerateRecommendationsRequest, HealthResponse, RecommendationsResponse,
};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub max_results: usize,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommendations/find", web::post().to(find_recommendations));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate recommendations endpoint
///
/// POST /api/v1/recommendations/find
///
/// Request body:
/// ```json
/// {
///   "targetAreas": ["Shinjuku"],
///   "country": "Japan",
///   "checkIn": "2026-09-01",
///   "checkOut": "2026-09-04",
///   "budgetMin": 20000,
///   "budgetMax": 30000,
///   "requiredAmenities": ["wifi"],
///   "limit": 20
/// }
/// ```
async fn find_recommendations(
    state: web::Data<AppState>,
    req: web::Json<GenerateRecommendationsRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_recommendations: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = (req.limit as usize).min(state.max_results).max(1);
    let preferences = req.into_inner().into_preferences();

    tracing::info!(
        "Generating recommendations for areas {:?}, limit {}",
        preferences.target_areas,
        limit
    );

    match state.engine.generate(&preferences, limit).await {
        Ok(result) => {
            tracing::info!(
                "Returning {} recommendations ({} candidates, {} after filtering)",
                result.recommendations.len(),
                result.total_candidates,
                result.filtered_count
            );

            HttpResponse::Ok().json(RecommendationsResponse {
                recommendations: result.recommendations,
                total_candidates: result.total_candidates,
                filtered_count: result.filtered_count,
                generated_at: result.generated_at,
            })
        }
        Err(e) => {
            tracing::info!("Rejected preferences: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid preferences".to_string(),
                message: e.to_string(),
                status_code: 400,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
