use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    EnrichRequest, ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse,
    RefreshResponse, UniversityData,
};
use crate::services::{UniversityCache, UniversityLoader};
use crate::core::MatchSelector;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub universities: Arc<UniversityCache<UniversityLoader>>,
    pub selector: MatchSelector,
    pub default_top_n: usize,
    pub max_top_n: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/enrich", web::post().to(enrich_university))
        .route("/universities/refresh", web::post().to(refresh_universities));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let stats = state.universities.stats().await;

    let status = if stats.loaded { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        universities_loaded: stats.universities as u64,
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "profile": {
///     "marks": 85,
///     "qualification": "Undergraduate",
///     "field": "Computer Science",
///     "budgetMin": 20000,
///     "budgetMax": 40000,
///     "preferredCountries": ["Canada"]
///   },
///   "topN": 50
/// }
/// ```
///
/// An unavailable dataset yields an empty match list, not an error.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if let Some(requested) = req.top_n.map(usize::from) {
        if requested > state.max_top_n {
            tracing::info!("Rejected topN {} above limit {}", requested, state.max_top_n);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Validation failed".to_string(),
                message: format!("topN must be at most {}", state.max_top_n),
                status_code: 400,
            });
        }
    }

    let top_n = req
        .top_n
        .map(usize::from)
        .unwrap_or(state.default_top_n)
        .min(state.max_top_n);

    tracing::info!(
        "Finding matches for field: {:?}, top_n: {}, preferred: {:?}",
        req.profile.field,
        top_n,
        req.profile.preferred_countries
    );

    let universities = state.universities.get().await;
    if universities.is_empty() {
        tracing::warn!("No university data available, returning empty match list");
    }

    let result = state
        .selector
        .select_matches(&universities, &req.profile, top_n);

    let response = FindMatchesResponse {
        total_results: result.matches.len(),
        matches: result.matches,
        total_candidates: result.total_candidates,
    };

    tracing::info!(
        "Returning {} matches (from {} candidates)",
        response.total_results,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Score a single university
///
/// POST /api/v1/matches/enrich
async fn enrich_university(
    state: web::Data<AppState>,
    req: web::Json<EnrichRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let EnrichRequest { university, profile } = req.into_inner();
    let university = UniversityData::from(university);

    let result = state.selector.enricher().enrich(&university, &profile);

    tracing::debug!(
        "Enriched {} ({}) with score {}",
        result.university_name,
        result.country,
        result.match_score
    );

    HttpResponse::Ok().json(result)
}

/// Reload the university dataset
///
/// POST /api/v1/universities/refresh
async fn refresh_universities(state: web::Data<AppState>) -> impl Responder {
    match state.universities.refresh().await {
        Ok(dataset) => {
            tracing::info!("University dataset refreshed ({} entries)", dataset.len());
            HttpResponse::Ok().json(RefreshResponse {
                success: true,
                universities: dataset.len(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to refresh university dataset: {}", e);
            HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: "Failed to refresh universities".to_string(),
                message: e.to_string(),
                status_code: 503,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use std::time::Duration;

    fn csv_state(csv: &str) -> (AppState, std::path::PathBuf) {
        csv_state_with_limit(csv, 500)
    }

    fn csv_state_with_limit(csv: &str, max_top_n: usize) -> (AppState, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "unicounsel-routes-{}.csv",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, csv).unwrap();

        let loader = UniversityLoader::new(
            None,
            Some(path.to_string_lossy().to_string()),
            Duration::from_secs(5),
        )
        .unwrap();

        let state = AppState {
            universities: Arc::new(UniversityCache::new(loader, 0)),
            selector: MatchSelector::default(),
            default_top_n: 50,
            max_top_n,
        };
        (state, path)
    }

    const CSV: &str = "name,url,latitude,longitude,address\n\
        McGill University,https://mcgill.ca,45.5,-73.57,\"845 Sherbrooke St W, Montreal, Canada\"\n\
        University of Toronto,https://utoronto.ca,43.66,-79.39,\"27 King's College Cir, Toronto, Canada\"\n\
        MIT,https://mit.edu,42.36,-71.09,\"77 Massachusetts Ave, Cambridge, USA\"\n";

    #[actix_web::test]
    async fn test_find_matches_endpoint() {
        let (state, path) = csv_state(CSV);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({
                "profile": {
                    "marks": 88,
                    "qualification": "Undergraduate",
                    "field": "Computer Science",
                    "budgetMin": 30000,
                    "budgetMax": 50000,
                    "preferredCountries": ["Canada"]
                },
                "topN": 2
            }))
            .to_request();

        let body: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;
        std::fs::remove_file(&path).ok();

        assert_eq!(body.total_results, 2);
        assert!(body.matches.iter().all(|m| m.country == "Canada"));
    }

    #[actix_web::test]
    async fn test_find_matches_rejects_zero_top_n() {
        let (state, path) = csv_state(CSV);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({ "profile": {}, "topN": 0 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        std::fs::remove_file(&path).ok();

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_enrich_endpoint() {
        let (state, path) = csv_state(CSV);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/enrich")
            .set_json(serde_json::json!({
                "university": { "name": "MIT", "country": "USA" },
                "profile": { "marks": 95, "qualification": "Postgraduate", "field": "Computer Science" }
            }))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        std::fs::remove_file(&path).ok();

        assert_eq!(body["universityName"], "MIT");
        assert_eq!(body["scoreBreakdown"]["academic"], 35);
        assert_eq!(body["degree"], "PhD Computer Science");
    }

    #[actix_web::test]
    async fn test_refresh_with_missing_dataset() {
        let (state, path) = csv_state("");
        std::fs::remove_file(&path).ok();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/universities/refresh").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_find_matches_top_n_limit_from_settings() {
        let (state, path) = csv_state(CSV);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({ "profile": {}, "topN": 600 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        std::fs::remove_file(&path).ok();

        let (state, path) = csv_state_with_limit(CSV, 1000);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({ "profile": {}, "topN": 800 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        std::fs::remove_file(&path).ok();

        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    }
}
