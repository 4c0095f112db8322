use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod app_config;
pub mod error;
pub mod flights;
pub mod gestures;
pub mod state;

pub use state::{build_state, AppState};

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/v1/flights/search", post(flights::search_flights))
        .route("/v1/flights/sort", post(flights::sort_flights))
        .route("/v1/flights/last", get(flights::last_results))
        .route("/v1/gestures/frame", post(gestures::process_frame))
        .route("/v1/gestures/status", get(gestures::gesture_status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
