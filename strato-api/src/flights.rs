use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strato_core::{sort_offers, CabinClass, FlightOffer, SearchQuery, SortKey};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    /// Defaults to tomorrow when absent, matching the search form.
    pub date: Option<NaiveDate>,
    pub cabin_class: Option<CabinClass>,
    pub passengers: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub live_data: bool,
    pub offers: Vec<FlightOffer>,
}

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    pub key: SortKey,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/flights/search
///
/// Runs the flight-candidate pipeline. An invalid route is the empty-result
/// state, not an error. A result superseded by a newer search is returned to
/// its caller but does not overwrite the displayed list.
pub async fn search_flights(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let date = req
        .date
        .unwrap_or_else(|| Utc::now().date_naive() + Days::new(1));
    let query = SearchQuery {
        origin: req.origin,
        destination: req.destination,
        date,
        cabin: req.cabin_class.unwrap_or_default(),
        passengers: req.passengers.unwrap_or(1),
    };

    let generation = state.pipeline.begin_search();
    let offers = state.pipeline.search(&query).await;

    if state.pipeline.is_current(generation) {
        *state.display.lock().await = offers.clone();
    } else {
        tracing::debug!(generation, "search superseded, not displayed");
    }

    Ok(Json(SearchResponse {
        count: offers.len(),
        live_data: offers.first().is_some_and(|o| o.source.is_live()),
        offers,
    }))
}

/// POST /v1/flights/sort
///
/// Re-orders the displayed list in place. Cache entries keep their original
/// order.
pub async fn sort_flights(
    State(state): State<AppState>,
    Json(req): Json<SortRequest>,
) -> Result<Json<Vec<FlightOffer>>, AppError> {
    let mut display = state.display.lock().await;
    sort_offers(&mut display, req.key);
    Ok(Json(display.clone()))
}

/// GET /v1/flights/last
pub async fn last_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<FlightOffer>>, AppError> {
    Ok(Json(state.display.lock().await.clone()))
}
