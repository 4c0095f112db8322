use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use strato_gesture::{FrameOutcome, HandFrame, Landmark};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FrameRequest {
    /// The 21 detected landmarks, absent when no hand is in frame.
    pub landmarks: Option<Vec<Landmark>>,
}

#[derive(Debug, Serialize)]
pub struct FrameResponse {
    #[serde(flatten)]
    pub outcome: FrameOutcome,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub disabled: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/gestures/frame
///
/// Feeds one detector frame through the classification pipeline and reports
/// the label, debounce decision, and any dispatched action. The caller fires
/// the action against its own presentation layer; nothing here blocks or
/// retries.
pub async fn process_frame(
    State(state): State<AppState>,
    Json(req): Json<FrameRequest>,
) -> Result<Json<FrameResponse>, AppError> {
    let frame = match req.landmarks {
        Some(points) => Some(
            HandFrame::from_points(points).map_err(|e| AppError::ValidationError(e.to_string()))?,
        ),
        None => None,
    };

    let outcome = state
        .gestures
        .lock()
        .await
        .process(frame.as_ref(), &*state.sink);

    Ok(Json(FrameResponse {
        outcome,
        status: state.sink.last_status(),
    }))
}

/// GET /v1/gestures/status
pub async fn gesture_status(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let disabled = state.gestures.lock().await.is_disabled();
    Ok(Json(StatusResponse {
        status: state.sink.last_status(),
        disabled,
    }))
}
