pub mod classify;
pub mod debounce;
pub mod dispatch;
pub mod frame;

pub use classify::{Gesture, GestureVocabulary, ReferenceJoint};
pub use debounce::{GestureState, DEFAULT_DEBOUNCE};
pub use dispatch::{FrameOutcome, GestureAction, GestureBinding, GesturePipeline, PresentationSink};
pub use frame::{HandFrame, Landmark, LANDMARK_COUNT};

#[derive(Debug, thiserror::Error)]
pub enum GestureError {
    #[error("expected {LANDMARK_COUNT} landmarks, got {0}")]
    WrongLandmarkCount(usize),
    #[error("frame source unavailable: {0}")]
    SourceUnavailable(String),
}
