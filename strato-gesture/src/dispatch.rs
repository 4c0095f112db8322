use crate::classify::{Gesture, GestureVocabulary};
use crate::debounce::{GestureState, DEFAULT_DEBOUNCE};
use crate::frame::HandFrame;
use crate::GestureError;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A fire-and-forget action against the presentation layer. Actions never
/// block and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureAction {
    /// Smooth-scroll the whole viewport by a pixel delta.
    ScrollPage { delta_px: i32 },
    /// Scroll the results container by a pixel delta.
    ScrollResults { delta_px: i32 },
    /// Reset the search form to its default origin/destination.
    ResetSearch,
    /// Show a transient on-screen overlay.
    ShowOverlay { text: String, duration_ms: u64 },
}

/// Capabilities the gesture pipeline consumes from the presentation layer.
pub trait PresentationSink: Send + Sync {
    fn show_gesture_status(&self, text: &str);
    fn scroll_page(&self, delta_px: i32);
    fn scroll_results(&self, delta_px: i32);
    fn reset_search(&self);
    fn show_overlay(&self, text: &str, duration_ms: u64);
}

/// Binds an accepted gesture to its status text and dispatched action.
#[derive(Debug, Clone)]
pub struct GestureBinding {
    pub gesture: Gesture,
    pub status: &'static str,
    pub action: GestureAction,
}

/// Bindings for [`GestureVocabulary::navigate`].
pub fn navigate_bindings() -> Vec<GestureBinding> {
    vec![
        GestureBinding {
            gesture: Gesture::Fist,
            status: "Scrolling down flights",
            action: GestureAction::ScrollResults { delta_px: 150 },
        },
        GestureBinding {
            gesture: Gesture::Palm,
            status: "Resetting search",
            action: GestureAction::ResetSearch,
        },
        GestureBinding {
            gesture: Gesture::ThumbsUp,
            status: "Scrolling up",
            action: GestureAction::ScrollResults { delta_px: -150 },
        },
    ]
}

/// Bindings for [`GestureVocabulary::scroll`].
pub fn scroll_bindings() -> Vec<GestureBinding> {
    vec![
        GestureBinding {
            gesture: Gesture::Peace,
            status: "Scrolling down",
            action: GestureAction::ScrollPage { delta_px: 250 },
        },
        GestureBinding {
            gesture: Gesture::Point,
            status: "Scrolling up",
            action: GestureAction::ScrollPage { delta_px: -250 },
        },
        GestureBinding {
            gesture: Gesture::Fist,
            status: "Paused",
            action: GestureAction::ShowOverlay {
                text: "Paused".into(),
                duration_ms: 800,
            },
        },
    ]
}

/// Outcome of feeding one frame through the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct FrameOutcome {
    pub label: Gesture,
    /// False when the frame was skipped by the subsampling stride or the
    /// pipeline is disabled.
    pub processed: bool,
    pub accepted: bool,
    pub action: Option<GestureAction>,
}

impl FrameOutcome {
    fn skipped() -> Self {
        Self {
            label: Gesture::None,
            processed: false,
            accepted: false,
            action: None,
        }
    }
}

const IDLE_STATUS: &str = "Ready for gestures";

/// The gesture classification pipeline: stride subsampling, pure per-frame
/// classification, wall-clock debounce, and action dispatch.
pub struct GesturePipeline {
    vocabulary: GestureVocabulary,
    bindings: Vec<GestureBinding>,
    state: GestureState,
    window: Duration,
    stride: u64,
    frame_counter: u64,
    disabled: bool,
}

impl GesturePipeline {
    pub fn new(
        vocabulary: GestureVocabulary,
        bindings: Vec<GestureBinding>,
        window: Duration,
        stride: u64,
    ) -> Self {
        Self {
            vocabulary,
            bindings,
            state: GestureState::new(),
            window,
            stride: stride.max(1),
            frame_counter: 0,
            disabled: false,
        }
    }

    /// Scroll-vocabulary pipeline with the stock debounce and every third
    /// frame processed.
    pub fn scroll_default() -> Self {
        Self::new(
            GestureVocabulary::scroll(),
            scroll_bindings(),
            DEFAULT_DEBOUNCE,
            3,
        )
    }

    pub fn navigate_default() -> Self {
        Self::new(
            GestureVocabulary::navigate(),
            navigate_bindings(),
            DEFAULT_DEBOUNCE,
            3,
        )
    }

    /// Camera or detector failure. Gestures degrade to a status message;
    /// nothing else on the page is affected.
    pub fn disable(&mut self, error: &GestureError, sink: &dyn PresentationSink) {
        tracing::warn!(error = %error, "disabling gesture control");
        self.disabled = true;
        sink.show_gesture_status("Gesture control unavailable");
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn process(&mut self, frame: Option<&HandFrame>, sink: &dyn PresentationSink) -> FrameOutcome {
        self.process_at(frame, sink, Instant::now())
    }

    /// As [`process`](Self::process), with an explicit clock for tests. The
    /// debounce window is wall-clock time, never a frame count.
    pub fn process_at(
        &mut self,
        frame: Option<&HandFrame>,
        sink: &dyn PresentationSink,
        now: Instant,
    ) -> FrameOutcome {
        if self.disabled {
            return FrameOutcome::skipped();
        }

        self.frame_counter += 1;
        if self.frame_counter % self.stride != 0 {
            return FrameOutcome::skipped();
        }

        let label = self.vocabulary.classify(frame);
        if label == Gesture::None {
            // Clears the status indicator only; debounce state is kept.
            sink.show_gesture_status(IDLE_STATUS);
            return FrameOutcome {
                label,
                processed: true,
                accepted: false,
                action: None,
            };
        }

        let binding = self.bindings.iter().find(|b| b.gesture == label);
        if let Some(binding) = binding {
            sink.show_gesture_status(binding.status);
        }

        let accepted = self.state.accept(label, now, self.window);
        let action = match (accepted, binding) {
            (true, Some(binding)) => {
                self.dispatch(&binding.action, sink);
                Some(binding.action.clone())
            }
            _ => None,
        };

        FrameOutcome {
            label,
            processed: true,
            accepted,
            action,
        }
    }

    fn dispatch(&self, action: &GestureAction, sink: &dyn PresentationSink) {
        tracing::debug!(?action, "dispatching gesture action");
        match action {
            GestureAction::ScrollPage { delta_px } => sink.scroll_page(*delta_px),
            GestureAction::ScrollResults { delta_px } => sink.scroll_results(*delta_px),
            GestureAction::ResetSearch => sink.reset_search(),
            GestureAction::ShowOverlay { text, duration_ms } => {
                sink.show_overlay(text, *duration_ms)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{landmark, Landmark, LANDMARK_COUNT};
    use std::sync::Mutex;

    /// Records every sink call for assertions.
    #[derive(Default)]
    struct RecordingSink {
        statuses: Mutex<Vec<String>>,
        scrolls: Mutex<Vec<i32>>,
        resets: Mutex<usize>,
        overlays: Mutex<Vec<String>>,
    }

    impl PresentationSink for RecordingSink {
        fn show_gesture_status(&self, text: &str) {
            self.statuses.lock().unwrap().push(text.to_string());
        }
        fn scroll_page(&self, delta_px: i32) {
            self.scrolls.lock().unwrap().push(delta_px);
        }
        fn scroll_results(&self, delta_px: i32) {
            self.scrolls.lock().unwrap().push(delta_px);
        }
        fn reset_search(&self) {
            *self.resets.lock().unwrap() += 1;
        }
        fn show_overlay(&self, text: &str, _duration_ms: u64) {
            self.overlays.lock().unwrap().push(text.to_string());
        }
    }

    fn peace_frame() -> HandFrame {
        let mut points = [Landmark { x: 0.5, y: 0.5 }; LANDMARK_COUNT];
        points[landmark::INDEX_TIP].y = 0.2;
        points[landmark::MIDDLE_TIP].y = 0.2;
        points[landmark::RING_TIP].y = 0.7;
        points[landmark::PINKY_TIP].y = 0.7;
        HandFrame::new(points)
    }

    fn palm_frame() -> HandFrame {
        let mut points = [Landmark { x: 0.5, y: 0.5 }; LANDMARK_COUNT];
        for tip in [
            landmark::INDEX_TIP,
            landmark::MIDDLE_TIP,
            landmark::RING_TIP,
            landmark::PINKY_TIP,
        ] {
            points[tip].y = 0.2;
        }
        HandFrame::new(points)
    }

    #[test]
    fn test_stride_subsamples_frames() {
        let mut pipeline = GesturePipeline::scroll_default();
        let sink = RecordingSink::default();
        let start = Instant::now();
        let frame = peace_frame();

        let processed = (0..9)
            .filter(|i| {
                pipeline
                    .process_at(Some(&frame), &sink, start + Duration::from_millis(i * 33))
                    .processed
            })
            .count();

        // Every third frame of nine.
        assert_eq!(processed, 3);
    }

    #[test]
    fn test_peace_scrolls_page_down_once_within_window() {
        let mut pipeline =
            GesturePipeline::new(GestureVocabulary::scroll(), scroll_bindings(), DEFAULT_DEBOUNCE, 1);
        let sink = RecordingSink::default();
        let start = Instant::now();
        let frame = peace_frame();

        let first = pipeline.process_at(Some(&frame), &sink, start);
        assert!(first.accepted);
        assert_eq!(first.action, Some(GestureAction::ScrollPage { delta_px: 250 }));

        let repeat = pipeline.process_at(Some(&frame), &sink, start + Duration::from_millis(100));
        assert!(repeat.processed);
        assert!(!repeat.accepted);
        assert_eq!(repeat.action, None);

        assert_eq!(*sink.scrolls.lock().unwrap(), vec![250]);
        // Status text still shown on the rejected repeat.
        assert_eq!(sink.statuses.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_palm_resets_search() {
        let mut pipeline = GesturePipeline::new(
            GestureVocabulary::navigate(),
            navigate_bindings(),
            DEFAULT_DEBOUNCE,
            1,
        );
        let sink = RecordingSink::default();

        let outcome = pipeline.process_at(Some(&palm_frame()), &sink, Instant::now());
        assert_eq!(outcome.label, Gesture::Palm);
        assert_eq!(outcome.action, Some(GestureAction::ResetSearch));
        assert_eq!(*sink.resets.lock().unwrap(), 1);
    }

    #[test]
    fn test_absent_frame_shows_idle_status() {
        let mut pipeline =
            GesturePipeline::new(GestureVocabulary::scroll(), scroll_bindings(), DEFAULT_DEBOUNCE, 1);
        let sink = RecordingSink::default();

        let outcome = pipeline.process_at(None, &sink, Instant::now());
        assert_eq!(outcome.label, Gesture::None);
        assert!(outcome.processed);
        assert!(!outcome.accepted);
        assert_eq!(*sink.statuses.lock().unwrap(), vec![IDLE_STATUS.to_string()]);
    }

    #[test]
    fn test_disabled_pipeline_degrades_quietly() {
        let mut pipeline = GesturePipeline::scroll_default();
        let sink = RecordingSink::default();

        let error = GestureError::SourceUnavailable("camera acquisition failed".into());
        assert_eq!(
            error.to_string(),
            "frame source unavailable: camera acquisition failed"
        );

        pipeline.disable(&error, &sink);
        assert!(pipeline.is_disabled());

        let outcome = pipeline.process_at(Some(&peace_frame()), &sink, Instant::now());
        assert!(!outcome.processed);
        assert_eq!(
            *sink.statuses.lock().unwrap(),
            vec!["Gesture control unavailable".to_string()]
        );
    }
}
