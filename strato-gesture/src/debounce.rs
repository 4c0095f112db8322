use crate::classify::Gesture;
use std::time::{Duration, Instant};

/// Minimum time before an identical label may re-trigger its action.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

/// Debounce state for dispatched gestures. A non-`None` label is accepted
/// when it differs from the last accepted label, or when the debounce window
/// has elapsed since the last acceptance. A `None` classification never
/// dispatches and never touches this state, so a briefly lost hand does not
/// reset the cadence of a held gesture.
#[derive(Debug, Clone)]
pub struct GestureState {
    last: Gesture,
    last_accepted_at: Option<Instant>,
}

impl GestureState {
    pub fn new() -> Self {
        Self {
            last: Gesture::None,
            last_accepted_at: None,
        }
    }

    pub fn last(&self) -> Gesture {
        self.last
    }

    /// Decide whether `label` fires its action at `now`. Acceptance records
    /// both the label and the timestamp.
    pub fn accept(&mut self, label: Gesture, now: Instant, window: Duration) -> bool {
        if label == Gesture::None {
            return false;
        }

        let due = match self.last_accepted_at {
            None => true,
            Some(at) => label != self.last || now.duration_since(at) > window,
        };

        if due {
            self.last = label;
            self.last_accepted_at = Some(now);
        }
        due
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new()
    }
}
