use crate::app_config::Config;
use std::sync::Arc;
use std::time::Duration;
use strato_core::FlightOffer;
use strato_gesture::{
    dispatch::{navigate_bindings, scroll_bindings},
    GesturePipeline, GestureVocabulary, PresentationSink,
};
use strato_offer::{
    FareQuote, PositionFeedProvider, ScheduleProvider, ScheduleSynthesizer, SearchPipeline,
    SourcingProvider,
};

/// Presentation sink for a headless deployment: actions are logged and the
/// latest status line is kept for the status endpoint. The real presentation
/// layer consumes the dispatched actions from the frame response.
#[derive(Default)]
pub struct StatusSink {
    last_status: std::sync::Mutex<String>,
}

impl StatusSink {
    pub fn last_status(&self) -> String {
        self.last_status.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl PresentationSink for StatusSink {
    fn show_gesture_status(&self, text: &str) {
        if let Ok(mut status) = self.last_status.lock() {
            *status = text.to_string();
        }
    }

    fn scroll_page(&self, delta_px: i32) {
        tracing::debug!(delta_px, "scroll page");
    }

    fn scroll_results(&self, delta_px: i32) {
        tracing::debug!(delta_px, "scroll results");
    }

    fn reset_search(&self) {
        tracing::debug!("reset search form");
    }

    fn show_overlay(&self, text: &str, duration_ms: u64) {
        tracing::debug!(text, duration_ms, "show overlay");
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SearchPipeline>,
    /// The currently displayed result list; re-sorting acts on this copy,
    /// never on cached entries.
    pub display: Arc<tokio::sync::Mutex<Vec<FlightOffer>>>,
    pub gestures: Arc<tokio::sync::Mutex<GesturePipeline>>,
    pub sink: Arc<StatusSink>,
}

/// Wire the sourcing tier chain and the gesture pipeline from configuration.
pub fn build_state(config: &Config) -> AppState {
    let fares = FareQuote::default();
    let synthesizer = ScheduleSynthesizer::new(fares.clone());

    let mut providers: Vec<Box<dyn SourcingProvider>> = Vec::new();
    if config.sourcing.live_data {
        providers.push(Box::new(PositionFeedProvider::new(
            config.sourcing.position_feed_url.clone(),
            config.sourcing.fetch_proxy.clone(),
            synthesizer.clone(),
        )));
        if let Some(key) = config
            .sourcing
            .schedule_access_key
            .as_ref()
            .filter(|k| !k.is_empty())
        {
            providers.push(Box::new(ScheduleProvider::new(
                config.sourcing.schedule_api_url.clone(),
                config.sourcing.fetch_proxy.clone(),
                key.clone(),
                fares.clone(),
            )));
        }
    }

    let vocabulary = GestureVocabulary::by_name(&config.gesture.vocabulary)
        .unwrap_or_else(GestureVocabulary::scroll);
    let bindings = if config.gesture.vocabulary == "navigate" {
        navigate_bindings()
    } else {
        scroll_bindings()
    };

    let gestures = GesturePipeline::new(
        vocabulary,
        bindings,
        Duration::from_millis(config.gesture.debounce_ms),
        config.gesture.frame_stride,
    );

    AppState {
        pipeline: Arc::new(SearchPipeline::new(providers, synthesizer)),
        display: Arc::new(tokio::sync::Mutex::new(Vec::new())),
        gestures: Arc::new(tokio::sync::Mutex::new(gestures)),
        sink: Arc::new(StatusSink::default()),
    }
}
