use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub sourcing: SourcingConfig,
    pub gesture: GestureConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourcingConfig {
    /// Toggle between live sourcing tiers and pure synthesis.
    #[serde(default = "default_true")]
    pub live_data: bool,
    /// Credential for the schedule provider; the tier is skipped without one.
    #[serde(default)]
    pub schedule_access_key: Option<String>,
    /// Pass-through fetch proxy prefix; empty disables proxying.
    #[serde(default)]
    pub fetch_proxy: String,
    #[serde(default = "default_position_feed_url")]
    pub position_feed_url: String,
    #[serde(default = "default_schedule_api_url")]
    pub schedule_api_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GestureConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Process every Nth frame.
    #[serde(default = "default_frame_stride")]
    pub frame_stride: u64,
    /// "scroll" or "navigate".
    #[serde(default = "default_vocabulary")]
    pub vocabulary: String,
}

fn default_true() -> bool {
    true
}

fn default_position_feed_url() -> String {
    "https://opensky-network.org/api/states/all".to_string()
}

fn default_schedule_api_url() -> String {
    "http://api.aviationstack.com/v1/flights".to_string()
}

fn default_debounce_ms() -> u64 {
    350
}

fn default_frame_stride() -> u64 {
    3
}

fn default_vocabulary() -> String {
    "scroll".to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("STRATO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
