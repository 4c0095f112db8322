pub mod cache;
pub mod pipeline;
pub mod pricing;
pub mod providers;
pub mod synth;

pub use cache::{CacheEntry, CacheKey, SearchCache};
pub use pipeline::SearchPipeline;
pub use pricing::{FareConfig, FareQuote};
pub use providers::{PositionFeedProvider, ScheduleProvider, SourcingError, SourcingProvider};
pub use synth::ScheduleSynthesizer;
