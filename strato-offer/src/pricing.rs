use rand::Rng;
use serde::{Deserialize, Serialize};
use strato_core::CabinClass;

/// Fare calculation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareConfig {
    /// Flat component of the base fare, in whole currency units.
    pub base_fare: f64,

    /// Per-mile component of the base fare.
    pub per_mile: f64,

    /// Divisor for the duration multiplier: `1 + hours / divisor`.
    pub duration_divisor: f64,

    /// Lower bound of the uniform fare variation draw.
    pub variation_low: f64,

    /// Upper bound of the uniform fare variation draw.
    pub variation_high: f64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            base_fare: 150.0,
            per_mile: 0.18,
            duration_divisor: 20.0,
            variation_low: 0.8,
            variation_high: 1.2,
        }
    }
}

/// Quotes a fare from route distance, flight duration, and cabin class.
/// Intentionally non-deterministic: the variation draw models fare spread,
/// not a real tariff lookup. Callers own the RNG so tests can pin a seed.
#[derive(Debug, Clone, Default)]
pub struct FareQuote {
    config: FareConfig,
}

impl FareQuote {
    pub fn new(config: FareConfig) -> Self {
        Self { config }
    }

    pub fn price(
        &self,
        distance_miles: f64,
        duration_hours: f64,
        cabin: CabinClass,
        rng: &mut impl Rng,
    ) -> i64 {
        let base = self.config.base_fare + distance_miles * self.config.per_mile;
        let time_multiplier = 1.0 + duration_hours / self.config.duration_divisor;
        let variation = rng.gen_range(self.config.variation_low..self.config.variation_high);

        (base * time_multiplier * cabin.fare_multiplier() * variation).round() as i64
    }
}
