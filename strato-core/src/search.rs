use crate::airport::AirportTable;
use serde::{Deserialize, Serialize};

/// Cabin class selected on the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    Economy,
    Business,
    First,
}

impl CabinClass {
    /// Fare multiplier applied on top of the distance/duration base fare.
    pub fn fare_multiplier(&self) -> f64 {
        match self {
            CabinClass::Economy => 1.0,
            CabinClass::Business => 2.2,
            CabinClass::First => 3.5,
        }
    }
}

impl Default for CabinClass {
    fn default() -> Self {
        CabinClass::Economy
    }
}

/// One flight search as submitted by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub date: chrono::NaiveDate,
    #[serde(default)]
    pub cabin: CabinClass,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
}

fn default_passengers() -> u32 {
    1
}

impl SearchQuery {
    /// A query only produces results when both codes are known and distinct.
    /// An invalid query is the UI's "no selection" state, not an error.
    pub fn is_valid(&self, table: &AirportTable) -> bool {
        table.contains(&self.origin)
            && table.contains(&self.destination)
            && !self.origin.eq_ignore_ascii_case(&self.destination)
    }
}
