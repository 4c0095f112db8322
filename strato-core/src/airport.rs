use serde::Serialize;

/// Static airport reference row. Loaded once at startup, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub icao: &'static str,
}

const AIRPORTS: &[Airport] = &[
    Airport { code: "JFK", name: "New York JFK", city: "New York", lat: 40.6413, lon: -73.7781, icao: "KJFK" },
    Airport { code: "LAX", name: "Los Angeles", city: "Los Angeles", lat: 33.9416, lon: -118.4085, icao: "KLAX" },
    Airport { code: "ORD", name: "Chicago O'Hare", city: "Chicago", lat: 41.9742, lon: -87.9073, icao: "KORD" },
    Airport { code: "LHR", name: "London Heathrow", city: "London", lat: 51.4700, lon: -0.4543, icao: "EGLL" },
    Airport { code: "CDG", name: "Paris Charles de Gaulle", city: "Paris", lat: 49.0097, lon: 2.5479, icao: "LFPG" },
    Airport { code: "FCO", name: "Rome Fiumicino", city: "Rome", lat: 41.8003, lon: 12.2389, icao: "LIRF" },
];

/// Lookup over the fixed airport table.
#[derive(Debug, Clone, Copy, Default)]
pub struct AirportTable;

impl AirportTable {
    pub fn get(&self, code: &str) -> Option<&'static Airport> {
        AIRPORTS.iter().find(|a| a.code.eq_ignore_ascii_case(code))
    }

    pub fn all(&self) -> &'static [Airport] {
        AIRPORTS
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// As [`get`](Self::get), surfacing a miss as an error for callers that
    /// require both endpoints to resolve.
    pub fn resolve(&self, code: &str) -> crate::CoreResult<&'static Airport> {
        self.get(code)
            .ok_or_else(|| crate::CoreError::UnknownAirport(code.to_string()))
    }
}

/// Great-circle distance in statute miles, rounded to the nearest mile.
pub fn haversine_miles(from: &Airport, to: &Airport) -> f64 {
    const EARTH_RADIUS_MILES: f64 = 3959.0;

    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_MILES * c).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = AirportTable;
        assert_eq!(table.get("lax").unwrap().code, "LAX");
        assert_eq!(table.get("LHR").unwrap().city, "London");
        assert!(table.get("ZZZ").is_none());
    }

    #[test]
    fn test_resolve_reports_unknown_code() {
        let table = AirportTable;
        assert_eq!(table.resolve("CDG").unwrap().city, "Paris");

        match table.resolve("ZZZ") {
            Err(crate::CoreError::UnknownAirport(code)) => assert_eq!(code, "ZZZ"),
            other => panic!("expected UnknownAirport, got {other:?}"),
        }
    }

    #[test]
    fn test_transatlantic_distance() {
        let table = AirportTable;
        let jfk = table.get("JFK").unwrap();
        let lhr = table.get("LHR").unwrap();

        let miles = haversine_miles(jfk, lhr);
        // JFK-LHR is roughly 3,450 statute miles.
        assert!((3400.0..3500.0).contains(&miles), "got {miles}");
        // Symmetric and zero on the diagonal.
        assert_eq!(miles, haversine_miles(lhr, jfk));
        assert_eq!(haversine_miles(jfk, jfk), 0.0);
    }
}
