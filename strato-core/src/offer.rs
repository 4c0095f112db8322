use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an offer's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferSource {
    /// Fully fabricated schedule and fare.
    Synthesized,
    /// Synthesized schedule wearing a live callsign from the position feed.
    PositionFeed,
    /// Mapped from a schedule-provider record.
    ScheduleProvider,
}

impl OfferSource {
    /// Whether any part of the offer was sourced from a live feed.
    pub fn is_live(&self) -> bool {
        !matches!(self, OfferSource::Synthesized)
    }
}

/// A single flight candidate shown to the user. Immutable once created;
/// ordering within a result set is a display concern, not a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: Uuid,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    /// Local display time, "HH:MM".
    pub depart_time: String,
    /// Local display time, "HH:MM", wrapped at midnight.
    pub arrive_time: String,
    /// Display duration, "Xh Ym".
    pub duration: String,
    pub stops: u32,
    /// Whole currency units (USD).
    pub price: i64,
    pub date: NaiveDate,
    pub source: OfferSource,
}

impl FlightOffer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        airline: String,
        flight_number: String,
        origin: String,
        destination: String,
        depart_time: String,
        arrive_time: String,
        duration: String,
        stops: u32,
        price: i64,
        date: NaiveDate,
        source: OfferSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            airline,
            flight_number,
            origin,
            destination,
            depart_time,
            arrive_time,
            duration,
            stops,
            price,
            date,
            source,
        }
    }

    /// Leading whole-hour count parsed from the display duration.
    pub fn duration_hours(&self) -> i64 {
        self.duration
            .split('h')
            .next()
            .and_then(|h| h.trim().parse().ok())
            .unwrap_or(0)
    }
}

/// Format minutes past midnight as a wrapped "HH:MM" display time.
pub fn format_clock(minutes_past_midnight: i64) -> String {
    let m = minutes_past_midnight.rem_euclid(24 * 60);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Format a duration in minutes as "Xh Ym".
pub fn format_duration(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Sort key for the result-ordering facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Duration,
    Airline,
}

/// Re-order a displayed result list in place. Acts on the display copy only;
/// cached lists keep their original order.
pub fn sort_offers(offers: &mut [FlightOffer], key: SortKey) {
    match key {
        SortKey::Price => offers.sort_by_key(|o| o.price),
        SortKey::Duration => offers.sort_by_key(|o| o.duration_hours()),
        SortKey::Airline => offers.sort_by(|a, b| a.airline.cmp(&b.airline)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(airline: &str, price: i64, duration: &str) -> FlightOffer {
        FlightOffer::new(
            airline.into(),
            "ST1000".into(),
            "LAX".into(),
            "LHR".into(),
            "08:15".into(),
            "18:40".into(),
            duration.into(),
            0,
            price,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            OfferSource::Synthesized,
        )
    }

    #[test]
    fn test_clock_wraps_at_midnight() {
        assert_eq!(format_clock(23 * 60 + 30 + 130), "01:40");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(24 * 60), "00:00");
        assert_eq!(format_clock(6 * 60 + 5), "06:05");
    }

    #[test]
    fn test_duration_roundtrip() {
        assert_eq!(format_duration(443), "7h 23m");
        assert_eq!(offer("Delta", 100, "7h 23m").duration_hours(), 7);
        assert_eq!(offer("Delta", 100, "11h 0m").duration_hours(), 11);
        // Malformed durations sort first rather than panicking.
        assert_eq!(offer("Delta", 100, "??").duration_hours(), 0);
    }

    #[test]
    fn test_sort_keys() {
        let mut offers = vec![
            offer("United", 900, "11h 5m"),
            offer("American", 400, "9h 20m"),
            offer("Delta", 700, "7h 45m"),
        ];

        sort_offers(&mut offers, SortKey::Price);
        assert_eq!(offers[0].price, 400);
        assert_eq!(offers[2].price, 900);

        sort_offers(&mut offers, SortKey::Duration);
        assert_eq!(offers[0].duration, "7h 45m");

        sort_offers(&mut offers, SortKey::Airline);
        assert_eq!(offers[0].airline, "American");
        assert_eq!(offers[2].airline, "United");
    }

    #[test]
    fn test_source_tagging() {
        assert!(!OfferSource::Synthesized.is_live());
        assert!(OfferSource::PositionFeed.is_live());
        assert!(OfferSource::ScheduleProvider.is_live());
    }
}
