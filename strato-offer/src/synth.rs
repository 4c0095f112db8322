use crate::pricing::FareQuote;
use rand::Rng;
use strato_core::offer::{format_clock, format_duration};
use strato_core::{haversine_miles, AirportTable, FlightOffer, OfferSource, SearchQuery};

/// Default carrier rotation for synthesized schedules.
pub const DEFAULT_CARRIERS: &[&str] = &[
    "United",
    "Delta",
    "American",
    "Southwest",
    "JetBlue",
    "British Airways",
    "Air France",
    "Lufthansa",
];

/// Assumed cruise speed used to derive a base duration from route distance.
const MILES_PER_HOUR: f64 = 500.0;

/// Maximum offers produced per search.
pub const MAX_OFFERS: usize = 10;

/// Fabricates plausible flight schedules for a route. Used both as the
/// terminal fallback tier and to lay live callsigns over invented schedules.
#[derive(Debug, Clone)]
pub struct ScheduleSynthesizer {
    carriers: Vec<String>,
    fares: FareQuote,
}

impl Default for ScheduleSynthesizer {
    fn default() -> Self {
        Self::new(FareQuote::default())
    }
}

impl ScheduleSynthesizer {
    pub fn new(fares: FareQuote) -> Self {
        Self {
            carriers: DEFAULT_CARRIERS.iter().map(|c| c.to_string()).collect(),
            fares,
        }
    }

    pub fn with_carriers(fares: FareQuote, carriers: Vec<String>) -> Self {
        Self { carriers, fares }
    }

    /// Produce up to [`MAX_OFFERS`] offers for the query, sorted ascending by
    /// price. When `callsigns` is non-empty its entries become the flight
    /// numbers and the offers are tagged with `source`; otherwise synthetic
    /// flight numbers are minted and the offers are tagged as synthesized.
    pub fn synthesize(
        &self,
        query: &SearchQuery,
        table: &AirportTable,
        callsigns: &[String],
        source: OfferSource,
        rng: &mut impl Rng,
    ) -> Vec<FlightOffer> {
        let (Some(from), Some(to)) = (table.get(&query.origin), table.get(&query.destination))
        else {
            return Vec::new();
        };

        let distance = haversine_miles(from, to);
        let base_minutes = (distance / MILES_PER_HOUR).ceil() as i64 * 60;

        let count = if callsigns.is_empty() {
            MAX_OFFERS
        } else {
            MAX_OFFERS.min(callsigns.len())
        };

        let mut offers = Vec::with_capacity(count);
        for i in 0..count {
            let airline = &self.carriers[i % self.carriers.len()];
            let flight_number = callsigns
                .get(i)
                .cloned()
                .unwrap_or_else(|| synthetic_flight_number(airline, i));

            // Departures fan out across the day on a 90-minute grid from 06:00,
            // displayed on the whole hour plus a random minute.
            let depart_minutes = ((6.0 + 1.5 * i as f64).floor() as i64) * 60 + rng.gen_range(0..60);
            let duration_minutes = base_minutes + rng.gen_range(-30..=30);
            let arrive_minutes = depart_minutes + duration_minutes;

            let stops = if rng.gen_bool(0.35) { 0 } else { 1 };
            let price = self.fares.price(
                distance,
                duration_minutes as f64 / 60.0,
                query.cabin,
                rng,
            );

            offers.push(FlightOffer::new(
                airline.clone(),
                flight_number,
                from.code.to_string(),
                to.code.to_string(),
                format_clock(depart_minutes),
                format_clock(arrive_minutes),
                format_duration(duration_minutes),
                stops,
                price,
                query.date,
                if callsigns.is_empty() {
                    OfferSource::Synthesized
                } else {
                    source
                },
            ));
        }

        offers.sort_by_key(|o| o.price);
        offers
    }
}

fn synthetic_flight_number(airline: &str, index: usize) -> String {
    let prefix: String = airline.chars().take(2).collect::<String>().to_uppercase();
    format!("{}{}", prefix, 1000 + index)
}
