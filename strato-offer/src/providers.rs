use crate::pricing::FareQuote;
use crate::synth::{ScheduleSynthesizer, MAX_OFFERS};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use strato_core::offer::format_duration;
use strato_core::{haversine_miles, AirportTable, FlightOffer, OfferSource, SearchQuery};

/// How many callsigns to harvest from the position feed.
const MAX_CALLSIGNS: usize = 15;

#[derive(Debug, thiserror::Error)]
pub enum SourcingError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error(transparent)]
    Core(#[from] strato_core::CoreError),
    #[error("provider returned no usable records")]
    Empty,
}

/// One sourcing tier. Tiers are tried in order by the pipeline; a tier that
/// errors or produces nothing cascades to the next.
#[async_trait]
pub trait SourcingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<FlightOffer>, SourcingError>;
}

/// Prefix a request URL with the pass-through fetch proxy, if one is
/// configured. The proxy is deployment plumbing, not pipeline logic.
fn proxied(proxy_prefix: &str, url: &str) -> String {
    if proxy_prefix.is_empty() {
        url.to_string()
    } else {
        let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
        format!("{proxy_prefix}{encoded}")
    }
}

// ============================================================================
// Position feed tier
// ============================================================================

#[derive(Debug, Deserialize)]
struct PositionFeedBody {
    states: Option<Vec<Vec<serde_json::Value>>>,
}

/// Pull callsigns of currently airborne aircraft and lay them over
/// synthesized schedules. Best-effort cosmetic enrichment: the feed knows
/// nothing about the requested route.
pub struct PositionFeedProvider {
    client: reqwest::Client,
    feed_url: String,
    proxy_prefix: String,
    table: AirportTable,
    synthesizer: ScheduleSynthesizer,
}

impl PositionFeedProvider {
    pub fn new(feed_url: String, proxy_prefix: String, synthesizer: ScheduleSynthesizer) -> Self {
        Self {
            client: reqwest::Client::new(),
            feed_url,
            proxy_prefix,
            table: AirportTable,
            synthesizer,
        }
    }
}

/// Trimmed, non-empty callsigns from the feed's state vectors (element 1),
/// capped at [`MAX_CALLSIGNS`].
fn extract_callsigns(body: &PositionFeedBody) -> Vec<String> {
    body.states
        .iter()
        .flatten()
        .filter_map(|state| state.get(1).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_CALLSIGNS)
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl SourcingProvider for PositionFeedProvider {
    fn name(&self) -> &'static str {
        "position-feed"
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<FlightOffer>, SourcingError> {
        let url = proxied(&self.proxy_prefix, &self.feed_url);
        let response = self.client.get(&url).send().await?;
        let body: PositionFeedBody = response.error_for_status()?.json().await?;

        let callsigns = extract_callsigns(&body);
        if callsigns.is_empty() {
            return Err(SourcingError::Empty);
        }
        tracing::debug!(count = callsigns.len(), "harvested live callsigns");

        let offers = self.synthesizer.synthesize(
            query,
            &self.table,
            &callsigns,
            OfferSource::PositionFeed,
            &mut rand::thread_rng(),
        );
        if offers.is_empty() {
            return Err(SourcingError::Empty);
        }
        Ok(offers)
    }
}

// ============================================================================
// Schedule provider tier
// ============================================================================

#[derive(Debug, Deserialize)]
struct ScheduleBody {
    data: Option<Vec<ScheduleRecord>>,
}

#[derive(Debug, Deserialize)]
struct ScheduleRecord {
    airline: AirlineInfo,
    flight: FlightIdent,
    departure: Movement,
    arrival: Movement,
}

#[derive(Debug, Deserialize)]
struct AirlineInfo {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlightIdent {
    iata: Option<String>,
    number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Movement {
    scheduled: Option<DateTime<FixedOffset>>,
}

/// Commercial schedule lookup filtered by departure/arrival airport codes.
/// Only attempted when an access key is configured.
pub struct ScheduleProvider {
    client: reqwest::Client,
    api_url: String,
    proxy_prefix: String,
    access_key: String,
    table: AirportTable,
    fares: FareQuote,
}

impl ScheduleProvider {
    pub fn new(api_url: String, proxy_prefix: String, access_key: String, fares: FareQuote) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            proxy_prefix,
            access_key,
            table: AirportTable,
            fares,
        }
    }
}

/// Map up to [`MAX_OFFERS`] schedule records into offers, price-ascending so
/// this tier meets the same default ordering as synthesis.
fn map_records(
    records: &[ScheduleRecord],
    query: &SearchQuery,
    distance: f64,
    fares: &FareQuote,
    rng: &mut impl rand::Rng,
) -> Vec<FlightOffer> {
    let mut offers: Vec<FlightOffer> = records
        .iter()
        .take(MAX_OFFERS)
        .filter_map(|r| map_record(r, query, distance, fares, rng))
        .collect();
    offers.sort_by_key(|o| o.price);
    offers
}

/// Map one schedule record to an offer. `None` when a required field is
/// missing or the scheduled times are inverted.
fn map_record(
    record: &ScheduleRecord,
    query: &SearchQuery,
    distance: f64,
    fares: &FareQuote,
    rng: &mut impl rand::Rng,
) -> Option<FlightOffer> {
    let airline = record.airline.name.clone()?;
    let flight_number = record
        .flight
        .iata
        .clone()
        .or_else(|| record.flight.number.clone())?;
    let depart = record.departure.scheduled?;
    let arrive = record.arrival.scheduled?;

    let elapsed = arrive.signed_duration_since(depart);
    if elapsed < chrono::Duration::zero() {
        return None;
    }
    let duration_hours = elapsed.num_hours();
    let price = fares.price(distance, duration_hours as f64, query.cabin, rng);

    Some(FlightOffer::new(
        airline,
        flight_number,
        query.origin.to_uppercase(),
        query.destination.to_uppercase(),
        depart.format("%H:%M").to_string(),
        arrive.format("%H:%M").to_string(),
        format_duration(elapsed.num_minutes()),
        0,
        price,
        query.date,
        OfferSource::ScheduleProvider,
    ))
}

#[async_trait]
impl SourcingProvider for ScheduleProvider {
    fn name(&self) -> &'static str {
        "schedule-provider"
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<FlightOffer>, SourcingError> {
        let from = self.table.resolve(&query.origin)?;
        let to = self.table.resolve(&query.destination)?;

        let raw = format!(
            "{}?access_key={}&dep_iata={}&arr_iata={}",
            self.api_url, self.access_key, from.code, to.code
        );
        let url = proxied(&self.proxy_prefix, &raw);

        let response = self.client.get(&url).send().await?;
        let body: ScheduleBody = response.error_for_status()?.json().await?;

        let records = body.data.unwrap_or_default();
        let distance = haversine_miles(from, to);
        let offers = map_records(&records, query, distance, &self.fares, &mut rand::thread_rng());

        if offers.is_empty() {
            return Err(SourcingError::Empty);
        }
        Ok(offers)
    }
}
