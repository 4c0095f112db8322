pub mod airport;
pub mod offer;
pub mod search;

pub use airport::{haversine_miles, Airport, AirportTable};
pub use offer::{sort_offers, FlightOffer, OfferSource, SortKey};
pub use search::{CabinClass, SearchQuery};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown airport code: {0}")]
    UnknownAirport(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
