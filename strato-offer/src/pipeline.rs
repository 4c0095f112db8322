use crate::cache::{CacheKey, SearchCache};
use crate::providers::SourcingProvider;
use crate::synth::ScheduleSynthesizer;
use std::sync::atomic::{AtomicU64, Ordering};
use strato_core::{AirportTable, FlightOffer, OfferSource, SearchQuery};

/// The flight-candidate pipeline: validation, cache, ordered sourcing tiers,
/// and the synthesis fallback that cannot fail. At most one caller drives a
/// logical search at a time; the generation counter lets the caller discard
/// a result that a newer search has superseded.
pub struct SearchPipeline {
    table: AirportTable,
    providers: Vec<Box<dyn SourcingProvider>>,
    synthesizer: ScheduleSynthesizer,
    cache: tokio::sync::Mutex<SearchCache>,
    generation: AtomicU64,
}

impl SearchPipeline {
    pub fn new(providers: Vec<Box<dyn SourcingProvider>>, synthesizer: ScheduleSynthesizer) -> Self {
        Self {
            table: AirportTable,
            providers,
            synthesizer,
            cache: tokio::sync::Mutex::new(SearchCache::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn airports(&self) -> &AirportTable {
        &self.table
    }

    /// Mark the start of a new search and return its generation. A completed
    /// search whose generation is no longer current has been superseded and
    /// should not overwrite newer display state.
    pub fn begin_search(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Produce an ordered list of at most ten offers for the query. Invalid
    /// queries yield an empty list; sourcing failures cascade through the
    /// tier chain and bottom out in synthesis, so a valid query always
    /// produces offers.
    pub async fn search(&self, query: &SearchQuery) -> Vec<FlightOffer> {
        if !query.is_valid(&self.table) {
            tracing::debug!(
                origin = %query.origin,
                destination = %query.destination,
                "invalid route, returning empty result"
            );
            return Vec::new();
        }

        let key = CacheKey::for_query(query);
        if let Some(hit) = self.cache.lock().await.get(&key) {
            tracing::debug!(origin = %key.origin, destination = %key.destination, "cache hit");
            return hit.to_vec();
        }

        let offers = self.source(query).await;
        self.cache.lock().await.store(key, offers.clone());
        offers
    }

    async fn source(&self, query: &SearchQuery) -> Vec<FlightOffer> {
        for provider in &self.providers {
            match provider.fetch(query).await {
                Ok(offers) if !offers.is_empty() => {
                    tracing::info!(
                        tier = provider.name(),
                        count = offers.len(),
                        "sourced offers"
                    );
                    return offers;
                }
                Ok(_) => {
                    tracing::warn!(tier = provider.name(), "tier produced no offers");
                }
                Err(e) => {
                    tracing::warn!(tier = provider.name(), error = %e, "tier failed");
                }
            }
        }

        tracing::info!("all sourcing tiers exhausted, synthesizing offers");
        self.synthesizer.synthesize(
            query,
            &self.table,
            &[],
            OfferSource::Synthesized,
            &mut rand::thread_rng(),
        )
    }

    /// Seed the cache directly. Test and warm-up hook.
    pub async fn prime_cache(
        &self,
        key: CacheKey,
        offers: Vec<FlightOffer>,
        created_at: chrono::DateTime<chrono::Utc>,
    ) {
        self.cache.lock().await.store_at(key, offers, created_at);
    }

    /// Sweep expired cache entries. Returns how many were dropped.
    pub async fn sweep_cache(&self) -> usize {
        self.cache.lock().await.cleanup_expired()
    }
}
