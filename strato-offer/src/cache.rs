use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use strato_core::{FlightOffer, SearchQuery};

/// Route-and-date key for cached search results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub origin: String,
    pub destination: String,
    pub date: chrono::NaiveDate,
}

impl CacheKey {
    pub fn for_query(query: &SearchQuery) -> Self {
        Self {
            origin: query.origin.to_uppercase(),
            destination: query.destination.to_uppercase(),
            date: query.date,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub offers: Vec<FlightOffer>,
    pub created_at: DateTime<Utc>,
}

/// Short-lived result cache. An entry is valid while its age is under the
/// TTL; a hit returns the stored list verbatim, in its original order.
#[derive(Debug)]
pub struct SearchCache {
    entries: HashMap<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl SearchCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(5))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<&[FlightOffer]> {
        self.entries
            .get(key)
            .filter(|e| Utc::now() - e.created_at < self.ttl)
            .map(|e| e.offers.as_slice())
    }

    pub fn store(&mut self, key: CacheKey, offers: Vec<FlightOffer>) {
        self.store_at(key, offers, Utc::now());
    }

    /// Store with an explicit creation timestamp. Lets tests back-date
    /// entries instead of sleeping through the TTL.
    pub fn store_at(&mut self, key: CacheKey, offers: Vec<FlightOffer>, created_at: DateTime<Utc>) {
        self.entries.insert(key, CacheEntry { offers, created_at });
    }

    /// Drop entries past the TTL. Returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Utc::now();
        let initial_count = self.entries.len();
        let ttl = self.ttl;

        self.entries.retain(|_, e| now - e.created_at < ttl);

        initial_count - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use strato_core::{CabinClass, OfferSource};

    fn key() -> CacheKey {
        CacheKey {
            origin: "LAX".into(),
            destination: "LHR".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    fn offers() -> Vec<FlightOffer> {
        vec![FlightOffer::new(
            "Delta".into(),
            "DL1000".into(),
            "LAX".into(),
            "LHR".into(),
            "08:15".into(),
            "19:25".into(),
            "11h 10m".into(),
            0,
            845,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            OfferSource::Synthesized,
        )]
    }

    #[test]
    fn test_fresh_entry_returned_verbatim() {
        let mut cache = SearchCache::new();
        cache.store(key(), offers());

        let hit = cache.get(&key()).expect("fresh entry should hit");
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].flight_number, "DL1000");
    }

    #[test]
    fn test_key_normalizes_case() {
        let query = SearchQuery {
            origin: "lax".into(),
            destination: "Lhr".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            cabin: CabinClass::Economy,
            passengers: 1,
        };
        assert_eq!(CacheKey::for_query(&query), key());
    }

    #[test]
    fn test_stale_entry_treated_as_absent() {
        let mut cache = SearchCache::new();
        cache.store_at(key(), offers(), Utc::now() - Duration::minutes(6));

        assert!(cache.get(&key()).is_none());
        assert_eq!(cache.cleanup_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_entry_just_under_ttl_still_valid() {
        let mut cache = SearchCache::new();
        cache.store_at(
            key(),
            offers(),
            Utc::now() - Duration::minutes(4) - Duration::seconds(50),
        );

        assert!(cache.get(&key()).is_some());
        assert_eq!(cache.cleanup_expired(), 0);
        assert_eq!(cache.len(), 1);
    }
}
