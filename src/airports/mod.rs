//! In-memory airport reference data and the route-field search.
//!
//! The directory holds an immutable snapshot behind a lock. Once the
//! snapshot is older than the TTL, the next reader builds a replacement
//! outside the lock and swaps it in, so readers only ever see a complete
//! dataset.

mod dataset;
mod search;

pub use dataset::{curated, POPULAR_CODES};
pub use search::MAX_RESULTS;

use crate::domain::AirportCatalog;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Queries shorter than this get the popular shortlist instead of a search.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
}

type Source = Box<dyn Fn() -> Vec<Airport> + Send + Sync>;

struct Snapshot {
    airports: Vec<Airport>,
    by_code: HashMap<String, usize>,
    popular: Vec<Airport>,
    built_at: Instant,
}

impl Snapshot {
    fn build(airports: Vec<Airport>) -> Self {
        let by_code = airports
            .iter()
            .enumerate()
            .map(|(index, airport)| (airport.code.clone(), index))
            .collect::<HashMap<_, _>>();
        let popular = POPULAR_CODES
            .iter()
            .filter_map(|code| by_code.get(*code).map(|&index| airports[index].clone()))
            .collect();
        Self {
            airports,
            by_code,
            popular,
            built_at: Instant::now(),
        }
    }

    fn lookup(&self, code: &str) -> Option<&Airport> {
        self.by_code.get(code).map(|&index| &self.airports[index])
    }
}

pub struct AirportDirectory {
    current: RwLock<Arc<Snapshot>>,
    ttl: Duration,
    source: Source,
}

impl AirportDirectory {
    /// A directory over the curated dataset.
    pub fn new(ttl: Duration) -> Self {
        Self::with_source(ttl, curated)
    }

    pub fn with_source<F>(ttl: Duration, source: F) -> Self
    where
        F: Fn() -> Vec<Airport> + Send + Sync + 'static,
    {
        let snapshot = Snapshot::build(source());
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            ttl,
            source: Box::new(source),
        }
    }

    /// Popular airports for short queries, ranked matches otherwise.
    ///
    /// Never fails: an unusable directory yields a small fixed list.
    #[tracing::instrument(name = "Search airports", skip(self))]
    pub fn search(&self, query: &str) -> Vec<Airport> {
        let snapshot = match self.snapshot() {
            Some(snapshot) => snapshot,
            None => return dataset::fallback(),
        };
        if query.trim().chars().count() < MIN_QUERY_CHARS {
            return snapshot.popular.clone();
        }
        search::rank(&snapshot.airports, query)
    }

    pub fn lookup(&self, code: &str) -> Option<Airport> {
        let code = code.trim().to_ascii_uppercase();
        match self.snapshot() {
            Some(snapshot) => snapshot.lookup(&code).cloned(),
            None => dataset::fallback().into_iter().find(|a| a.code == code),
        }
    }

    /// Rebuild the snapshot from the source now, whatever its age.
    #[tracing::instrument(name = "Refresh airport directory", skip(self))]
    pub fn refresh(&self) {
        let fresh = Arc::new(Snapshot::build((self.source)()));
        match self.current.write() {
            Ok(mut guard) => *guard = fresh,
            Err(e) => tracing::error!(error = %e, "Airport directory lock is poisoned"),
        }
    }

    fn snapshot(&self) -> Option<Arc<Snapshot>> {
        let snapshot = match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(e) => {
                tracing::error!(error = %e, "Airport directory lock is poisoned, serving fallback");
                return None;
            }
        };
        if snapshot.built_at.elapsed() < self.ttl {
            return Some(snapshot);
        }
        self.refresh();
        self.current.read().ok().map(|guard| Arc::clone(&guard))
    }
}

impl AirportCatalog for AirportDirectory {
    fn is_known(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }
}
