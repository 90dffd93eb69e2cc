use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::time::Instant;

use crate::{CacheStore, CountryFetcher, FetchError, RawCountryFlags, RawCountryName, RawCountryRecord};

/// Build an upstream record for tests.
pub fn raw_country(
    common: &str,
    population: u64,
    capital: &[&str],
    svg: Option<&str>,
    png: Option<&str>,
) -> RawCountryRecord {
    RawCountryRecord {
        name: RawCountryName {
            common: common.to_owned(),
            official: common.to_owned(),
        },
        population,
        capital: (!capital.is_empty()).then(|| capital.iter().map(|c| (*c).to_owned()).collect()),
        flags: RawCountryFlags {
            svg: svg.map(str::to_owned),
            png: png.map(str::to_owned),
            alt: None,
        },
    }
}

type Step = Result<Vec<RawCountryRecord>, FetchError>;

/// Fetcher that replays a fixed script of responses.
///
/// Call `n` gets step `n`; once the script runs out the last step repeats.
/// Every call is counted and timestamped with the tokio clock.
pub struct ScriptedFetcher {
    steps: Vec<Step>,
    calls: AtomicUsize,
    call_times: Mutex<Vec<Instant>>,
}

impl ScriptedFetcher {
    pub fn new(steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty(), "script needs at least one step");
        Self {
            steps,
            calls: AtomicUsize::new(0),
            call_times: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `records`.
    pub fn returning(records: Vec<RawCountryRecord>) -> Self {
        Self::new(vec![Ok(records)])
    }

    /// Always fails with a transport error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(FetchError::Transport(message.to_owned()))])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.call_times.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CountryFetcher for ScriptedFetcher {
    fn label(&self) -> &str {
        "scripted"
    }

    async fn fetch_all(&self) -> Result<Vec<RawCountryRecord>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_times.lock().unwrap().push(Instant::now());
        self.steps[call.min(self.steps.len() - 1)].clone()
    }
}

/// Map-backed store with no expiry or capacity limit.
pub struct MemoryStore<V> {
    entries: Mutex<HashMap<String, V>>,
    deletes: AtomicUsize,
}

impl<V: Clone> MemoryStore<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            deletes: AtomicUsize::new(0),
        }
    }

    /// Read an entry without going through the async trait.
    pub fn peek(&self, key: &str) -> Option<V> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Seed an entry directly.
    pub fn insert(&self, key: &str, value: V) {
        self.entries.lock().unwrap().insert(key.to_owned(), value);
    }

    /// Number of `delete` calls received, whether or not the key existed.
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

impl<V: Clone> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<V> CacheStore<V> for MemoryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        self.peek(key)
    }

    async fn set(&self, key: &str, value: V) {
        self.insert(key, value);
    }

    async fn delete(&self, key: &str) {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().remove(key);
    }
}
