//! Bounded, request-deduplicating memo in front of the geocoder.

use crate::domain::Geocoder;
use crate::domain::entities::{GeoCoordinate, PostalCode};
use crate::error::LookupError;
use futures::future::{BoxFuture, FutureExt, Shared};
use lru::LruCache;
use metrics::counter;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error};

type LookupOutcome = Result<Option<GeoCoordinate>, LookupError>;
type PendingLookup = Shared<BoxFuture<'static, LookupOutcome>>;

type Entries = Arc<Mutex<LruCache<PostalCode, Option<GeoCoordinate>>>>;
type InFlight = Arc<Mutex<HashMap<PostalCode, PendingLookup>>>;

/// Locks a mutex, recovering the data if a previous holder panicked.
///
/// Neither map is left half-updated by a panic: every critical section is a
/// single `get`/`put`/`insert`/`remove`.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-lifetime cache of geocoding results.
///
/// - Hits, including confirmed misses (`None`), never touch the network.
/// - At most one upstream request per postal code is outstanding; concurrent
///   callers for the same code await that request and see the same outcome.
/// - Requests for different codes run independently.
/// - Upstream errors are returned to every waiting caller but not cached.
/// - Once `capacity` entries are stored, inserting evicts the least recently
///   used one.
///
/// The upstream call runs on its own task, so a caller that stops waiting
/// (client disconnect) does not cancel it; the result still lands in the
/// cache for later callers.
pub struct GeocodeCache {
    geocoder: Arc<dyn Geocoder>,
    entries: Entries,
    in_flight: InFlight,
}

impl GeocodeCache {
    /// Creates an empty cache holding at most `capacity` postal codes.
    pub fn new(geocoder: Arc<dyn Geocoder>, capacity: NonZeroUsize) -> Self {
        debug!("Geocode cache capacity: {}", capacity);
        Self {
            geocoder,
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Resolves `code` to a coordinate, consulting the cache first.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(coordinate))` if the provider knows the code
    /// - `Ok(None)` if the provider confirmed it has no match
    ///
    /// # Errors
    ///
    /// Upstream failures from the [`Geocoder`], unchanged. A fetch task that
    /// panics is reported as [`LookupError::UpstreamUnexpected`].
    pub async fn resolve(&self, code: &PostalCode) -> LookupOutcome {
        if let Some(hit) = self.cached(code) {
            return Ok(hit);
        }

        let pending = {
            let mut in_flight = lock(&self.in_flight);

            // A fetch may have completed between the first check and taking
            // the in-flight lock; its result is in the cache by now.
            if let Some(hit) = self.cached(code) {
                return Ok(hit);
            }

            match in_flight.get(code) {
                Some(pending) => {
                    debug!(plz = %code, "Joining in-flight geocode request");
                    pending.clone()
                }
                None => {
                    counter!("geocode_cache_misses_total").increment(1);
                    debug!(plz = %code, "Geocode cache MISS");
                    let pending = self.spawn_fetch(code.clone());
                    in_flight.insert(code.clone(), pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    /// Number of postal codes currently cached.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        lock(&self.entries).cap().get()
    }

    fn cached(&self, code: &PostalCode) -> Option<Option<GeoCoordinate>> {
        let hit = lock(&self.entries).get(code).copied();
        if hit.is_some() {
            counter!("geocode_cache_hits_total").increment(1);
            debug!(plz = %code, "Geocode cache HIT");
        }
        hit
    }

    /// Starts the upstream request for `code` on a detached task.
    ///
    /// Must be called with the in-flight lock held so the task cannot remove
    /// its entry before the caller has inserted it.
    fn spawn_fetch(&self, code: PostalCode) -> PendingLookup {
        let geocoder = Arc::clone(&self.geocoder);
        let entries = Arc::clone(&self.entries);
        let in_flight = Arc::clone(&self.in_flight);

        let task_code = code.clone();
        let task_in_flight = Arc::clone(&in_flight);
        let handle = tokio::spawn(async move {
            counter!("geocode_upstream_requests_total").increment(1);
            let outcome = geocoder.geocode(&task_code).await;

            // Cache first, then retire the in-flight entry: a caller that
            // misses the in-flight table is then guaranteed to hit the cache.
            if let Ok(value) = &outcome {
                lock(&entries).put(task_code.clone(), *value);
            }
            lock(&task_in_flight).remove(&task_code);

            outcome
        });

        async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(plz = %code, error = %e, "Geocode task failed");
                    lock(&in_flight).remove(&code);
                    Err(LookupError::UpstreamUnexpected)
                }
            }
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::normalize;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Geocoder that counts calls and answers after an optional delay.
    struct CountingGeocoder {
        calls: AtomicUsize,
        delay: Duration,
        outcome: LookupOutcome,
    }

    impl CountingGeocoder {
        fn new(outcome: LookupOutcome, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay,
                outcome,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, _code: &PostalCode) -> LookupOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.outcome.clone()
        }
    }

    fn darmstadt() -> GeoCoordinate {
        GeoCoordinate::new(49.8728, 8.6512)
    }

    fn cache_with(geocoder: Arc<CountingGeocoder>, capacity: usize) -> GeocodeCache {
        GeocodeCache::new(geocoder, NonZeroUsize::new(capacity).unwrap())
    }

    #[tokio::test]
    async fn test_resolve_twice_calls_upstream_once() {
        let geocoder = CountingGeocoder::new(Ok(Some(darmstadt())), Duration::ZERO);
        let cache = cache_with(geocoder.clone(), 16);
        let code = normalize("64283").unwrap();

        let first = cache.resolve(&code).await.unwrap();
        let second = cache.resolve(&code).await.unwrap();

        assert_eq!(first, Some(darmstadt()));
        assert_eq!(first, second);
        assert_eq!(geocoder.calls(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_negative_result_is_cached() {
        let geocoder = CountingGeocoder::new(Ok(None), Duration::ZERO);
        let cache = cache_with(geocoder.clone(), 16);
        let code = normalize("00000").unwrap();

        assert_eq!(cache.resolve(&code).await.unwrap(), None);
        assert_eq!(cache.resolve(&code).await.unwrap(), None);
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let geocoder = CountingGeocoder::new(Err(LookupError::UpstreamTimeout), Duration::ZERO);
        let cache = cache_with(geocoder.clone(), 16);
        let code = normalize("64283").unwrap();

        assert_eq!(
            cache.resolve(&code).await.unwrap_err(),
            LookupError::UpstreamTimeout
        );
        assert_eq!(
            cache.resolve(&code).await.unwrap_err(),
            LookupError::UpstreamTimeout
        );
        assert_eq!(geocoder.calls(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_misses_share_one_request() {
        let geocoder = CountingGeocoder::new(Ok(Some(darmstadt())), Duration::from_millis(100));
        let cache = Arc::new(cache_with(geocoder.clone(), 16));
        let code = normalize("64283").unwrap();

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let code = code.clone();
                tokio::spawn(async move { cache.resolve(&code).await })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), Some(darmstadt()));
        }
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_share_error() {
        let geocoder =
            CountingGeocoder::new(Err(LookupError::UpstreamUnavailable), Duration::from_millis(100));
        let cache = Arc::new(cache_with(geocoder.clone(), 16));
        let code = normalize("64283").unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let code = code.clone();
                tokio::spawn(async move { cache.resolve(&code).await })
            })
            .collect();

        for task in tasks {
            assert_eq!(
                task.await.unwrap().unwrap_err(),
                LookupError::UpstreamUnavailable
            );
        }
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_different_keys_do_not_wait_on_each_other() {
        let geocoder = CountingGeocoder::new(Ok(Some(darmstadt())), Duration::from_millis(200));
        let cache = Arc::new(cache_with(geocoder.clone(), 16));

        let darmstadt_code = normalize("64283").unwrap();
        let berlin_code = normalize("10115").unwrap();

        let started = std::time::Instant::now();
        let (a, b) = tokio::join!(cache.resolve(&darmstadt_code), cache.resolve(&berlin_code));

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(geocoder.calls(), 2);
        assert!(started.elapsed() < Duration::from_millis(390));
    }

    #[tokio::test]
    async fn test_abandoned_caller_still_populates_cache() {
        let geocoder = CountingGeocoder::new(Ok(Some(darmstadt())), Duration::from_millis(50));
        let cache = cache_with(geocoder.clone(), 16);
        let code = normalize("64283").unwrap();

        let abandoned =
            tokio::time::timeout(Duration::from_millis(5), cache.resolve(&code)).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.resolve(&code).await.unwrap(), Some(darmstadt()));
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn test_evicts_least_recently_used() {
        let geocoder = CountingGeocoder::new(Ok(Some(darmstadt())), Duration::ZERO);
        let cache = cache_with(geocoder.clone(), 2);
        let a = normalize("11111").unwrap();
        let b = normalize("22222").unwrap();
        let c = normalize("33333").unwrap();

        cache.resolve(&a).await.unwrap();
        cache.resolve(&b).await.unwrap();
        // Touch `a` so `b` becomes the eviction candidate.
        cache.resolve(&a).await.unwrap();
        cache.resolve(&c).await.unwrap();
        assert_eq!(geocoder.calls(), 3);
        assert_eq!(cache.len(), 2);

        cache.resolve(&a).await.unwrap();
        assert_eq!(geocoder.calls(), 3);

        cache.resolve(&b).await.unwrap();
        assert_eq!(geocoder.calls(), 4);
    }

    #[tokio::test]
    async fn test_capacity_reported() {
        let geocoder = CountingGeocoder::new(Ok(None), Duration::ZERO);
        let cache = cache_with(geocoder, 2048);
        assert_eq!(cache.capacity(), 2048);
        assert!(cache.is_empty());
    }
}
