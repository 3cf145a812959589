//! Process-wide country snapshot with single-flight loading.
//!
//! The cache moves through three states:
//!
//! ```text
//!            first caller                 fetch ok
//!  Empty ─────────────────────► Loading ───────────► Loaded (terminal)
//!    ▲                             │
//!    └─────────── fetch failed ────┘
//! ```
//!
//! While `Loading`, every caller awaits a clone of the same shared fetch
//! future and observes its outcome, success or failure. A failure leaves the
//! cache `Empty`, so the next caller starts a fresh fetch. There is no backoff
//! and no retry limit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::snapshot::Snapshot;
use crate::source::DatasetSource;

type LoadOutcome = Result<Arc<Snapshot>, FetchError>;
type PendingLoad = Shared<BoxFuture<'static, LoadOutcome>>;

enum CacheState {
    Empty,
    Loading {
        generation: u64,
        pending: PendingLoad,
    },
    Loaded(Arc<Snapshot>),
}

/// Counters describing how the cache has been used so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Upstream fetches started.
    pub fetches: u64,
    /// Upstream fetches that failed (including empty payloads).
    pub failures: u64,
    /// Callers that attached to an already in-flight fetch.
    pub joined: u64,
    /// Callers served from the loaded snapshot.
    pub hits: u64,
}

#[derive(Debug, Default)]
struct StatCounters {
    fetches: AtomicU64,
    failures: AtomicU64,
    joined: AtomicU64,
    hits: AtomicU64,
}

/// Holds the country snapshot for the lifetime of the process.
pub struct DatasetCache {
    source: Arc<dyn DatasetSource>,
    state: Mutex<CacheState>,
    next_generation: AtomicU64,
    stats: Arc<StatCounters>,
}

impl DatasetCache {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            source,
            state: Mutex::new(CacheState::Empty),
            next_generation: AtomicU64::new(1),
            stats: Arc::new(StatCounters::default()),
        }
    }

    /// Return the snapshot, fetching it first if no snapshot is cached.
    ///
    /// Concurrent callers share one in-flight fetch and all receive its
    /// result. A failed fetch is not cached.
    pub async fn ensure_loaded(&self) -> Result<Arc<Snapshot>, FetchError> {
        let (generation, pending) = {
            let mut state = self.lock_state();
            match &*state {
                CacheState::Loaded(snapshot) => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(Arc::clone(snapshot));
                }
                CacheState::Loading {
                    generation,
                    pending,
                } => {
                    self.stats.joined.fetch_add(1, Ordering::Relaxed);
                    debug!(generation, "joining in-flight dataset fetch");
                    (*generation, pending.clone())
                }
                CacheState::Empty => {
                    let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                    let pending = self.start_fetch(generation);
                    *state = CacheState::Loading {
                        generation,
                        pending: pending.clone(),
                    };
                    (generation, pending)
                }
            }
        };

        let outcome = pending.await;
        self.settle(generation, &outcome);
        outcome
    }

    /// The loaded snapshot, if any. Never triggers a fetch.
    pub fn cached(&self) -> Option<Arc<Snapshot>> {
        match &*self.lock_state() {
            CacheState::Loaded(snapshot) => Some(Arc::clone(snapshot)),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(&*self.lock_state(), CacheState::Loaded(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(&*self.lock_state(), CacheState::Loading { .. })
    }

    pub fn stats(&self) -> FetchStats {
        FetchStats {
            fetches: self.stats.fetches.load(Ordering::Relaxed),
            failures: self.stats.failures.load(Ordering::Relaxed),
            joined: self.stats.joined.load(Ordering::Relaxed),
            hits: self.stats.hits.load(Ordering::Relaxed),
        }
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        // The state is only ever replaced wholesale, so a poisoned guard is
        // still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_fetch(&self, generation: u64) -> PendingLoad {
        let source = Arc::clone(&self.source);
        let stats = Arc::clone(&self.stats);

        async move {
            stats.fetches.fetch_add(1, Ordering::Relaxed);
            let description = source.describe();
            info!(source = %description, generation, "fetching country dataset");
            let started = Instant::now();

            let outcome = match source.fetch().await {
                Ok(countries) if countries.is_empty() => Err(FetchError::EmptyDataset),
                Ok(countries) => Ok(Arc::new(Snapshot::new(countries))),
                Err(error) => Err(error),
            };

            match &outcome {
                Ok(snapshot) => info!(
                    countries = snapshot.len(),
                    borders = snapshot.graph().edge_count(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "country dataset loaded"
                ),
                Err(error) => {
                    stats.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        %error,
                        source = %description,
                        generation,
                        "failed to load country dataset; next request will retry"
                    );
                }
            }

            outcome
        }
        .boxed()
        .shared()
    }

    /// Record the outcome of fetch `generation`, unless the state has already
    /// moved on (another waiter settled it, or a newer fetch started).
    fn settle(&self, generation: u64, outcome: &LoadOutcome) {
        let mut state = self.lock_state();
        let current = match &*state {
            CacheState::Loading { generation, .. } => *generation,
            _ => return,
        };
        if current != generation {
            return;
        }

        *state = match outcome {
            Ok(snapshot) => CacheState::Loaded(Arc::clone(snapshot)),
            Err(_) => CacheState::Empty,
        };
    }
}

impl std::fmt::Debug for DatasetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.lock_state() {
            CacheState::Empty => "empty",
            CacheState::Loading { .. } => "loading",
            CacheState::Loaded(_) => "loaded",
        };
        f.debug_struct("DatasetCache")
            .field("source", &self.source.describe())
            .field("state", &state)
            .finish()
    }
}
