//! Keyed single-flight execution.
//!
//! Concurrent callers with the same key share one in-flight operation. The
//! map entry itself marks the flight; it is removed by whichever caller
//! observes completion first, and only if it still points at the same flight.

use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::debug;

use bazaar_core::error::AppError;

type Flight<T> = Shared<BoxFuture<'static, Result<T, AppError>>>;

/// Coalesces concurrent operations that share a key.
pub struct RefreshCoalescer<K, T>
where
    K: Eq + Hash,
{
    flights: Arc<DashMap<K, Flight<T>>>,
}

impl<K, T> Clone for RefreshCoalescer<K, T>
where
    K: Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            flights: Arc::clone(&self.flights),
        }
    }
}

impl<K, T> fmt::Debug for RefreshCoalescer<K, T>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshCoalescer")
            .field("in_flight", &self.flights.len())
            .finish()
    }
}

impl<K, T> Default for RefreshCoalescer<K, T>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            flights: Arc::new(DashMap::new()),
        }
    }
}

impl<K, T> RefreshCoalescer<K, T>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates an empty coalescer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations currently in flight.
    pub fn in_flight(&self) -> usize {
        self.flights.len()
    }

    /// Runs `op` for `key`, or joins the flight already running for it.
    ///
    /// `op` is only invoked when no flight exists. Every joined caller sees
    /// the same result, errors included.
    pub async fn run<F, Fut>(&self, key: K, op: F) -> Result<T, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        let flight = match self.flights.entry(key.clone()) {
            Entry::Occupied(entry) => {
                debug!(key = ?key, "Joining in-flight operation");
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let flight = op().boxed().shared();
                entry.insert(flight.clone());
                flight
            }
        };

        let result = flight.clone().await;
        self.flights
            .remove_if(&key, |_, current| current.ptr_eq(&flight));
        result
    }
}
