use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{
    classification::{ports::ClassificationCache, value_objects::Fingerprint},
    common::entities::app_errors::CoreError,
};

type Gate = Arc<tokio::sync::Mutex<()>>;

/// Keyed single-flight guard in front of a [`ClassificationCache`].
///
/// Concurrent callers asking for the same key queue on one gate; the first
/// computes and stores, the rest find the value on their second lookup.
/// Failed computations store nothing, so the next caller retries.
#[derive(Debug, Default)]
pub struct FlightGroup {
    gates: Mutex<HashMap<Fingerprint, Gate>>,
}

impl FlightGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_compute<T, S, F, Fut>(
        &self,
        cache: &S,
        key: Fingerprint,
        compute: F,
    ) -> Result<T, CoreError>
    where
        T: Clone + Send + Sync + 'static,
        S: ClassificationCache<T> + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        if let Some(hit) = cache.get(&key) {
            tracing::debug!(key = %key, "cache hit");
            return Ok(hit);
        }

        let lease = self.lease(key);
        let _guard = lease.gate.lock().await;

        if let Some(hit) = cache.get(&lease.key) {
            tracing::debug!(key = %lease.key, "cache filled while waiting");
            return Ok(hit);
        }

        let value = compute().await?;
        cache.put(lease.key.clone(), value.clone());

        Ok(value)
    }

    /// Number of keys currently being computed or waited on.
    pub fn in_flight(&self) -> usize {
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn lease(&self, key: Fingerprint) -> Lease<'_> {
        let gate = self
            .gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_default()
            .clone();

        Lease {
            group: self,
            key,
            gate,
        }
    }
}

struct Lease<'a> {
    group: &'a FlightGroup,
    key: Fingerprint,
    gate: Gate,
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        let mut gates = self
            .group
            .gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // The map holds one reference and this lease another; anything above
        // that is a waiter that still needs the gate.
        let idle = gates
            .get(&self.key)
            .is_some_and(|gate| Arc::ptr_eq(gate, &self.gate) && Arc::strong_count(gate) == 2);
        if idle {
            gates.remove(&self.key);
        }
    }
}
