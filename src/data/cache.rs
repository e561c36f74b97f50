// ============================================================
// Layer 4 - Area Cache
// ============================================================
// Optional LRU decorator around any AreaSource.
//
// The whole-area index reloads an area from disk on every
// access. For small datasets that are iterated for many
// epochs this is wasted I/O, so an AreaCache can hold the
// most recently used areas in memory:
//
//   capacity = 0  → pass-through, nothing is kept (default)
//   capacity = k  → at most k areas resident, least recently
//                   used evicted first
//
// Entries are keyed by area identifier. The state sits behind
// a Mutex so the cache stays Sync for Burn's Dataset bound.
//
// Reference: Rust Book §8 (Hash Maps), §16 (Shared-State Concurrency)

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::domain::area::AreaArrays;
use crate::domain::errors::DatasetResult;
use crate::domain::traits::AreaSource;

pub struct AreaCache<S> {
    inner:    S,
    capacity: usize,
    state:    Mutex<LruState>,
}

#[derive(Default)]
struct LruState {
    entries: HashMap<String, AreaArrays>,
    /// Front = least recently used
    order:   VecDeque<String>,
}

impl LruState {
    fn touch(&mut self, area: &str) {
        if let Some(pos) = self.order.iter().position(|a| a == area) {
            if let Some(key) = self.order.remove(pos) {
                self.order.push_back(key);
            }
        }
    }
}

impl<S: AreaSource> AreaCache<S> {
    pub fn new(inner: S, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            state: Mutex::new(LruState::default()),
        }
    }

    /// A cache that never holds anything
    pub fn disabled(inner: S) -> Self {
        Self::new(inner, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of areas currently resident
    pub fn resident(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
    }

    fn lock(&self) -> MutexGuard<'_, LruState> {
        // a poisoned lock can at worst be missing an entry
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: AreaSource> AreaSource for AreaCache<S> {
    fn load(&self, area: &str) -> DatasetResult<AreaArrays> {
        if !self.is_enabled() {
            return self.inner.load(area);
        }

        {
            let mut state = self.lock();
            if let Some(hit) = state.entries.get(area).cloned() {
                state.touch(area);
                tracing::trace!("Area cache hit: '{}'", area);
                return Ok(hit);
            }
        }

        // Load outside the lock; errors are never cached
        let arrays = self.inner.load(area)?;

        let mut state = self.lock();
        if !state.entries.contains_key(area) {
            state.order.push_back(area.to_string());
        }
        state.entries.insert(area.to_string(), arrays.clone());
        state.touch(area);

        while state.entries.len() > self.capacity {
            match state.order.pop_front() {
                Some(evicted) => {
                    state.entries.remove(&evicted);
                    tracing::debug!("Area cache evicted '{}'", evicted);
                }
                None => break,
            }
        }

        Ok(arrays)
    }
}
