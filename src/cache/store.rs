use anyhow::Result;
use chrono::Local;
use tracing::{debug, warn};

use super::slot::CacheSlot;
use super::types::CacheEntry;
use crate::constants::CACHE_CAPACITY;
use crate::predictor::{PredictionInput, PredictionResult};

/// Bounded store of recent predictions, newest first.
///
/// Holds at most [`CACHE_CAPACITY`] entries; inserting past capacity evicts
/// the oldest. Entries never expire by time. Persisted through a [`CacheSlot`]
/// when one is attached; persistence failures are logged and swallowed so a
/// full disk never breaks a prediction.
#[derive(Debug)]
pub struct PredictionCache {
    entries: Vec<CacheEntry>,
    capacity: usize,
    slot: Option<CacheSlot>,
}

impl PredictionCache {
    /// Cache backed by the default on-disk slot, primed with its contents
    pub fn open_default() -> Result<Self> {
        let slot = CacheSlot::default_location()?;
        Ok(Self::with_slot(slot))
    }

    /// Cache backed by an explicit slot
    pub fn with_slot(slot: CacheSlot) -> Self {
        let mut entries = slot.load();
        entries.truncate(CACHE_CAPACITY);
        Self {
            entries,
            capacity: CACHE_CAPACITY,
            slot: Some(slot),
        }
    }

    /// Purely in-memory cache (tests, `--no-cache`)
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            capacity: CACHE_CAPACITY,
            slot: None,
        }
    }

    /// Find the most recently stored results for an identical input.
    /// Inputs match only on full structural equality of every field.
    pub fn lookup(&self, input: &PredictionInput) -> Option<&PredictionResult> {
        self.entries
            .iter()
            .find(|entry| &entry.input == input)
            .map(|entry| {
                debug!("cache hit for rank={} place={}", input.rank, input.place);
                &entry.results
            })
    }

    /// Prepend a new entry, evicting the oldest once past capacity.
    ///
    /// Always prepends: storing the same input twice leaves both entries in
    /// the list, and `lookup` resolves to the newer one. This mirrors the
    /// behavior the cache has always had; dedup-in-place would only change
    /// eviction pressure for repeat queries.
    pub fn store(&mut self, input: PredictionInput, results: PredictionResult) {
        self.entries.insert(
            0,
            CacheEntry {
                input,
                results,
                cached_at: Local::now(),
            },
        );
        if self.entries.len() > self.capacity {
            self.entries.truncate(self.capacity);
        }
        self.persist();
    }

    /// Drop every entry and the backing file
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        if let Some(slot) = &self.slot {
            slot.clear()?;
        }
        Ok(())
    }

    /// Entries in insertion order, newest first (for `counselor cache`)
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        if let Some(slot) = &self.slot {
            if let Err(e) = slot.save(&self.entries) {
                warn!("failed to persist prediction cache: {e}");
            }
        }
    }
}
