//! In-memory store of scan results keyed by activity type.
//!
//! Entries live until overwritten; there is no eviction or expiry. Deciding
//! when a panel changed enough to rescan is up to the caller.

use crate::types::FieldMapping;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Activity type → field mappings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingCache {
    entries: HashMap<String, Vec<FieldMapping>>,
}

impl MappingCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was stored under `activity_type`
    pub fn store(&mut self, activity_type: impl Into<String>, mappings: Vec<FieldMapping>) {
        self.entries.insert(activity_type.into(), mappings);
    }

    /// Stored mappings, or `None` on a miss
    #[must_use]
    pub fn get(&self, activity_type: &str) -> Option<&[FieldMapping]> {
        self.entries.get(activity_type).map(Vec::as_slice)
    }

    /// Copy of every entry; changing it does not touch the cache
    #[must_use]
    pub fn list_all(&self) -> HashMap<String, Vec<FieldMapping>> {
        self.entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static GLOBAL_CACHE: Lazy<Mutex<MappingCache>> = Lazy::new(|| Mutex::new(MappingCache::new()));

fn global() -> MutexGuard<'static, MappingCache> {
    GLOBAL_CACHE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Store mappings in the process-wide cache
pub fn cache_field_mappings(activity_type: impl Into<String>, mappings: Vec<FieldMapping>) {
    global().store(activity_type, mappings);
}

/// Fetch from the process-wide cache
#[must_use]
pub fn cached_field_mappings(activity_type: &str) -> Option<Vec<FieldMapping>> {
    global().get(activity_type).map(<[FieldMapping]>::to_vec)
}

/// Snapshot of the whole process-wide cache
#[must_use]
pub fn all_cached_mappings() -> HashMap<String, Vec<FieldMapping>> {
    global().list_all()
}
