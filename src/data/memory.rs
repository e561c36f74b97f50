// ============================================================
// Layer 4 - In-Memory Area Source
// ============================================================
// An AreaSource backed by a map of already-built arrays.
// Used for synthetic datasets and in tests, where writing
// .npy files to disk would only add noise.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::domain::area::AreaArrays;
use crate::domain::errors::{DatasetError, DatasetResult};
use crate::domain::traits::AreaSource;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAreaSource {
    areas: HashMap<String, AreaArrays>,
}

impl InMemoryAreaSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_area(mut self, name: impl Into<String>, arrays: AreaArrays) -> Self {
        self.insert(name, arrays);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, arrays: AreaArrays) {
        self.areas.insert(name.into(), arrays);
    }
}

impl AreaSource for InMemoryAreaSource {
    fn load(&self, area: &str) -> DatasetResult<AreaArrays> {
        self.areas
            .get(area)
            .cloned()
            .ok_or_else(|| DatasetError::StorageNotFound { path: PathBuf::from(area) })
    }
}
