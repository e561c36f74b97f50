// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The sample indices in the data layer never touch the file
// system directly; they ask an AreaSource for the arrays of an
// area. This lets the same indices run over:
//   - NpyAreaLoader → reads <root>/<area>/{demos,pois,dis,od}.npy
//   - AreaCache     → an LRU decorator around another source
//   - in-memory sources in unit tests
//
// Send + Sync is required because Burn's Dataset trait is
// Send + Sync and the indices own their source.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::area::AreaArrays;
use crate::domain::errors::DatasetResult;

// ─── AreaSource ───────────────────────────────────────────────────────────────
/// Anything that can produce the four arrays of an area by identifier.
///
/// Implementations must be idempotent: loading the same area twice
/// yields equal arrays.
pub trait AreaSource: Send + Sync {
    fn load(&self, area: &str) -> DatasetResult<AreaArrays>;
}

impl<S: AreaSource + ?Sized> AreaSource for Box<S> {
    fn load(&self, area: &str) -> DatasetResult<AreaArrays> {
        (**self).load(area)
    }
}

impl<S: AreaSource + ?Sized> AreaSource for std::sync::Arc<S> {
    fn load(&self, area: &str) -> DatasetResult<AreaArrays> {
        (**self).load(area)
    }
}
