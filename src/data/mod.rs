// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything from area directories on disk to tensor batches.
//
//   <root>/<area>/{demos,pois,dis,od}.npy
//       │
//       ▼
//   NpyAreaLoader            → reads the four arrays of an area
//       │  (AreaCache)       → optional LRU in front of the loader
//       ▼
//   PairwiseFeatureBuilder   → (N, N, 2F+1) tensor per area
//       │
//       ├──▶ WholeAreaSampleIndex      one sample per area, built on access
//       │
//       └──▶ FlattenedPairSampleIndex  one sample per (i, j), built up front
//               │
//               ▼
//   AreaBatcher / PairBatcher → tensor batches for Burn's DataLoader
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads per-area .npy arrays from a root directory
pub mod loader;

/// Optional LRU cache in front of any AreaSource
pub mod cache;

/// AreaSource backed by arrays already in memory
pub mod memory;

/// Broadcast expansion into the pairwise feature tensor
pub mod features;

/// One sample per area, evaluated lazily
pub mod area_dataset;

/// One sample per ordered location pair, evaluated eagerly
pub mod pair_dataset;

/// Burn Batcher implementations for both sample kinds
pub mod batcher;

/// Seeded train/validation split over area identifiers
pub mod splitter;
