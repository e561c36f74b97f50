// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting concerns that do not belong to the dataset
// logic itself:
//
//   config_store.rs - saves and loads DatasetConfig as JSON so
//                     the exact area list and feature mode of a
//                     run can be reproduced later.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// DatasetConfig persistence
pub mod config_store;
