// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust types and traits that describe an area dataset:
// the four arrays of one area, the per-location feature mode,
// the error taxonomy, and the AreaSource abstraction that the
// data layer implements.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// The four arrays of one area and their shape checks
pub mod area;

// Full vs reduced per-location features
pub mod feature_mode;

// Typed error taxonomy shared by every layer
pub mod errors;

// Core abstractions (traits) that other layers implement
pub mod traits;
