// ============================================================
// Layer 4 - Train/Validation Area Splitter
// ============================================================
// Shuffles area identifiers and splits them into a training
// list and a validation list, before any index is built.
//
// Areas are the split unit, not pairs: every pair sample of an
// area lands on the same side, so validation never sees pairs
// from an area the model trained on.
//
// The shuffle is seeded so the same seed always produces the
// same split.
//
// Reference: rand crate documentation (SliceRandom, StdRng)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `areas` with `seed` and split into (train, validation).
///
/// `train_fraction` is clamped to [0, 1]; the split index is rounded.
pub fn split_areas<T>(mut areas: Vec<T>, train_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    areas.shuffle(&mut rng);

    let total    = areas.len();
    let fraction = train_fraction.clamp(0.0, 1.0);
    let split_at = ((total as f64) * fraction).round() as usize;
    let split_at = split_at.min(total);

    let val = areas.split_off(split_at);

    tracing::debug!(
        "Area split (seed {}): {} training, {} validation",
        seed,
        areas.len(),
        val.len(),
    );

    (areas, val)
}
