//! Wraparound coordinate arithmetic.
//!
//! The grid is a torus: stepping off one edge lands on the opposite edge.
//! A coordinate on an axis with upper bound `b` lives in `[0, b]`, and every
//! step is reduced modulo `b + 1` with a Euclidean remainder so negative
//! offsets wrap to the far side instead of going negative.

/// Move `coord` by `delta` cells on an axis whose largest valid coordinate
/// is `bound`, wrapping around the edges.
///
/// The result always satisfies `0 <= result <= bound`.
pub fn wrap_step(coord: u32, delta: i64, bound: u32) -> u32 {
    let extent = i64::from(bound).saturating_add(1);
    let wrapped = i64::from(coord).wrapping_add(delta).rem_euclid(extent);
    // 0 <= wrapped < extent <= u32::MAX + 1, so the conversion always fits.
    u32::try_from(wrapped).unwrap_or(0)
}
