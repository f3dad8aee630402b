//! Garbage-collection lottery draw.

use arbor_core::Lottery;
use rand::Rng;

/// Draw the lottery: a uniform integer in `[1, denominator]` fires when
/// it lands at or below the numerator.
///
/// The generator is injected so outcomes are deterministic under a seeded
/// RNG in tests; no cryptographic strength is required.
pub fn hits<R: Rng>(odds: &Lottery, rng: &mut R) -> bool {
    rng.gen_range(1..=odds.denominator()) <= odds.numerator()
}
