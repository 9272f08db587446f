//! Deterministic random source shared by every random draw in a run.
//!
//! One generator is seeded when the [`Game`](crate::game::Game) is built and
//! handed to scenes through the tick context, so rapid successive draws (two
//! flee attempts in consecutive frames, say) never come from freshly reseeded
//! sources.

// RNG math uses intentional casts
#![allow(clippy::cast_possible_truncation)]

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Create an RNG seeded from the wall clock.
    #[must_use]
    pub fn from_entropy() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::new(seed)
    }

    /// Generate next random u64.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random u32 in [0, max).
    pub fn next_u32(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u32
    }

    /// Return `true` with probability `numerator / denominator`.
    ///
    /// A zero denominator never succeeds.
    pub fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        denominator != 0 && self.next_u32(denominator) < numerator
    }
}
