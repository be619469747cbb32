//! Seeded randomness shared by generation, splitting and fitting.

use oorandom::Rand64;

/// Deterministic random source; the same seed gives the same stream.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: Rand64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Rand64::new(u128::from(seed)),
        }
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        self.inner.rand_range(0..n as u64) as usize
    }

    /// Uniform integer in `lo..=hi`.
    pub fn between(&mut self, lo: u32, hi: u32) -> u32 {
        lo + self.inner.rand_range(0..u64::from(hi - lo + 1)) as u32
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.inner.rand_float() < p
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.rand_float()
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}
