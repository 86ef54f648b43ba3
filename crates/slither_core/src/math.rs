//! Deterministic math utilities

/// Seeded pseudo-random generator. The same seed always produces the same
/// sequence, so candy placement is reproducible across runs.
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    seed: u64,
    state: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, state: seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next value of a 32-bit LCG (Numerical Recipes constants).
    ///
    /// Low bits of a power-of-two LCG cycle with short periods (bit 0 simply
    /// alternates), so callers needing a small range should use
    /// [`next_below`](Self::next_below), which only keeps the high bits.
    pub fn next_u32(&mut self) -> u32 {
        const A: u64 = 1664525;
        const C: u64 = 1013904223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        self.state as u32
    }

    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// Value in `0..bound`; `0` when `bound` is zero.
    ///
    /// Multiply-shift maps the full 32-bit output onto the range, so the
    /// result is decided by the top bits, which have the full 2^32 period.
    /// The bias is below `bound / 2^32`, far under one cell for an arena grid.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        ((self.next_u32() as u64 * bound as u64) >> 32) as u32
    }
}
