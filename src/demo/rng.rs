//! Deterministic LCG for the perf runner's random tiles.

#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would stay at the increment forever.
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        // Numerical Recipes constants.
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`.
    pub fn next_below(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 8) % max
    }
}
