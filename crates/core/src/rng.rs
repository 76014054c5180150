//! RNG module - injectable randomness for spawning
//!
//! The game only ever needs "a uniform integer below `max`", so that is the
//! whole [`RandomSource`] contract. Two sources are provided:
//!
//! - [`SimpleRng`]: seeded LCG, the default for real games and benchmarks
//! - [`ScriptedRng`]: replays a fixed list of values so tests can pin exact
//!   spawn cells and directions

/// A source of uniform random integers.
pub trait RandomSource {
    /// Uniform value in `[0, max)`. `max` is always at least 1.
    fn next_below(&mut self, max: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, max: u32) -> u32 {
        (**self).next_below(max)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, max: u32) -> u32 {
        // Scale by the high bits; the low bits of an LCG cycle with a tiny period,
        // which would correlate consecutive x/y draws.
        ((self.next_u32() as u64 * max.max(1) as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Each draw returns `value % max`, so a script can be written directly in
/// grid coordinates and direction indices.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    values: Vec<u32>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedRng {
    fn next_below(&mut self, max: u32) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % max.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_below_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for max in [1u32, 2, 3, 30, 1000] {
            for _ in 0..200 {
                assert!(rng.next_below(max) < max);
            }
        }
    }

    #[test]
    fn test_next_below_reaches_every_cell_parity() {
        // Consecutive draws must not be locked to alternating parity.
        let mut rng = SimpleRng::new(99);
        let mut seen = [[false; 2]; 2];
        for _ in 0..200 {
            let x = rng.next_below(30) as usize;
            let y = rng.next_below(30) as usize;
            seen[x % 2][y % 2] = true;
        }
        assert!(seen.iter().flatten().all(|&s| s));
    }

    #[test]
    fn test_scripted_rng_cycles() {
        let mut rng = ScriptedRng::new(vec![4, 31, 2]);
        assert_eq!(rng.next_below(30), 4);
        assert_eq!(rng.next_below(30), 1);
        assert_eq!(rng.next_below(30), 2);
        assert_eq!(rng.next_below(30), 4);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_scripted_rng_empty_yields_zero() {
        let mut rng = ScriptedRng::default();
        assert_eq!(rng.next_below(10), 0);
    }
}
