//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use showreel_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Suitable for tests that do not depend on specific random values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that replays predetermined values, wrapping around when a sequence
/// is exhausted. Integer draws are clamped into the requested range so the
/// same script can drive callers with different bounds.
#[derive(Debug)]
pub struct SequenceRng {
    integers: Vec<u32>,
    fractions: Vec<f64>,
    integer_index: usize,
    fraction_index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` replaying both integer and fractional
    /// draws.
    #[must_use]
    pub fn with_fractions(integers: Vec<u32>, fractions: Vec<f64>) -> Self {
        Self {
            integers,
            fractions,
            integer_index: 0,
            fraction_index: 0,
        }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if self.integers.is_empty() {
            return min;
        }
        let value = self.integers[self.integer_index % self.integers.len()];
        self.integer_index += 1;
        value.clamp(min, max.max(min))
    }

    fn next_f64(&mut self) -> f64 {
        if self.fractions.is_empty() {
            return 0.0;
        }
        let value = self.fractions[self.fraction_index % self.fractions.len()];
        self.fraction_index += 1;
        value
    }
}
