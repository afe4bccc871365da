//! Decorative background particles.
//!
//! Positions and timings are random, but drawn from an injected
//! `DeterministicRng` so a seeded generator reproduces the same field.

use serde::Serialize;
use showreel_core::rng::DeterministicRng;

const MIN_SIZE_PX: u32 = 1;
const MAX_SIZE_PX: u32 = 4;
const MIN_DRIFT_MS: u32 = 3000;
const MAX_DRIFT_MS: u32 = 8000;
const MAX_DELAY_MS: u32 = 2000;
const MIN_OPACITY: f64 = 0.2;
const OPACITY_SPAN: f64 = 0.6;

/// One floating dot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    /// Horizontal position, percent of the viewport width.
    pub x_percent: f64,
    /// Vertical position, percent of the viewport height.
    pub y_percent: f64,
    /// Diameter in pixels.
    pub size_px: u32,
    /// Length of one drift cycle.
    pub drift_ms: u32,
    /// Delay before the first cycle.
    pub delay_ms: u32,
    /// Peak opacity.
    pub opacity: f64,
}

/// A fixed set of particles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Draws `count` particles from `rng`.
    pub fn generate(count: usize, rng: &mut dyn DeterministicRng) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                x_percent: rng.next_f64() * 100.0,
                y_percent: rng.next_f64() * 100.0,
                size_px: rng.next_u32_range(MIN_SIZE_PX, MAX_SIZE_PX),
                drift_ms: rng.next_u32_range(MIN_DRIFT_MS, MAX_DRIFT_MS),
                delay_ms: rng.next_u32_range(0, MAX_DELAY_MS),
                opacity: MIN_OPACITY + rng.next_f64() * OPACITY_SPAN,
            })
            .collect();
        Self { particles }
    }

    /// The generated particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns `true` if the field has no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
