// particle.rs - Water surface particles
//
// A row of mass points joined by springs. Structure-of-Arrays layout; the
// row is rebuilt from scratch whenever the surface is resized.

use fastrand::Rng;

use super::Pointer;
use crate::config::WaveConfig;

// Layout
const SAMPLE_SPACING: f32 = 60.0;
const EDGE_SAMPLES: f32 = 2.0;     // samples hanging past each canvas edge
const REST_LEVEL: f32 = 0.5;       // fraction of the height

// Physics constants
const PARTICLE_MASS: f32 = 10.0;
const SEED_VELOCITY: f32 = 3.0;
const ANCHOR_RATIO: f32 = 15.0;    // rest anchor is this much weaker than a neighbour spring
const CLOSEST_CUTOFF: f32 = 1000.0;

/// Number of sample intervals for a surface `width` pixels wide.
#[inline]
pub fn detail(width: f32) -> usize {
    (width / SAMPLE_SPACING).round() as usize
}

pub struct ParticleField {
    // Position (x never moves)
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Resting position, the anchor of the restoring spring
    pub rest_x: Vec<f32>,
    pub rest_y: Vec<f32>,

    // Vertical velocity and accumulated external force
    pub vy: Vec<f32>,
    pub fy: Vec<f32>,

    pub mass: Vec<f32>,

    // Surface width, for mapping x to an index
    width: f32,
}

impl ParticleField {
    /// Build `detail(width) + 1` particles at rest across the surface,
    /// with a small random downward kick for variety.
    pub fn new(width: f32, height: f32, rng: &mut Rng) -> Self {
        let detail = detail(width);
        let n = detail + 1;

        // The outer two samples on each side sit off-canvas so the filled
        // shape reaches both edges. Narrow surfaces clamp the divisor.
        let spacing = width / (detail as f32 - 2.0 * EDGE_SAMPLES).max(1.0);
        let rest = height * REST_LEVEL;

        let x: Vec<f32> = (0..n).map(|i| spacing * (i as f32 - EDGE_SAMPLES)).collect();
        let vy = (0..n).map(|_| rng.f32() * SEED_VELOCITY).collect();

        Self {
            rest_x: x.clone(),
            x,
            y: vec![rest; n],
            rest_y: vec![rest; n],
            vy,
            fy: vec![0.0; n],
            mass: vec![PARTICLE_MASS; n],
            width,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// One spring step, left to right. The end particles have no symmetric
    /// neighbours and stay put. Neighbours to the left are already updated
    /// when a particle reads them.
    pub fn update(&mut self, pointer: &mut Pointer, config: &WaveConfig) {
        let k = config.stiffness;
        let n = self.len();

        for i in 1..n.saturating_sub(1) {
            let prev = self.y[i - 1];
            let next = self.y[i + 1];
            let cur = self.y[i];

            let force = -k * (prev - cur)
                + k * (cur - next)
                + (k / ANCHOR_RATIO) * (cur - self.rest_y[i]);

            self.vy[i] += -(force / self.mass[i]) + self.fy[i];
            self.vy[i] /= config.friction;
            self.fy[i] /= config.friction;
            self.y[i] += self.vy[i];

            // Pointer pull. The pointer loses speed once per particle it
            // reaches, not once per frame.
            if pointer.distance_to(self.x[i], self.y[i]) < config.aoe {
                let from_rest = pointer.distance_to(self.rest_x[i], self.rest_y[i]);
                pointer.decay();
                self.fy[i] += config.mouse_pull * (1.0 - from_rest / config.aoe) * pointer.speed_y;
            }
        }
    }

    /// Add `force` to the particle under horizontal position `x`.
    /// Returns false (and does nothing) when `x` maps outside the row.
    pub fn impulse(&mut self, x: f32, force: f32) -> bool {
        // Halves round up, so -0.5 maps to particle 0
        let idx = (x / self.width * self.len() as f32 + 0.5).floor();
        if !idx.is_finite() || idx < 0.0 {
            return false;
        }
        match self.fy.get_mut(idx as usize) {
            Some(fy) => {
                *fy += force;
                true
            }
            None => false,
        }
    }

    /// Index of the particle nearest to (x, y). Ties keep the lower index;
    /// nothing within range falls back to 0.
    pub fn closest(&self, x: f32, y: f32) -> usize {
        let mut best = 0;
        let mut best_dist = CLOSEST_CUTOFF;

        for i in 0..self.len() {
            let dx = self.x[i] - x;
            let dy = self.y[i] - y;
            let d = (dx * dx + dy * dy).sqrt();
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }

        best
    }
}
