// bubble.rs - Rising bubbles
//
// Structure-of-Arrays, oldest first. Bubbles read the water surface through
// the nearest particle but never push back on it.

use fastrand::Rng;

use super::ParticleField;
use crate::config::WaveConfig;

const MIN_SIZE: f32 = 15.0;
const MAX_SIZE: f32 = 30.0;
const CATAPULT: f32 = 30.0;     // full range of the sideways launch speed
const DEPTH_LIFT: f32 = 0.01;   // upward pull per pixel below the surface
const DRAG_X: f32 = 1.04;

pub struct BubblePool {
    // Position
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Velocity
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,

    pub size: Vec<f32>,
    pub mass: Vec<f32>,
}

impl BubblePool {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            vx: Vec::new(),
            vy: Vec::new(),
            size: Vec::new(),
            mass: Vec::new(),
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

    /// Launch a bubble from the floor. Once the pool holds more than
    /// `max_bubbles`, the oldest one makes room first.
    pub fn spawn(&mut self, width: f32, height: f32, max_bubbles: usize, rng: &mut Rng) {
        if self.len() > max_bubbles {
            self.evict_oldest();
        }

        let size = MIN_SIZE + rng.f32() * (MAX_SIZE - MIN_SIZE);
        let span = (width - 2.0 * MAX_SIZE).max(0.0);
        let x = MAX_SIZE + rng.f32() * span;
        let vx = rng.f32() * CATAPULT - CATAPULT / 2.0;

        self.push(x, height - MAX_SIZE, vx, 0.0, size);
    }

    fn push(&mut self, x: f32, y: f32, vx: f32, vy: f32, size: f32) {
        self.x.push(x);
        self.y.push(y);
        self.vx.push(vx);
        self.vy.push(vy);
        self.size.push(size);
        self.mass.push(size / MAX_SIZE + 1.0);
    }

    fn evict_oldest(&mut self) {
        if self.is_empty() { return; }
        self.x.remove(0);
        self.y.remove(0);
        self.vx.remove(0);
        self.vy.remove(0);
        self.size.remove(0);
        self.mass.remove(0);
    }

    /// Apply damping, buoyancy and wall bounces; drop bubbles that have
    /// floated off the top.
    pub fn update(&mut self, field: &ParticleField, width: f32, config: &WaveConfig) {
        if field.is_empty() { return; }

        let mut write = 0;

        for read in 0..self.len() {
            let mut x = self.x[read];
            let mut y = self.y[read];
            let mut vx = self.vx[read];
            let mut vy = self.vy[read];
            let size = self.size[read];
            let mass = self.mass[read];

            let surface = field.y[field.closest(x, y)];

            // Screen y grows downward: y > surface means under water
            vy /= if y > surface { config.water_damping } else { config.air_damping };
            vy += if surface > y { 1.0 / mass } else { -((y - surface) * DEPTH_LIFT) / mass };
            y += vy;

            if x > width - size { vx = -vx; }
            if x < size { vx = vx.abs(); }
            vx /= DRAG_X;
            x += vx;

            // Floated off the top
            if y < -size * 2.0 { continue; }

            self.x[write] = x;
            self.y[write] = y;
            self.vx[write] = vx;
            self.vy[write] = vy;
            self.size[write] = size;
            self.mass[write] = mass;
            write += 1;
        }

        self.x.truncate(write);
        self.y.truncate(write);
        self.vx.truncate(write);
        self.vy.truncate(write);
        self.size.truncate(write);
        self.mass.truncate(write);
    }
}

impl Default for BubblePool {
    fn default() -> Self {
        Self::new()
    }
}
