// pointer.rs - Pointer state
//
// Speed is only recomputed on move events. Between events it decays while
// particles in range consume it (see ParticleField::update).

/// Maximum pointer speed per axis, in pixels per event
pub const MAX_SPEED: f32 = 40.0;

/// Decay applied to the pointer speed each time a particle feels it
pub const SPEED_DECAY: f32 = 0.98;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub speed_x: f32,
    pub speed_y: f32,
}

impl Pointer {
    /// Record a move to canvas-relative (x, y); speed is the clamped delta.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.speed_x = (x - self.x).clamp(-MAX_SPEED, MAX_SPEED);
        self.speed_y = (y - self.y).clamp(-MAX_SPEED, MAX_SPEED);
        self.x = x;
        self.y = y;
    }

    #[inline]
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub(crate) fn decay(&mut self) {
        self.speed_x *= SPEED_DECAY;
        self.speed_y *= SPEED_DECAY;
    }
}
