// voyage.rs - Ship wandering across the viewport
//
// Each leg: pick a random waypoint, turn to face it, then glide there with
// a CSS transition. Angles are CSS degrees, 0 pointing up the page.

use fastrand::Rng;
use wasm_bindgen::prelude::*;

/// Ship sprite size; waypoints keep the whole sprite on screen
pub const SHIP_SIZE: f32 = 106.0;

const NARROW_VIEWPORT: f32 = 650.0;
const LEG_NARROW_MS: f64 = 2500.0;
const LEG_WIDE_MS: f64 = 4500.0;

// Leg choreography: hide and turn, then reveal and move
const TURN_DELAY_MS: f64 = 1000.0;
const REVEAL_DELAY_MS: f64 = 50.0;

/// Random top-left position for the sprite, in whole pixels.
pub fn next_waypoint(viewport_w: f32, viewport_h: f32, rng: &mut Rng) -> (f32, f32) {
    let x = (rng.f32() * (viewport_w - SHIP_SIZE).max(0.0)).floor();
    let y = (rng.f32() * (viewport_h - SHIP_SIZE).max(0.0)).floor();
    (x, y)
}

/// Heading in degrees for travel from `from` to `to`, or None when the
/// points coincide. Screen y grows downward.
pub fn heading(from: (f32, f32), to: (f32, f32)) -> Option<f32> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let hyp = dx.hypot(dy);
    if hyp == 0.0 {
        return None;
    }

    let a = (dx.abs() / hyp).acos().to_degrees();
    let angle = match (dx > 0.0, dy < 0.0) {
        (true, true) => 85.0 - a,
        (true, false) => a + 90.0,
        (false, true) => 270.0 + a,
        (false, false) => 270.0 - a,
    };
    Some(angle)
}

/// Glide duration; small screens get quicker legs.
pub fn leg_duration_ms(viewport_w: f32) -> f64 {
    if viewport_w < NARROW_VIEWPORT { LEG_NARROW_MS } else { LEG_WIDE_MS }
}

#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipLeg {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    /// Facing left: the sprite is flipped so it is not upside down
    pub mirrored: bool,
    pub turn_delay_ms: f64,
    pub reveal_delay_ms: f64,
    pub duration_ms: f64,
}

#[wasm_bindgen]
impl ShipLeg {
    /// CSS `transform` value for the sprite.
    pub fn transform(&self) -> String {
        if self.mirrored {
            format!("rotate({}deg) scale(-1, 1)", self.rotation)
        } else {
            format!("rotate({}deg)", self.rotation)
        }
    }
}

#[wasm_bindgen]
pub struct Voyage {
    at: (f32, f32),
    rotation: f32,
    rng: Rng,
}

#[wasm_bindgen]
impl Voyage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Voyage {
        Self::with_seed(crate::random_seed())
    }

    /// Plan the next leg from the current position.
    pub fn next_leg(&mut self, viewport_w: f32, viewport_h: f32) -> ShipLeg {
        let to = next_waypoint(viewport_w, viewport_h, &mut self.rng);
        if let Some(rotation) = heading(self.at, to) {
            self.rotation = rotation;
        }
        self.at = to;

        ShipLeg {
            x: to.0,
            y: to.1,
            rotation: self.rotation,
            mirrored: self.rotation > 180.0,
            turn_delay_ms: TURN_DELAY_MS,
            reveal_delay_ms: REVEAL_DELAY_MS,
            duration_ms: leg_duration_ms(viewport_w),
        }
    }
}

impl Voyage {
    /// Start at the top-left corner facing up.
    pub fn with_seed(seed: u64) -> Voyage {
        Voyage { at: (0.0, 0.0), rotation: 0.0, rng: Rng::with_seed(seed) }
    }
}
