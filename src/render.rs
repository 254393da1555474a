// render.rs - Draw simulation state onto a 2D surface
//
// Scene per frame:
//   1. clear
//   2. water body: curve through the particle midpoints, closed along the
//      bottom edge, filled with a vertical gradient
//   3. bubbles: one path of circles, one fill

use std::f32::consts::TAU;

use crate::sim::{BubblePool, ParticleField, WaveWorld};

// Gradient runs from 20% of the height down to the bottom edge
const GRADIENT_TOP: f32 = 0.2;

/// Vertical linear gradient with two colour stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient<'a> {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub stops: [(f32, &'a str); 2],
}

/// The subset of a 2D canvas context the renderer needs.
pub trait Surface {
    fn clear(&mut self, w: f32, h: f32);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, r: f32, start: f32, end: f32, anticlockwise: bool);
    fn set_fill_gradient(&mut self, gradient: &Gradient);
    fn set_fill_color(&mut self, color: &str);
    fn fill(&mut self);
}

/// Draw one full frame.
pub fn draw_frame<S: Surface>(surface: &mut S, world: &WaveWorld) {
    let w = world.width() as f32;
    let h = world.height() as f32;
    let config = world.config();

    surface.clear(w, h);

    surface.set_fill_gradient(&Gradient {
        x0: w * 0.5,
        y0: h * GRADIENT_TOP,
        x1: w * 0.5,
        y1: h,
        stops: [(0.0, config.water_top.as_str()), (1.0, config.water_bottom.as_str())],
    });
    draw_water(surface, world.field(), w, h);

    surface.set_fill_color(&config.bubble_fill);
    draw_bubbles(surface, world.bubbles());
}

/// Fill the water body under the particle row.
pub fn draw_water<S: Surface>(surface: &mut S, field: &ParticleField, w: f32, h: f32) {
    let Some(last) = field.len().checked_sub(1) else { return };
    let (x0, y0) = (field.x[0], field.y[0]);

    surface.begin_path();
    surface.move_to(x0, y0);

    // Each interior particle contributes a curve from the previous
    // midpoint, using the previous particle as control point.
    for i in 1..last {
        let (px, py) = (field.x[i - 1], field.y[i - 1]);
        let (cx, cy) = (field.x[i], field.y[i]);
        surface.quadratic_curve_to(px, py, px + (cx - px) / 2.0, py + (cy - py) / 2.0);
    }

    surface.line_to(field.x[last], field.y[last]);
    surface.line_to(w, h);
    surface.line_to(0.0, h);
    surface.line_to(x0, y0);
    surface.fill();
}

/// Fill every bubble in a single path.
pub fn draw_bubbles<S: Surface>(surface: &mut S, bubbles: &BubblePool) {
    surface.begin_path();
    for i in 0..bubbles.len() {
        let (x, y) = (bubbles.x[i], bubbles.y[i]);
        surface.move_to(x, y);
        surface.arc(x, y, bubbles.size[i], 0.0, TAU, true);
    }
    surface.fill();
}
