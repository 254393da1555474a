// wave-engine - Animated water surface for a canvas
//
// Layout:
//   sim/    particle spring field, bubbles, pointer, timers (pure, testable)
//   render  draws a WaveWorld through the Surface trait
//   web     canvas binding and animation-frame loop
//   page    small helpers for the surrounding page (clock, ship)

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod page;
pub mod render;
pub mod sim;
pub mod web;

pub use config::WaveConfig;
pub use error::EngineError;
pub use page::{ShipLeg, TimeSince, Voyage};
pub use sim::WaveWorld;
pub use web::WaveCanvas;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already initialised when the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Days, hours, minutes and seconds from `anchor_ms` to `now_ms`.
#[wasm_bindgen]
pub fn time_since(anchor_ms: f64, now_ms: f64) -> TimeSince {
    TimeSince::between(anchor_ms, now_ms)
}

/// RNG seed from the browser's Math.random.
pub(crate) fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}
