// page/ - Helpers for the rest of the memorial page
//
// The clock and the ship are plain DOM elements driven from JS.
// These modules hold the arithmetic so the JS side only writes styles/text.

mod elapsed;
mod voyage;

pub use elapsed::*;
pub use voyage::*;
