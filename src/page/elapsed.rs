// elapsed.rs - "Time since" clock
//
// Timestamps are JS epoch milliseconds (Date.getTime()), so local-time
// handling of the anchor date stays on the JS side.

use wasm_bindgen::prelude::*;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

#[wasm_bindgen]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeSince {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeSince {
    /// Whole seconds from `anchor_ms` to `now_ms`, split into units.
    /// An anchor in the future reads as zero.
    pub fn between(anchor_ms: f64, now_ms: f64) -> Self {
        let total = ((now_ms - anchor_ms) / 1000.0).floor().max(0.0) as u64;

        Self {
            days: (total / DAY) as u32,
            hours: ((total % DAY) / HOUR) as u32,
            minutes: ((total % HOUR) / MINUTE) as u32,
            seconds: (total % MINUTE) as u32,
        }
    }
}

#[wasm_bindgen]
impl TimeSince {
    /// `D:HH:MM:SS`
    pub fn display(&self) -> String {
        format!("{}:{:02}:{:02}:{:02}", self.days, self.hours, self.minutes, self.seconds)
    }
}
