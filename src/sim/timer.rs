// timer.rs - Periodic events on the frame clock
//
// Driven by the animation-frame timestamp instead of separate browser
// timers, so there is nothing extra to cancel on teardown.

#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period_ms: f64,
    next_due: Option<f64>,
}

impl Interval {
    pub fn new(period_ms: f64) -> Self {
        Self { period_ms, next_due: None }
    }

    /// Returns true at most once per call when a period has elapsed.
    /// The first call only starts the clock. After a long stall (hidden
    /// tab) the schedule restarts from `now_ms` rather than catching up.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let Some(due) = self.next_due else {
            self.next_due = Some(now_ms + self.period_ms);
            return false;
        };

        if now_ms < due {
            return false;
        }

        let next = due + self.period_ms;
        self.next_due = Some(if next <= now_ms { now_ms + self.period_ms } else { next });
        true
    }
}
