// intent.rs - Requests queued by event handlers
//
// Handlers never touch the world. They push intents here and the frame loop
// applies them, in order, before the next update.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Pointer moved to canvas-relative coordinates
    PointerMove { x: f32, y: f32 },
    /// Host container changed size
    Resize { width: u32, height: u32 },
    Impulse { x: f32, force: f32 },
    SpawnBubble,
}

#[derive(Debug, Default)]
pub struct IntentQueue {
    pending: VecDeque<Intent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.pending.push_back(intent);
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Intent> + '_ {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
