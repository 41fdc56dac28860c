//=========================================================================
// Input Buffer
//=========================================================================
//
// Accumulates converted input between redraws.
//
// Architecture:
//   push()  → Vec  (every transition kept, in arrival order)
//   drain() → Option<Vec> at frame boundary
//
// Order matters: a modifier change between a key press and its release
// must reach the state tracker in between them.
//
//=========================================================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

#[derive(Debug, Default)]
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Takes everything buffered this frame, or `None` when nothing was.
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.events))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
