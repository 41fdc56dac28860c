//=========================================================================
// Event Collector
//=========================================================================
//
// Logic-side receiver for platform messages.
//
// Architecture:
//   Receiver<PlatformEvent> ─→ collect_frame() ─→ events ─→ StateTracker
//
// Each call drains at most MAX_MESSAGES_PER_TICK messages so a flooded
// channel cannot stall a tick; the rest wait for the next one. Pacing is
// the orchestrator's job, so collection never blocks.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

const MAX_MESSAGES_PER_TICK: usize = 100;

//=== TickControl =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    events: Vec<InputEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(16),
        }
    }

    /// Replaces the held events with everything received since the last
    /// call, in arrival order.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.events.clear();

        for _ in 0..MAX_MESSAGES_PER_TICK {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs(events)) => self.events.extend(events),
                Ok(PlatformEvent::WindowClosed) => {
                    debug!(target: "grid::runtime", "Window closed");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "grid::runtime", "Platform channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => return TickControl::Continue,
            }
        }

        warn!(
            target: "grid::runtime",
            "Platform backlog: deferring messages beyond {} this tick",
            MAX_MESSAGES_PER_TICK
        );
        TickControl::Continue
    }

    pub(crate) fn events(&self) -> &[InputEvent] {
        &self.events
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
