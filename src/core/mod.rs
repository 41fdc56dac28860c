//=========================================================================
// Core
//=========================================================================
//
// Grid model, command dispatch, input providers and the logic-thread loop.
//
// Architecture:
// ```text
//  Receiver<PlatformEvent>
//     ↓ EventCollector::collect_frame()
//  StateTracker::advance()
//     ↓
//  GridSession::tick()
//     ├─ providers   (StateTracker → Commands)
//     └─ controllers (Commands → selection / click)
//     ↓
//  sleep to next tick boundary
// ```
//
// Everything past the channel is single-threaded: the session is built
// inside the logic thread by a caller-supplied factory, so elements can be
// plain `Rc` values.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod input;
pub mod provider;
pub mod session;
pub mod signal;

pub(crate) mod platform_bridge;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use input::StateTracker;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use session::GridSession;

//=== CoreSystemsOrchestrator =============================================

/// Drives one [`GridSession`] at a fixed tick rate.
pub(crate) struct CoreSystemsOrchestrator {
    collector: EventCollector,
    input: StateTracker,
    session: GridSession,
    frame_duration: Duration,
}

impl CoreSystemsOrchestrator {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>, session: GridSession, tps: f64) -> Self {
        Self {
            collector: EventCollector::new(receiver),
            input: StateTracker::new(),
            session,
            frame_duration: Duration::from_secs_f64(1.0 / tps),
        }
    }

    /// Spawns the logic thread. `factory` runs on that thread.
    pub(crate) fn spawn<F>(receiver: Receiver<PlatformEvent>, tps: f64, factory: F) -> thread::JoinHandle<()>
    where
        F: FnOnce() -> GridSession + Send + 'static,
    {
        thread::spawn(move || {
            let session = factory();
            info!(target: "grid::runtime", "Logic thread started at {} TPS", tps);
            Self::new(receiver, session, tps).run();
        })
    }

    fn run(mut self) {
        loop {
            let frame_start = Instant::now();

            if self.step(frame_start) == TickControl::Exit {
                break;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_duration {
                thread::sleep(self.frame_duration - elapsed);
            }
        }

        info!(target: "grid::runtime", "Logic thread exiting after {} ticks", self.session.ticks());
    }

    /// One tick: gather input, advance device state, tick the session.
    ///
    /// Session errors are logged and the loop carries on; a bad command
    /// must not take the window down with it.
    fn step(&mut self, now: Instant) -> TickControl {
        if self.collector.collect_frame() == TickControl::Exit {
            return TickControl::Exit;
        }

        let events = self.collector.events();
        if !events.is_empty() {
            debug!(target: "grid::runtime", "Tick {}: {} input events", self.session.ticks(), events.len());
        }
        self.input.advance(events);

        if let Err(e) = self.session.tick(&self.input, now) {
            warn!(target: "grid::runtime", "Tick {} reported: {}", self.session.ticks(), e);
        }

        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
