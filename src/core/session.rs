//=========================================================================
// Grid Session
//=========================================================================
//
// Per-tick orchestration of providers and controllers.
//
// Tick order:
//   1. every provider, in registration order   (publish commands)
//   2. every controller, in registration order (readiness + commands)
//
// Running providers first lets a command published this tick execute this
// tick. The relative order between providers (and between controllers) is
// registration order today; callers must not depend on it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::{error, trace};

//=== Internal Dependencies ===============================================

use crate::core::error::Result;
use crate::core::input::StateTracker;

//=== TickContext =========================================================

/// Inputs visible to every component during one tick.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub input: &'a StateTracker,
    pub now: Instant,
}

impl<'a> TickContext<'a> {
    pub fn new(input: &'a StateTracker, now: Instant) -> Self {
        Self { input, now }
    }
}

//=== Tick Trait ==========================================================

/// A component driven once per logic tick.
pub trait Tick {
    fn tick(&mut self, ctx: &TickContext<'_>) -> Result<()>;
}

impl<T: Tick + ?Sized> Tick for Box<T> {
    fn tick(&mut self, ctx: &TickContext<'_>) -> Result<()> {
        (**self).tick(ctx)
    }
}

/// Shared components: the session ticks them while the host keeps a handle
/// for queries (current element, swapping providers).
impl<T: Tick + ?Sized> Tick for Rc<RefCell<T>> {
    fn tick(&mut self, ctx: &TickContext<'_>) -> Result<()> {
        self.borrow_mut().tick(ctx)
    }
}

//=== GridSession =========================================================

/// Owns the tickable components of one logic thread.
///
/// ```
/// use std::rc::Rc;
/// use std::time::Instant;
/// use aetheric_grid::prelude::*;
///
/// type Grid = GridControllable<GridElement<Index1D>>;
///
/// let grid = Rc::new(Grid::from_elements((0..3).map(|i| Rc::new(GridElement::new(Index1D(i))))).unwrap());
/// let mut provider = QueuedInputProvider::<Grid>::new();
/// let controller = GridController::builder()
///     .controllable(Rc::clone(&grid))
///     .input_provider(provider.command_source())
///     .build()
///     .unwrap()
///     .into_shared();
///
/// provider.enqueue(MoveBy(Index1D::NEXT));
///
/// let mut session = GridSession::new();
/// session.add_provider(provider);
/// session.add_controller(Rc::clone(&controller));
/// session.tick(&StateTracker::new(), Instant::now()).unwrap();
///
/// assert_eq!(controller.borrow().current_index(), Some(Index1D(1)));
/// ```
#[derive(Default)]
pub struct GridSession {
    providers: Vec<Box<dyn Tick>>,
    controllers: Vec<Box<dyn Tick>>,
    ticks: u64,
}

impl GridSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_provider(&mut self, provider: impl Tick + 'static) {
        self.providers.push(Box::new(provider));
    }

    pub fn add_controller(&mut self, controller: impl Tick + 'static) {
        self.controllers.push(Box::new(controller));
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs one tick.
    ///
    /// A failing component is logged and does not stop the others; the
    /// first error is returned once every component has run.
    pub fn tick(&mut self, input: &StateTracker, now: Instant) -> Result<()> {
        let ctx = TickContext::new(input, now);
        let mut first_error = None;

        for component in self.providers.iter_mut().chain(self.controllers.iter_mut()) {
            if let Err(e) = component.tick(&ctx) {
                error!(target: "grid::session", "Tick {} component failed: {}", self.ticks, e);
                first_error.get_or_insert(e);
            }
        }

        self.ticks += 1;
        trace!(target: "grid::session", "Tick {} complete", self.ticks);

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GridError;

    //--- Test Helpers -----------------------------------------------------

    /// Records its label into a shared log on every tick.
    struct Recorder {
        label: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        fail: bool,
    }

    impl Tick for Recorder {
        fn tick(&mut self, _ctx: &TickContext<'_>) -> Result<()> {
            self.log.borrow_mut().push(self.label);
            if self.fail {
                return Err(GridError::InvariantViolation(self.label.into()));
            }
            Ok(())
        }
    }

    fn recorder(label: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Recorder {
        Recorder { label, log: Rc::clone(log), fail: false }
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn providers_run_before_controllers() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut session = GridSession::new();

        // Registered out of phase order on purpose.
        session.add_controller(recorder("controller", &log));
        session.add_provider(recorder("provider-a", &log));
        session.add_provider(recorder("provider-b", &log));

        session.tick(&StateTracker::new(), Instant::now()).unwrap();

        assert_eq!(*log.borrow(), vec!["provider-a", "provider-b", "controller"]);
        assert_eq!(session.ticks(), 1);
    }

    #[test]
    fn failure_does_not_starve_later_components() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut session = GridSession::new();

        session.add_provider(Recorder { label: "broken", log: Rc::clone(&log), fail: true });
        session.add_controller(recorder("controller", &log));

        let err = session.tick(&StateTracker::new(), Instant::now()).unwrap_err();

        assert_eq!(err, GridError::InvariantViolation("broken".into()));
        assert_eq!(*log.borrow(), vec!["broken", "controller"]);
    }

    #[test]
    fn shared_components_tick_through_rc() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let shared = Rc::new(RefCell::new(recorder("shared", &log)));

        let mut session = GridSession::new();
        session.add_controller(Rc::clone(&shared));
        session.tick(&StateTracker::new(), Instant::now()).unwrap();
        session.tick(&StateTracker::new(), Instant::now()).unwrap();

        assert_eq!(log.borrow().len(), 2);
        assert_eq!(Rc::strong_count(&shared), 2);
    }

    #[test]
    fn empty_session_ticks() {
        let mut session = GridSession::new();
        assert!(session.tick(&StateTracker::new(), Instant::now()).is_ok());
    }
}
