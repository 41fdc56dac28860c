//=========================================================================
// Grid Controller
//=========================================================================
//
// Tracks the active element of one controllable and executes commands
// published by one input provider.
//
// State Machine:
// ```text
//   builder ──build()──> Idle ──Ready──> Active ──NotReady──> Idle
//                          │               │ ↺ command
//                          └──destroy()────┴──────────────> Destroyed
// ```
//
// Activation anchors the current element at the controllable's origin
// and subscribes to the provider; deactivation drops the subscription
// (discarding undelivered commands) and clears the current element.
//
// Error Policy:
//   NotFound from a command      → warn, current unchanged, continue
//   any other command error      → error, current unchanged, continue;
//                                  the first one is returned after the drain
//   activation failure           → returned, controller stays Idle
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::command::{Command, SharedCommand};
use crate::core::error::{GridError, Result};
use crate::core::grid::{Controllable, Interactable, Readiness};
use crate::core::provider::CommandSource;
use crate::core::session::{Tick, TickContext};
use crate::core::signal::Subscription;

//=== ControllerState =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// Controllable not ready; commands are not processed.
    Idle,

    /// Current element tracked; listening to the provider.
    Active,

    /// Every subscription released. Terminal.
    Destroyed,
}

//=== GridControllerBuilder ===============================================

/// Collects the controller's collaborators; [`build`](Self::build)
/// validates them.
pub struct GridControllerBuilder<C: Controllable> {
    controllable: Option<Rc<C>>,
    source: Option<CommandSource<C>>,
}

impl<C: Controllable> GridControllerBuilder<C> {
    pub fn controllable(mut self, controllable: Rc<C>) -> Self {
        self.controllable = Some(controllable);
        self
    }

    pub fn input_provider(mut self, source: CommandSource<C>) -> Self {
        self.source = Some(source);
        self
    }

    /// Builds an `Idle` controller, activating it at once if the
    /// controllable is already ready.
    ///
    /// # Errors
    ///
    /// - [`GridError::Configuration`] if a collaborator is missing or the
    ///   provider is already gone
    /// - activation errors when the controllable is ready but has no
    ///   origin element
    pub fn build(self) -> Result<GridController<C>> {
        let controllable = self.controllable.ok_or_else(|| {
            GridError::Configuration("grid controller requires a controllable".into())
        })?;
        let source = self.source.ok_or_else(|| {
            GridError::Configuration("grid controller requires an input provider".into())
        })?;
        if !source.is_live() {
            return Err(GridError::Configuration(
                "input provider was dropped before the controller was built".into(),
            ));
        }

        let readiness = controllable.readiness().subscribe();
        let mut controller = GridController {
            controllable,
            source,
            readiness,
            commands: None,
            current: None,
            state: ControllerState::Idle,
        };
        debug!(target: "grid::controller", "Controller built (Idle)");

        if controller.controllable.is_ready() {
            controller.activate()?;
        }
        Ok(controller)
    }
}

impl<C: Controllable> Default for GridControllerBuilder<C> {
    fn default() -> Self {
        Self {
            controllable: None,
            source: None,
        }
    }
}

//=== GridController ======================================================

pub struct GridController<C: Controllable> {
    controllable: Rc<C>,
    source: CommandSource<C>,
    readiness: Subscription<Readiness>,
    commands: Option<Subscription<SharedCommand<C>>>,
    current: Option<Rc<C::Element>>,
    state: ControllerState,
}

impl<C: Controllable> GridController<C> {
    pub fn builder() -> GridControllerBuilder<C> {
        GridControllerBuilder::default()
    }

    /// Wraps the controller for registration with a session while the
    /// host keeps a handle.
    pub fn into_shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    //=====================================================================
    // Queries
    //=====================================================================

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ControllerState::Active
    }

    /// Active element, present only while `Active`.
    pub fn current(&self) -> Option<&Rc<C::Element>> {
        self.current.as_ref()
    }

    pub fn current_index(&self) -> Option<C::Index> {
        self.current.as_ref().map(|element| element.grid_index())
    }

    pub fn controllable(&self) -> &Rc<C> {
        &self.controllable
    }

    //=====================================================================
    // Update
    //=====================================================================

    /// Applies pending readiness levels in order, then executes every
    /// pending command if active.
    ///
    /// A failing command does not hold back the ones queued after it; the
    /// first command error is returned once the queue is empty. An
    /// activation failure returns at once and leaves later notifications
    /// queued.
    pub fn update(&mut self) -> Result<()> {
        if self.state == ControllerState::Destroyed {
            return Ok(());
        }

        while let Some(level) = self.readiness.try_next() {
            match (level, self.state) {
                (Readiness::Ready, ControllerState::Idle) => self.activate()?,
                (Readiness::NotReady, ControllerState::Active) => self.deactivate(),
                (level, state) => {
                    debug!(target: "grid::controller", "Ignoring {:?} while {:?}", level, state);
                }
            }
        }

        let mut first_error = None;
        while let Some(command) = self.commands.as_ref().and_then(Subscription::try_next) {
            if let Err(e) = self.execute(command.as_ref()) {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Executes one command against the current element.
    ///
    /// Ignored unless `Active`. When the returned element differs from the
    /// current one, selection moves: the old element is deselected before
    /// the new one is selected.
    pub fn execute(&mut self, command: &dyn Command<C>) -> Result<()> {
        if self.state != ControllerState::Active {
            debug!(target: "grid::controller", "Dropping {:?} while {:?}", command, self.state);
            return Ok(());
        }

        let current = self.current.clone().ok_or_else(|| {
            GridError::InvariantViolation("active controller has no current element".into())
        })?;

        trace!(target: "grid::controller", "Executing {:?} at {:?}", command, current.grid_index());

        match command.execute(&current, &self.controllable) {
            Ok(next) => {
                if !Rc::ptr_eq(&next, &current) {
                    debug!(
                        target: "grid::controller",
                        "Selection {:?} -> {:?}",
                        current.grid_index(),
                        next.grid_index()
                    );
                    current.deselect();
                    next.select();
                    self.current = Some(next);
                }
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                warn!(target: "grid::controller", "{:?} aborted: {}", command, e);
                Ok(())
            }
            Err(e) => {
                error!(target: "grid::controller", "{:?} failed: {}", command, e);
                Err(e)
            }
        }
    }

    //=====================================================================
    // Reconfiguration & Teardown
    //=====================================================================

    /// Replaces the input provider.
    ///
    /// While active, the old subscription is released together with any
    /// undelivered commands before the new one takes over.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidArgument`] if `source` belongs to a dropped
    /// provider or the controller is destroyed. Prior state is kept.
    pub fn set_input_provider(&mut self, source: CommandSource<C>) -> Result<()> {
        if self.state == ControllerState::Destroyed {
            return Err(GridError::InvalidArgument(
                "cannot rebind the provider of a destroyed controller".into(),
            ));
        }
        if !source.is_live() {
            return Err(GridError::InvalidArgument(
                "replacement input provider has been dropped".into(),
            ));
        }

        if self.state == ControllerState::Active {
            let incoming = source.subscribe()?;
            if let Some(mut outgoing) = self.commands.replace(incoming) {
                outgoing.unsubscribe();
            }
        }

        self.source = source;
        debug!(target: "grid::controller", "Input provider replaced");
        Ok(())
    }

    /// Releases every subscription and deselects the current element.
    /// Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.state == ControllerState::Destroyed {
            return;
        }

        if let Some(mut commands) = self.commands.take() {
            commands.unsubscribe();
        }
        self.readiness.unsubscribe();
        if let Some(current) = self.current.take() {
            current.deselect();
        }

        self.state = ControllerState::Destroyed;
        info!(target: "grid::controller", "Controller destroyed");
    }

    //--- Internal Helpers -------------------------------------------------

    fn activate(&mut self) -> Result<()> {
        let origin = self.controllable.interactable_at_origin()?;
        let commands = self.source.subscribe()?;

        origin.select();
        info!(target: "grid::controller", "Controller active at {:?}", origin.grid_index());

        self.current = Some(origin);
        self.commands = Some(commands);
        self.state = ControllerState::Active;
        Ok(())
    }

    fn deactivate(&mut self) {
        if let Some(mut commands) = self.commands.take() {
            commands.unsubscribe();
        }
        if let Some(current) = self.current.take() {
            current.deselect();
        }

        self.state = ControllerState::Idle;
        info!(target: "grid::controller", "Controller idle");
    }
}

impl<C: Controllable> Tick for GridController<C> {
    fn tick(&mut self, _ctx: &TickContext<'_>) -> Result<()> {
        self.update()
    }
}

impl<C: Controllable> fmt::Debug for GridController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridController")
            .field("state", &self.state)
            .field("current", &self.current_index())
            .field("subscribed", &self.commands.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
