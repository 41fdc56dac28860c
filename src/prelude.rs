//=========================================================================
// Prelude
//=========================================================================
//
// Re-exports the types most hosts need.
//
// Usage:
//   use aetheric_grid::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::config::{ConfigError, GridConfig};
pub use crate::core::session::{GridSession, Tick, TickContext};

// Grid model
pub use crate::core::grid::{
    wrap_position, Controllable, GridControllable, GridElement, GridIndex, Index1D, Index2D,
    Index3D, Interactable, KeyIndex, Readiness,
};

// Dispatch
pub use crate::core::command::{Click, Command, MoveBy, SelectAt, SharedCommand};
pub use crate::core::controller::{ControllerState, GridController, GridControllerBuilder};
pub use crate::core::provider::{
    CommandSource, Cooldown, GridAction, InputProvider, KeyboardInputProvider, QueuedInputProvider,
};

// Signals and errors
pub use crate::core::error::{GridError, Result};
pub use crate::core::signal::{Signal, SignalSource, Subscription};

// Input
pub use crate::core::input::{
    Action, ActionMapper, Binding, GamepadButton, InputContext, InputEvent, KeyCode, Modifiers,
    MouseButton, StateTracker,
};
