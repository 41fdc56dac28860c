//=========================================================================
// Input
//=========================================================================
//
// Raw device events, per-tick device state, and binding resolution.
//
// Architecture:
//   InputEvent ─→ StateTracker ─→ ActionMapper::{pressed, held} ─→ providers
//
// The logic thread owns one StateTracker and advances it once per tick
// before any provider runs.
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod action_mapper;
mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, InputContext};
pub use action_mapper::{ActionMapper, Binding};
pub use event::{GamepadButton, InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;
