//=========================================================================
// Action Mapper
//=========================================================================
//
// Resolves device bindings to actions under the active context.
//
// Architecture:
//   (Binding, InputContext) → HashMap → Action
//
// Two query styles, both over a StateTracker tick:
//   pressed()    actions whose binding went down this tick
//   held()       actions whose binding is currently held
//
// Key and mouse bindings match the tracker's current modifiers exactly, so
// a held key re-matches as soon as Shift/Ctrl/Alt are let go. Gamepad
// bindings carry no modifiers.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::{Action, InputContext},
    event::{GamepadButton, KeyCode, Modifiers, MouseButton},
    state_tracker::StateTracker,
};

//=== Binding =============================================================

/// One physical trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Key(KeyCode, Modifiers),
    Mouse(MouseButton, Modifiers),
    Gamepad(GamepadButton),
}

impl Binding {
    fn is_pressed(&self, state: &StateTracker) -> bool {
        match *self {
            Self::Key(key, mods) => state.is_key_pressed(key) && state.modifiers() == mods,
            Self::Mouse(button, mods) => {
                state.is_button_pressed(button) && state.modifiers() == mods
            }
            Self::Gamepad(button) => state.is_gamepad_pressed(button),
        }
    }

    fn is_down(&self, state: &StateTracker) -> bool {
        match *self {
            Self::Key(key, mods) => state.is_key_down(key) && state.modifiers() == mods,
            Self::Mouse(button, mods) => state.is_button_down(button) && state.modifiers() == mods,
            Self::Gamepad(button) => state.is_gamepad_down(button),
        }
    }
}

//=== ActionMapper ========================================================

/// Binding table keyed by (binding, context).
#[derive(Debug)]
pub struct ActionMapper<A: Action> {
    bindings: HashMap<(Binding, InputContext), A>,
    current_context: InputContext,
}

impl<A: Action> ActionMapper<A> {
    /// Empty table with [`InputContext::Primary`] active.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            current_context: InputContext::Primary,
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a trigger; rebinding the same trigger replaces the action.
    pub fn bind(&mut self, binding: Binding, action: A, context: InputContext) {
        self.bindings.insert((binding, context), action);
    }

    pub fn bind_key(&mut self, key: KeyCode, action: A, context: InputContext) {
        self.bind(Binding::Key(key, Modifiers::NONE), action, context);
    }

    pub fn bind_key_with_mods(
        &mut self,
        key: KeyCode,
        modifiers: Modifiers,
        action: A,
        context: InputContext,
    ) {
        self.bind(Binding::Key(key, modifiers), action, context);
    }

    pub fn bind_mouse(&mut self, button: MouseButton, action: A, context: InputContext) {
        self.bind(Binding::Mouse(button, Modifiers::NONE), action, context);
    }

    pub fn bind_gamepad(&mut self, button: GamepadButton, action: A, context: InputContext) {
        self.bind(Binding::Gamepad(button), action, context);
    }

    pub fn unbind(&mut self, binding: Binding, context: InputContext) {
        self.bindings.remove(&(binding, context));
    }

    /// Removes every binding of `context`.
    pub fn clear_context(&mut self, context: InputContext) {
        self.bindings.retain(|&(_, ctx), _| ctx != context);
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    //--- Context ----------------------------------------------------------

    pub fn set_context(&mut self, context: InputContext) {
        self.current_context = context;
    }

    pub fn current_context(&self) -> InputContext {
        self.current_context
    }

    //--- Resolution -------------------------------------------------------

    /// Actions whose binding went down during the current tick.
    pub fn pressed<'a>(&'a self, state: &'a StateTracker) -> impl Iterator<Item = A> + 'a {
        self.active()
            .filter(move |(binding, _)| binding.is_pressed(state))
            .map(|(_, action)| action)
    }

    /// Actions whose binding is held right now.
    pub fn held<'a>(&'a self, state: &'a StateTracker) -> impl Iterator<Item = A> + 'a {
        self.active()
            .filter(move |(binding, _)| binding.is_down(state))
            .map(|(_, action)| action)
    }

    //--- Internal Helpers -------------------------------------------------

    fn active(&self) -> impl Iterator<Item = (Binding, A)> + '_ {
        let context = self.current_context;
        self.bindings
            .iter()
            .filter(move |((_, ctx), _)| *ctx == context)
            .map(|(&(binding, _), &action)| (binding, action))
    }
}

impl<A: Action> Default for ActionMapper<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
