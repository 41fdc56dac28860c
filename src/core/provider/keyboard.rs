//=========================================================================
// Keyboard Input Provider
//=========================================================================
//
// Device-backed provider over keyboard, mouse and gamepad bindings.
//
// Per tick:
//   1. Movement: distinct deltas of all Move bindings held now or pressed
//      during the tick are summed.
//      A non-zero sum publishes one MoveBy if the cooldown allows; holding
//      repeats once per cooldown interval. Releasing every movement
//      binding re-arms the cooldown, so separate taps always step.
//   2. Click: published once on the tick any Click binding goes down.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{CommandSource, Cooldown, InputProvider};
use crate::core::command::{Click, MoveBy, SharedCommand};
use crate::core::error::Result;
use crate::core::grid::{Controllable, GridIndex};
use crate::core::input::{
    Action, ActionMapper, GamepadButton, InputContext, KeyCode, MouseButton,
};
use crate::core::session::{Tick, TickContext};
use crate::core::signal::Signal;

//=== GridAction ==========================================================

/// What a binding means to a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridAction<I: GridIndex> {
    /// Step by a delta.
    Move(I),
    Click,
}

impl<I: GridIndex> Action for GridAction<I> {}

//=== KeyboardInputProvider ===============================================

/// Publishes movement and click commands from bound device buttons.
pub struct KeyboardInputProvider<C: Controllable> {
    mapper: ActionMapper<GridAction<C::Index>>,
    cooldown: Cooldown,
    commands: Signal<SharedCommand<C>>,
}

impl<C: Controllable> KeyboardInputProvider<C> {
    /// Provider with no bindings.
    pub fn new(move_cooldown: Duration) -> Self {
        Self {
            mapper: ActionMapper::new(),
            cooldown: Cooldown::new(move_cooldown),
            commands: Signal::new(),
        }
    }

    /// Provider with the stock layout in [`InputContext::Primary`].
    ///
    /// | axis  | −1                     | +1                      |
    /// |-------|------------------------|-------------------------|
    /// | 0 (x) | ←, A, d-pad left       | →, D, d-pad right       |
    /// | 1 (y) | ↓, S, d-pad down       | ↑, W, d-pad up          |
    /// | 2 (z) | PgDn, Q, left shoulder | PgUp, E, right shoulder |
    ///
    /// Only axes the topology has are bound. Click is Enter, Space, left
    /// mouse button and gamepad south.
    pub fn with_default_bindings(move_cooldown: Duration) -> Self {
        let mut provider = Self::new(move_cooldown);
        let ctx = InputContext::Primary;

        let axes: [(KeyCode, KeyCode, GamepadButton, KeyCode, KeyCode, GamepadButton); 3] = [
            (KeyCode::ArrowLeft, KeyCode::KeyA, GamepadButton::DPadLeft,
             KeyCode::ArrowRight, KeyCode::KeyD, GamepadButton::DPadRight),
            (KeyCode::ArrowDown, KeyCode::KeyS, GamepadButton::DPadDown,
             KeyCode::ArrowUp, KeyCode::KeyW, GamepadButton::DPadUp),
            (KeyCode::PageDown, KeyCode::KeyQ, GamepadButton::LeftShoulder,
             KeyCode::PageUp, KeyCode::KeyE, GamepadButton::RightShoulder),
        ];

        for (axis, (neg_key, neg_alt, neg_pad, pos_key, pos_alt, pos_pad)) in
            axes.into_iter().enumerate().take(<C::Index as GridIndex>::AXES)
        {
            let step = <C::Index as GridIndex>::unit(axis, 1);
            let back = GridAction::Move(step.inverse());
            let forth = GridAction::Move(step);

            provider.mapper.bind_key(neg_key, back, ctx);
            provider.mapper.bind_key(neg_alt, back, ctx);
            provider.mapper.bind_gamepad(neg_pad, back, ctx);
            provider.mapper.bind_key(pos_key, forth, ctx);
            provider.mapper.bind_key(pos_alt, forth, ctx);
            provider.mapper.bind_gamepad(pos_pad, forth, ctx);
        }

        provider.mapper.bind_key(KeyCode::Enter, GridAction::Click, ctx);
        provider.mapper.bind_key(KeyCode::Space, GridAction::Click, ctx);
        provider.mapper.bind_mouse(MouseButton::Left, GridAction::Click, ctx);
        provider.mapper.bind_gamepad(GamepadButton::South, GridAction::Click, ctx);

        provider
    }

    //--- Bindings ---------------------------------------------------------

    pub fn mapper(&self) -> &ActionMapper<GridAction<C::Index>> {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut ActionMapper<GridAction<C::Index>> {
        &mut self.mapper
    }

    pub fn set_context(&mut self, context: InputContext) {
        debug!(target: "grid::provider", "Input context -> {:?}", context);
        self.mapper.set_context(context);
    }

    pub fn move_cooldown(&self) -> Duration {
        self.cooldown.interval()
    }

    //--- Internal Helpers -------------------------------------------------

    fn publish(&self, command: SharedCommand<C>) {
        trace!(target: "grid::provider", "Publishing {:?}", command);
        self.commands.emit(command);
    }
}

impl<C: Controllable> Tick for KeyboardInputProvider<C> {
    fn tick(&mut self, ctx: &TickContext<'_>) -> Result<()> {
        //--- Movement (held or tapped, rate limited) ----------------------
        // A key pressed and released within one tick is no longer held but
        // still counts as a step.
        let deltas: HashSet<C::Index> = self
            .mapper
            .held(ctx.input)
            .chain(self.mapper.pressed(ctx.input))
            .filter_map(|action| match action {
                GridAction::Move(delta) => Some(delta),
                GridAction::Click => None,
            })
            .collect();

        if deltas.is_empty() {
            self.cooldown.reset();
        } else {
            let zero = <C::Index as GridIndex>::origin();
            let sum = deltas.into_iter().fold(zero, <C::Index as GridIndex>::offset);
            if sum != zero && self.cooldown.try_trigger(ctx.now) {
                self.publish(Rc::new(MoveBy(sum)));
            }
        }

        //--- Click (edge) -------------------------------------------------
        let clicked = self
            .mapper
            .pressed(ctx.input)
            .any(|action| action == GridAction::Click);

        if clicked {
            self.publish(Rc::new(Click));
        }

        Ok(())
    }
}

impl<C: Controllable> InputProvider<C> for KeyboardInputProvider<C> {
    fn command_source(&self) -> CommandSource<C> {
        self.commands.source()
    }
}

impl<C: Controllable> fmt::Debug for KeyboardInputProvider<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardInputProvider")
            .field("bindings", &self.mapper.binding_count())
            .field("context", &self.mapper.current_context())
            .field("cooldown", &self.cooldown)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
