//=========================================================================
// State Tracker
//=========================================================================
//
// Device state with per-tick transitions.
//
// Architecture:
//   InputEvent → process_events() → HashSet (held) → query by providers
//
// Tick lifecycle: clear() → process_events() → query
// `advance()` runs both in order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use super::event::{GamepadButton, InputEvent, KeyCode, Modifiers, MouseButton};

//=== ButtonSet ===========================================================

/// Held set plus the transitions of the current tick, for one device.
#[derive(Debug)]
struct ButtonSet<B> {
    down: HashSet<B>,
    pressed: HashSet<B>,
    released: HashSet<B>,
}

impl<B: Copy + Eq + Hash> ButtonSet<B> {
    fn clear(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    fn press(&mut self, button: B) {
        // A repeat while held is not a new press.
        if self.down.insert(button) {
            self.pressed.insert(button);
        }
    }

    fn release(&mut self, button: B) {
        if self.down.remove(&button) {
            self.released.insert(button);
        }
    }
}

impl<B> Default for ButtonSet<B> {
    fn default() -> Self {
        Self {
            down: HashSet::new(),
            pressed: HashSet::new(),
            released: HashSet::new(),
        }
    }
}

//=== StateTracker ========================================================

/// Persistent device state (held buttons) and per-tick deltas
/// (pressed/released this tick).
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Per-Device Buttons ----------------------------------------------
    keys: ButtonSet<KeyCode>,
    mouse: ButtonSet<MouseButton>,
    gamepad: ButtonSet<GamepadButton>,

    modifiers: Modifiers,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Tick Processing --------------------------------------------------

    /// Runs one full tick over `events`.
    pub fn advance(&mut self, events: &[InputEvent]) {
        self.clear();
        self.process_events(events);
    }

    /// Drops last tick's transitions. Held state survives.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.mouse.clear();
        self.gamepad.clear();
    }

    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                self.keys.press(*key);
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                self.keys.release(*key);
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                self.mouse.press(*button);
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                self.mouse.release(*button);
            }
            InputEvent::GamepadButtonDown(button) => self.gamepad.press(*button),
            InputEvent::GamepadButtonUp(button) => self.gamepad.release(*button),
            InputEvent::ModifiersChanged(modifiers) => self.modifiers = *modifiers,
            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// `true` on the tick the key went UP → DOWN.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.pressed.contains(&key)
    }

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.down.contains(&key)
    }

    /// `true` on the tick the key went DOWN → UP.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys.released.contains(&key)
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse.pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse.down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.mouse.released.contains(&button)
    }

    //=====================================================================
    // Query API - Gamepad
    //=====================================================================

    pub fn is_gamepad_pressed(&self, button: GamepadButton) -> bool {
        self.gamepad.pressed.contains(&button)
    }

    pub fn is_gamepad_down(&self, button: GamepadButton) -> bool {
        self.gamepad.down.contains(&button)
    }

    pub fn is_gamepad_released(&self, button: GamepadButton) -> bool {
        self.gamepad.released.contains(&button)
    }

    //=====================================================================
    // Query API - Modifiers & Iteration
    //=====================================================================

    /// Modifier state from the most recent key, button or modifier event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys.down.iter()
    }

    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys.pressed.iter()
    }

    pub fn buttons_down(&self) -> impl Iterator<Item = &MouseButton> {
        self.mouse.down.iter()
    }

    pub fn gamepad_down(&self) -> impl Iterator<Item = &GamepadButton> {
        self.gamepad.down.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
