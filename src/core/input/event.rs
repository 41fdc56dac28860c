//=========================================================================
// Input Event Types
//=========================================================================
//
// Portable representation of raw device input.
//
// Event Flow:
// ```text
// Platform Layer (Winit) / host gamepad driver
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held / pressed / released)
//         ↓
//    InputProvider → Command
// ```
//
// Modifier state travels twice: stamped on every key and button event,
// and on its own as `ModifiersChanged` when Shift/Ctrl/Alt change between
// transitions, so held bindings re-match without waiting for a key.
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,

    /// Side, thumb and macro buttons.
    Other,
}

//=== GamepadButton =======================================================

/// Gamepad button by physical position (south = A on Xbox, Cross on PS).
///
/// Winit does not surface gamepads; hosts feed these from their own
/// driver through [`InputEvent::GamepadButtonDown`]/`Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    South,
    East,
    West,
    North,
    Start,
    Select,
    LeftShoulder,
    RightShoulder,
}

//=== KeyCode =============================================================

/// Physical keyboard key, independent of layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Navigation Keys --------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    PageUp,
    PageDown,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Key the platform reported but the engine does not map.
    Unidentified,
}

//=== InputEvent ==========================================================

/// One raw input transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    GamepadButtonDown(GamepadButton),

    GamepadButtonUp(GamepadButton),

    /// Modifier keys changed with no other transition.
    ModifiersChanged(Modifiers),

    /// Unsupported event; ignored downstream.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state. Left and right variants are not distinguished.
///
/// Bindings match modifiers exactly: `Ctrl+S` does not fire on
/// `Ctrl+Shift+S`, and `S` does not fire on `Ctrl+S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

//--- Modifier Constants --------------------------------------------------

impl Modifiers {
    pub const NONE: Self = Self::new(false, false, false);
    pub const SHIFT: Self = Self::new(true, false, false);
    pub const CTRL: Self = Self::new(false, true, false);
    pub const ALT: Self = Self::new(false, false, true);
    pub const SHIFT_CTRL: Self = Self::new(true, true, false);
    pub const SHIFT_ALT: Self = Self::new(true, false, true);
    pub const CTRL_ALT: Self = Self::new(false, true, true);
    pub const ALL: Self = Self::new(true, true, true);

    #[inline]
    pub const fn new(shift: bool, ctrl: bool, alt: bool) -> Self {
        Self { shift, ctrl, alt }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn key_down(key: KeyCode, modifiers: Modifiers) -> InputEvent {
        InputEvent::KeyDown { key, modifiers }
    }

    //=====================================================================
    // Equality
    //=====================================================================

    #[test]
    fn same_key_same_modifiers_are_equal() {
        assert_eq!(
            key_down(KeyCode::KeyA, Modifiers::CTRL),
            key_down(KeyCode::KeyA, Modifiers::CTRL)
        );
    }

    #[test]
    fn modifiers_distinguish_events() {
        assert_ne!(
            key_down(KeyCode::KeyA, Modifiers::CTRL),
            key_down(KeyCode::KeyA, Modifiers::SHIFT)
        );
    }

    #[test]
    fn down_and_up_differ() {
        let up = InputEvent::KeyUp { key: KeyCode::KeyA, modifiers: Modifiers::NONE };
        assert_ne!(key_down(KeyCode::KeyA, Modifiers::NONE), up);
        assert_ne!(
            InputEvent::GamepadButtonDown(GamepadButton::South),
            InputEvent::GamepadButtonUp(GamepadButton::South)
        );
    }

    #[test]
    fn gamepad_buttons_compare_by_button() {
        assert_eq!(
            InputEvent::GamepadButtonDown(GamepadButton::DPadUp),
            InputEvent::GamepadButtonDown(GamepadButton::DPadUp)
        );
        assert_ne!(
            InputEvent::GamepadButtonDown(GamepadButton::DPadUp),
            InputEvent::GamepadButtonDown(GamepadButton::DPadDown)
        );
    }

    #[test]
    fn modifier_changes_compare_by_state() {
        assert_eq!(
            InputEvent::ModifiersChanged(Modifiers::SHIFT),
            InputEvent::ModifiersChanged(Modifiers::SHIFT)
        );
        assert_ne!(
            InputEvent::ModifiersChanged(Modifiers::SHIFT),
            InputEvent::ModifiersChanged(Modifiers::NONE)
        );
    }

    //=====================================================================
    // Modifiers
    //=====================================================================

    #[test]
    fn modifier_constants() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert!(Modifiers::SHIFT_CTRL.shift && Modifiers::SHIFT_CTRL.ctrl);
        assert!(!Modifiers::SHIFT_CTRL.alt);
        assert_eq!(Modifiers::ALL, Modifiers::new(true, true, true));
        assert_ne!(Modifiers::CTRL_ALT, Modifiers::SHIFT_ALT);
    }
}
