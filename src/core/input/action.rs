//=========================================================================
// Action Trait & Input Context
//=========================================================================
//
// Actions: host-meaningful identifiers produced by bindings.
// Contexts: independent binding sets (e.g. board vs pause menu) of which
// exactly one is active at a time.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for values an [`ActionMapper`](super::ActionMapper)
/// resolves bindings into.
///
/// ```
/// use aetheric_grid::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MenuAction { Confirm, Back }
///
/// impl Action for MenuAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== InputContext ========================================================

/// Selects which set of bindings is live.
///
/// The same key may mean "move right" on the board and "next tab" in a
/// menu; switching context swaps the meaning without rebinding.
///
/// ```
/// # use aetheric_grid::prelude::*;
/// const BOARD: InputContext = InputContext::Primary;
/// const PAUSE_MENU: InputContext = InputContext::custom(0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputContext {
    #[default]
    Primary,

    Custom(u32),
}

impl InputContext {
    #[inline]
    pub const fn custom(id: u32) -> Self {
        Self::Custom(id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Confirm,
        Back,
    }

    impl Action for TestAction {}

    #[test]
    fn actions_deduplicate_in_sets() {
        let set: HashSet<_> = [TestAction::Confirm, TestAction::Confirm, TestAction::Back]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn actions_cross_threads() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<TestAction>();
    }

    #[test]
    fn primary_is_default_context() {
        assert_eq!(InputContext::default(), InputContext::Primary);
    }

    #[test]
    fn custom_contexts_are_distinct() {
        assert_ne!(InputContext::custom(0), InputContext::custom(1));
        assert_ne!(InputContext::custom(0), InputContext::Primary);
        assert_eq!(InputContext::custom(7), InputContext::Custom(7));
    }
}
