//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the windowing thread and the logic thread.
//
// Components:
// - `interface`: the messages and errors that cross the thread boundary
// - `event_collector`: logic-side draining of those messages per tick
//
// Nothing here names winit; the platform module depends on the bridge,
// never the other way round.
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformError, PlatformEvent};
