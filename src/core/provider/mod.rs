//=========================================================================
// Input Providers
//=========================================================================
//
// Components that sample an input source each tick and publish commands.
//
// Architecture:
//   StateTracker ─→ provider.tick() ─→ Signal<SharedCommand<C>>
//                                          │ (one inbox per subscriber)
//                                          ↓
//                                    GridController
//
// Providers own the outbound signal; controllers only ever see the weak
// `CommandSource`, so dropping a provider disconnects it.
//
//=========================================================================

//=== Module Declarations =================================================

mod cooldown;
mod keyboard;
mod queued;

//=== Internal Dependencies ===============================================

use crate::core::command::SharedCommand;
use crate::core::session::Tick;
use crate::core::signal::SignalSource;

//=== Public API ==========================================================

pub use cooldown::Cooldown;
pub use keyboard::{GridAction, KeyboardInputProvider};
pub use queued::QueuedInputProvider;

/// Subscribe-only view of a provider's command channel.
pub type CommandSource<C> = SignalSource<SharedCommand<C>>;

//=== InputProvider Trait =================================================

/// Samples input on [`Tick::tick`] and publishes commands for `C`.
pub trait InputProvider<C>: Tick {
    fn command_source(&self) -> CommandSource<C>;
}
