//=========================================================================
// Queued Input Provider
//=========================================================================
//
// Host-fed provider: commands enqueued between ticks are published on the
// next tick, in enqueue order. Used for hover hit-testing, scripted
// navigation and tests.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use log::trace;

//=== Internal Dependencies ===============================================

use super::{CommandSource, InputProvider};
use crate::core::command::{Command, SharedCommand};
use crate::core::error::Result;
use crate::core::grid::Controllable;
use crate::core::session::{Tick, TickContext};
use crate::core::signal::Signal;

//=== QueuedInputProvider =================================================

pub struct QueuedInputProvider<C: Controllable> {
    pending: VecDeque<SharedCommand<C>>,
    commands: Signal<SharedCommand<C>>,
}

impl<C: Controllable> QueuedInputProvider<C> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            commands: Signal::new(),
        }
    }

    pub fn enqueue<K: Command<C> + 'static>(&mut self, command: K) {
        self.pending.push_back(Rc::new(command));
    }

    pub fn enqueue_shared(&mut self, command: SharedCommand<C>) {
        self.pending.push_back(command);
    }

    /// Commands waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl<C: Controllable> Tick for QueuedInputProvider<C> {
    fn tick(&mut self, _ctx: &TickContext<'_>) -> Result<()> {
        for command in self.pending.drain(..) {
            trace!(target: "grid::provider", "Publishing queued {:?}", command);
            self.commands.emit(command);
        }
        Ok(())
    }
}

impl<C: Controllable> InputProvider<C> for QueuedInputProvider<C> {
    fn command_source(&self) -> CommandSource<C> {
        self.commands.source()
    }
}

impl<C: Controllable> Default for QueuedInputProvider<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Controllable> fmt::Debug for QueuedInputProvider<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedInputProvider")
            .field("pending", &self.pending)
            .field("subscribers", &self.commands.subscriber_count())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use crate::core::command::{Click, MoveBy};
    use crate::core::grid::{GridControllable, GridElement, Index1D, Interactable};
    use crate::core::input::StateTracker;

    type List = GridControllable<GridElement<Index1D>>;

    fn tick(provider: &mut QueuedInputProvider<List>) {
        let input = StateTracker::new();
        provider.tick(&TickContext::new(&input, Instant::now())).unwrap();
    }

    #[test]
    fn publishes_on_next_tick_in_order() {
        let list = List::from_elements((0..4).map(|i| Rc::new(GridElement::new(Index1D(i))))).unwrap();
        let mut provider = QueuedInputProvider::<List>::new();
        let inbox = provider.command_source().subscribe().unwrap();

        provider.enqueue(MoveBy(Index1D(2)));
        provider.enqueue(MoveBy(Index1D::NEXT));
        assert_eq!(inbox.pending(), 0);

        tick(&mut provider);

        let mut current = list.interactable_at_origin().unwrap();
        for command in inbox.drain() {
            current = command.execute(&current, &list).unwrap();
        }
        assert_eq!(current.grid_index(), Index1D(3));
        assert_eq!(provider.pending(), 0);
    }

    #[test]
    fn empty_queue_publishes_nothing() {
        let mut provider = QueuedInputProvider::<List>::new();
        let inbox = provider.command_source().subscribe().unwrap();

        tick(&mut provider);

        assert!(inbox.drain().is_empty());
    }

    #[test]
    fn each_subscriber_receives_every_command() {
        let mut provider = QueuedInputProvider::<List>::new();
        let first = provider.command_source().subscribe().unwrap();
        let second = provider.command_source().subscribe().unwrap();

        provider.enqueue(Click);
        tick(&mut provider);

        assert_eq!(first.pending(), 1);
        assert_eq!(second.pending(), 1);
    }

    #[test]
    fn dropped_provider_kills_source() {
        let provider = QueuedInputProvider::<List>::new();
        let source = provider.command_source();
        drop(provider);

        assert!(!source.is_live());
        assert!(source.subscribe().is_err());
    }
}
