//=========================================================================
// Commands
//=========================================================================
//
// Encapsulated grid operations executed by the controller.
//
// Contract:
//   execute(current, controllable) → next current element
//
// Commands never mutate the controllable's element set and never perform
// selection transfer themselves; the controller deselects/selects when
// the returned element differs from the current one.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::error::Result;
use crate::core::grid::{Controllable, GridIndex, Interactable};

//=== Command Trait =======================================================

/// One action against the active element of a controllable.
///
/// Returning `Err` aborts the command; the controller keeps its current
/// element untouched.
pub trait Command<C: Controllable>: Debug {
    fn execute(&self, current: &Rc<C::Element>, controllable: &C) -> Result<Rc<C::Element>>;
}

/// Commands travel through signals, which clone each value per subscriber.
pub type SharedCommand<C> = Rc<dyn Command<C>>;

//=== MoveBy ==============================================================

/// Moves the active element by a delta with per-line wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveBy<I: GridIndex>(pub I);

impl<I, C> Command<C> for MoveBy<I>
where
    I: GridIndex,
    C: Controllable<Index = I>,
{
    fn execute(&self, current: &Rc<C::Element>, controllable: &C) -> Result<Rc<C::Element>> {
        let next = controllable.next_position(current.grid_index(), self.0)?;
        controllable.interactable_at(next)
    }
}

//=== Click ===============================================================

/// Clicks the active element and keeps it active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Click;

impl<C: Controllable> Command<C> for Click {
    fn execute(&self, current: &Rc<C::Element>, _controllable: &C) -> Result<Rc<C::Element>> {
        current.click();
        Ok(Rc::clone(current))
    }
}

//=== SelectAt ============================================================

/// Jumps straight to an index, e.g. from host hover hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectAt<I: GridIndex>(pub I);

impl<I, C> Command<C> for SelectAt<I>
where
    I: GridIndex,
    C: Controllable<Index = I>,
{
    fn execute(&self, _current: &Rc<C::Element>, controllable: &C) -> Result<Rc<C::Element>> {
        controllable.interactable_at(self.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GridError;
    use crate::core::grid::{GridControllable, GridElement, Index2D, KeyIndex};

    type Grid2D = GridControllable<GridElement<Index2D>>;

    //--- Test Helpers -----------------------------------------------------

    fn grid(cells: &[(i32, i32)]) -> Grid2D {
        GridControllable::from_elements(
            cells.iter().map(|&(x, y)| Rc::new(GridElement::new(Index2D::new(x, y)))),
        )
        .unwrap()
    }

    fn cell(grid: &Grid2D, x: i32, y: i32) -> Rc<GridElement<Index2D>> {
        grid.interactable_at(Index2D::new(x, y)).unwrap()
    }

    //--- MoveBy -----------------------------------------------------------

    #[test]
    fn move_by_resolves_neighbor() {
        let g = grid(&[(0, 0), (1, 0), (2, 0)]);
        let next = MoveBy(Index2D::RIGHT).execute(&cell(&g, 0, 0), &g).unwrap();
        assert_eq!(next.grid_index(), Index2D::new(1, 0));
    }

    #[test]
    fn move_by_wraps() {
        let g = grid(&[(0, 0), (1, 0), (2, 0)]);
        let next = MoveBy(Index2D::RIGHT).execute(&cell(&g, 2, 0), &g).unwrap();
        assert!(Rc::ptr_eq(&next, &cell(&g, 0, 0)));
    }

    #[test]
    fn move_by_into_gap_is_not_found() {
        let g = grid(&[(0, 0), (3, 0)]);
        let err = MoveBy(Index2D::RIGHT).execute(&cell(&g, 0, 0), &g).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn move_by_does_not_touch_selection() {
        let g = grid(&[(0, 0), (1, 0)]);
        let from = cell(&g, 0, 0);
        let next = MoveBy(Index2D::RIGHT).execute(&from, &g).unwrap();
        assert!(!from.is_selected());
        assert!(!next.is_selected());
    }

    #[test]
    fn move_by_on_key_topology_is_rejected() {
        let g = GridControllable::from_elements([Rc::new(GridElement::new(KeyIndex(0)))]).unwrap();
        let current = g.interactable_at_origin().unwrap();
        let err = MoveBy(KeyIndex(1)).execute(&current, &g).unwrap_err();
        assert!(matches!(err, GridError::InvalidArgument(_)));
    }

    //--- Click ------------------------------------------------------------

    #[test]
    fn click_fires_once_and_keeps_current() {
        let g = grid(&[(0, 0), (1, 0)]);
        let current = cell(&g, 1, 0);
        let clicks = current.clicked().subscribe();

        let next = Click.execute(&current, &g).unwrap();

        assert!(Rc::ptr_eq(&next, &current));
        assert_eq!(clicks.drain(), vec![Index2D::new(1, 0)]);
    }

    //--- SelectAt ---------------------------------------------------------

    #[test]
    fn select_at_jumps_directly() {
        let g = grid(&[(0, 0), (1, 0), (2, 2)]);
        let next = SelectAt(Index2D::new(2, 2)).execute(&cell(&g, 0, 0), &g).unwrap();
        assert_eq!(next.grid_index(), Index2D::new(2, 2));
    }

    #[test]
    fn select_at_missing_index_is_not_found() {
        let g = grid(&[(0, 0)]);
        let err = SelectAt(Index2D::new(5, 5)).execute(&cell(&g, 0, 0), &g).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn commands_are_object_safe() {
        let g = grid(&[(0, 0), (1, 0)]);
        let commands: Vec<SharedCommand<Grid2D>> = vec![
            Rc::new(MoveBy(Index2D::RIGHT)),
            Rc::new(Click),
            Rc::new(SelectAt(Index2D::new(0, 0))),
        ];

        let mut current = cell(&g, 0, 0);
        for command in &commands {
            current = command.execute(&current, &g).unwrap();
        }
        assert_eq!(current.grid_index(), Index2D::new(0, 0));
    }
}
