//=========================================================================
// Interactable
//=========================================================================
//
// Grid elements that answer index queries and react to selection/clicks.
//
// The grid core never creates or destroys elements. The host scene builds
// them, wraps them in `Rc`, and hands them to a `Controllable`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::fmt;

//=== Internal Dependencies ===============================================

use super::index::GridIndex;
use crate::core::signal::Signal;

//=== Interactable Trait ==================================================

/// An element that can be selected, deselected and clicked.
///
/// All callbacks take `&self`; implementors own their state through
/// interior mutability, since elements are shared between the
/// controllable, the controller, and host code.
pub trait Interactable {
    type Index: GridIndex;

    /// Position of this element under its controllable.
    fn grid_index(&self) -> Self::Index;

    fn select(&self);

    fn deselect(&self);

    fn click(&self);

    fn is_selected(&self) -> bool;

    //--- Notifications ----------------------------------------------------

    /// Fires with the element's index when it becomes selected.
    fn selected(&self) -> &Signal<Self::Index>;

    /// Fires with the element's index when it stops being selected.
    fn deselected(&self) -> &Signal<Self::Index>;

    /// Fires with the element's index on every click.
    fn clicked(&self) -> &Signal<Self::Index>;
}

//=== GridElement =========================================================

/// Reference [`Interactable`] with observable event channels.
///
/// `selected`/`deselected` fire only on an actual state change; `clicked`
/// fires on every click. Each notification carries the element's index.
///
/// ```
/// use aetheric_grid::prelude::*;
///
/// let cell = GridElement::new(Index2D::new(1, 0));
/// let clicks = cell.clicked().subscribe();
///
/// cell.click();
/// assert_eq!(clicks.drain(), vec![Index2D::new(1, 0)]);
/// ```
pub struct GridElement<I: GridIndex> {
    index: I,
    selected: Cell<bool>,
    on_selected: Signal<I>,
    on_deselected: Signal<I>,
    on_clicked: Signal<I>,
}

impl<I: GridIndex> GridElement<I> {
    pub fn new(index: I) -> Self {
        Self {
            index,
            selected: Cell::new(false),
            on_selected: Signal::new(),
            on_deselected: Signal::new(),
            on_clicked: Signal::new(),
        }
    }
}

impl<I: GridIndex> Interactable for GridElement<I> {
    type Index = I;

    fn grid_index(&self) -> I {
        self.index
    }

    fn select(&self) {
        if !self.selected.replace(true) {
            self.on_selected.emit(self.index);
        }
    }

    fn deselect(&self) {
        if self.selected.replace(false) {
            self.on_deselected.emit(self.index);
        }
    }

    fn click(&self) {
        self.on_clicked.emit(self.index);
    }

    fn is_selected(&self) -> bool {
        self.selected.get()
    }

    fn selected(&self) -> &Signal<I> {
        &self.on_selected
    }

    fn deselected(&self) -> &Signal<I> {
        &self.on_deselected
    }

    fn clicked(&self) -> &Signal<I> {
        &self.on_clicked
    }
}

impl<I: GridIndex> fmt::Debug for GridElement<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridElement")
            .field("index", &self.index)
            .field("selected", &self.selected.get())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::index::Index2D;
    use crate::core::signal::Subscription;

    #[test]
    fn reports_its_index() {
        let cell = GridElement::new(Index2D::new(2, 3));
        assert_eq!(cell.grid_index(), Index2D::new(2, 3));
    }

    #[test]
    fn starts_deselected() {
        let cell = GridElement::new(Index2D::new(0, 0));
        assert!(!cell.is_selected());
    }

    #[test]
    fn select_fires_once_per_transition() {
        let cell = GridElement::new(Index2D::new(0, 0));
        let selected = cell.selected().subscribe();

        cell.select();
        cell.select();

        assert!(cell.is_selected());
        assert_eq!(selected.drain().len(), 1);
    }

    #[test]
    fn deselect_without_select_is_silent() {
        let cell = GridElement::new(Index2D::new(0, 0));
        let deselected = cell.deselected().subscribe();

        cell.deselect();

        assert!(deselected.drain().is_empty());
    }

    #[test]
    fn select_then_deselect_fires_both() {
        let cell = GridElement::new(Index2D::new(4, 4));
        let selected = cell.selected().subscribe();
        let deselected = cell.deselected().subscribe();

        cell.select();
        cell.deselect();

        assert_eq!(selected.drain(), vec![Index2D::new(4, 4)]);
        assert_eq!(deselected.drain(), vec![Index2D::new(4, 4)]);
        assert!(!cell.is_selected());
    }

    #[test]
    fn every_click_fires() {
        let cell = GridElement::new(Index2D::new(1, 1));
        let clicked = cell.clicked().subscribe();

        cell.click();
        cell.click();

        assert_eq!(clicked.drain().len(), 2);
    }

    /// Host-side observer written against the trait only.
    fn watch<E: Interactable>(element: &E) -> [Subscription<E::Index>; 3] {
        [
            element.selected().subscribe(),
            element.deselected().subscribe(),
            element.clicked().subscribe(),
        ]
    }

    #[test]
    fn notifications_are_reachable_through_the_trait() {
        let cell = GridElement::new(Index2D::new(2, 1));
        let [selected, deselected, clicked] = watch(&cell);

        cell.select();
        cell.click();
        cell.deselect();

        assert_eq!(selected.drain(), vec![Index2D::new(2, 1)]);
        assert_eq!(clicked.drain(), vec![Index2D::new(2, 1)]);
        assert_eq!(deselected.drain(), vec![Index2D::new(2, 1)]);
    }

    #[test]
    fn click_does_not_change_selection() {
        let cell = GridElement::new(Index2D::new(1, 1));
        cell.click();
        assert!(!cell.is_selected());
    }
}
