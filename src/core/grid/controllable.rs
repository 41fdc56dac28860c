//=========================================================================
// Controllable
//=========================================================================
//
// Aggregate owning one grid's element set and its index-transition logic.
//
// Architecture:
//   assemble() ──> OnceCell<Vec<Rc<E>>> ──> interactable_at()  (linear)
//        │                               └─> next_position()   (wrap)
//        └──> Signal<Readiness>::Ready
//
// Wraparound is confined to the occupied extent of the current line
// along each axis, so jagged grids wrap per row/column rather than per
// global bounding box. Cells beyond a line's extent are jumped over; an
// empty cell inside it is still a valid target, and the lookup that
// follows reports NotFound.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, OnceCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::index::GridIndex;
use super::interactable::Interactable;
use crate::core::error::{GridError, Result};
use crate::core::signal::Signal;

//=== Readiness ===========================================================

/// Level notifications emitted by a controllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Readiness {
    /// The element set is final; navigation may start.
    Ready,

    /// Interaction is suspended (pause, game over, scene exit).
    NotReady,
}

//=== Controllable Trait ==================================================

/// Owner of a grid's interactables.
///
/// Only [`interactables`](Self::interactables), [`readiness`](Self::readiness)
/// and [`is_ready`](Self::is_ready) are required; lookups and wraparound
/// have default implementations over the element slice.
pub trait Controllable {
    type Index: GridIndex;
    type Element: Interactable<Index = Self::Index>;

    /// Current element set.
    ///
    /// # Errors
    ///
    /// [`GridError::InvariantViolation`] if the set was never assembled.
    fn interactables(&self) -> Result<&[Rc<Self::Element>]>;

    /// Readiness channel observed by controllers.
    fn readiness(&self) -> &Signal<Readiness>;

    fn is_ready(&self) -> bool;

    /// Finds the element whose index equals `index`.
    fn interactable_at(&self, index: Self::Index) -> Result<Rc<Self::Element>> {
        self.interactables()?
            .iter()
            .find(|element| element.grid_index() == index)
            .cloned()
            .ok_or_else(|| GridError::not_found(index))
    }

    /// Element at the topology's zero index.
    fn interactable_at_origin(&self) -> Result<Rc<Self::Element>> {
        self.interactable_at(Self::Index::origin())
    }

    /// Neighbor of `current` after applying `delta` with per-line wraparound.
    fn next_position(&self, current: Self::Index, delta: Self::Index) -> Result<Self::Index> {
        wrap_position(self.interactables()?, current, delta)
    }
}

//=== Wraparound ==========================================================

/// Computes the wraparound-adjusted neighbor of `current`.
///
/// For every axis, the extent is the min/max coordinate among elements that
/// share all *other* components with `current`. The coordinate is shifted
/// to a zero-based range, offset by the delta, reduced modulo the span and
/// shifted back. A line holding a single element never moves.
///
/// # Errors
///
/// - [`GridError::InvalidArgument`] for key-based topologies
/// - [`GridError::NotFound`] if `current` lies on no occupied line
pub fn wrap_position<E: Interactable>(
    elements: &[Rc<E>],
    current: E::Index,
    delta: E::Index,
) -> Result<E::Index> {
    let axes = <E::Index as GridIndex>::AXES;
    if axes == 0 {
        return Err(GridError::InvalidArgument(format!(
            "topology of {:?} has no arithmetic axes",
            current
        )));
    }

    let mut next = current;
    for axis in 0..axes {
        let (min, max) =
            line_extent(elements, current, axis).ok_or_else(|| GridError::not_found(current))?;

        let span = i64::from(max) - i64::from(min) + 1;
        let shifted = i64::from(current.axis(axis)) - i64::from(min) + i64::from(delta.axis(axis));
        let wrapped = shifted.rem_euclid(span) + i64::from(min);

        let coordinate = i32::try_from(wrapped).map_err(|_| {
            GridError::InvariantViolation(format!("wrapped coordinate {} left i32 range", wrapped))
        })?;
        next = next.with_axis(axis, coordinate);
    }

    Ok(next)
}

/// Min/max of `axis` over elements aligned with `current` on every other axis.
fn line_extent<E: Interactable>(
    elements: &[Rc<E>],
    current: E::Index,
    axis: usize,
) -> Option<(i32, i32)> {
    let axes = <E::Index as GridIndex>::AXES;

    elements
        .iter()
        .map(|element| element.grid_index())
        .filter(|index| {
            (0..axes).all(|other| other == axis || index.axis(other) == current.axis(other))
        })
        .map(|index| index.axis(axis))
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
}

//=== GridControllable ====================================================

/// Reference [`Controllable`] assembled once from host-built elements.
///
/// ```
/// use std::rc::Rc;
/// use aetheric_grid::prelude::*;
///
/// let grid = GridControllable::new();
/// grid.assemble((0..5).map(|x| Rc::new(GridElement::new(Index2D::new(x, 0)))))
///     .unwrap();
///
/// let wrapped = grid.next_position(Index2D::new(4, 0), Index2D::RIGHT).unwrap();
/// assert_eq!(wrapped, Index2D::new(0, 0));
/// ```
pub struct GridControllable<E: Interactable> {
    elements: OnceCell<Vec<Rc<E>>>,
    ready: Cell<bool>,
    readiness: Signal<Readiness>,
}

impl<E: Interactable> GridControllable<E> {
    /// Creates an empty, not-ready controllable.
    pub fn new() -> Self {
        Self {
            elements: OnceCell::new(),
            ready: Cell::new(false),
            readiness: Signal::new(),
        }
    }

    /// Creates a controllable that is already assembled and ready.
    pub fn from_elements<T>(elements: T) -> Result<Self>
    where
        T: IntoIterator<Item = Rc<E>>,
    {
        let controllable = Self::new();
        controllable.assemble(elements)?;
        Ok(controllable)
    }

    //--- Lifecycle --------------------------------------------------------

    /// Finalizes the element set and emits [`Readiness::Ready`].
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidArgument`] if the set was already assembled.
    pub fn assemble<T>(&self, elements: T) -> Result<()>
    where
        T: IntoIterator<Item = Rc<E>>,
    {
        let elements: Vec<Rc<E>> = elements.into_iter().collect();

        let mut seen = HashSet::with_capacity(elements.len());
        for element in &elements {
            let index = element.grid_index();
            if !seen.insert(index) {
                warn!("Duplicate grid index {:?}; lookups resolve to the first element", index);
            }
        }

        let count = elements.len();
        self.elements.set(elements).map_err(|_| {
            GridError::InvalidArgument("element set has already been assembled".into())
        })?;

        info!("Grid assembled with {} interactables", count);
        self.set_ready(true);
        Ok(())
    }

    /// Suspends interaction (pause, game over). No-op when not ready.
    pub fn suspend(&self) {
        self.set_ready(false);
    }

    /// Resumes interaction after [`suspend`](Self::suspend).
    ///
    /// # Errors
    ///
    /// [`GridError::InvariantViolation`] if the set was never assembled.
    pub fn resume(&self) -> Result<()> {
        if self.elements.get().is_none() {
            return Err(GridError::InvariantViolation(
                "cannot resume a grid that was never assembled".into(),
            ));
        }
        self.set_ready(true);
        Ok(())
    }

    /// Number of assembled elements (zero before assembly).
    pub fn len(&self) -> usize {
        self.elements.get().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    //--- Internal Helpers -------------------------------------------------

    fn set_ready(&self, ready: bool) {
        if self.ready.replace(ready) == ready {
            return;
        }

        let level = if ready { Readiness::Ready } else { Readiness::NotReady };
        debug!("Grid readiness -> {:?}", level);
        self.readiness.emit(level);
    }
}

impl<E: Interactable> Controllable for GridControllable<E> {
    type Index = E::Index;
    type Element = E;

    fn interactables(&self) -> Result<&[Rc<E>]> {
        self.elements.get().map(Vec::as_slice).ok_or_else(|| {
            GridError::InvariantViolation("element set has not been assembled".into())
        })
    }

    fn readiness(&self) -> &Signal<Readiness> {
        &self.readiness
    }

    fn is_ready(&self) -> bool {
        self.ready.get()
    }
}

impl<E: Interactable> Default for GridControllable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Interactable> fmt::Debug for GridControllable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridControllable")
            .field("elements", &self.len())
            .field("ready", &self.ready.get())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::index::{Index1D, Index2D, Index3D, KeyIndex};
    use crate::core::grid::interactable::GridElement;

    //--- Test Helpers -----------------------------------------------------

    fn grid_of<I: GridIndex>(indices: &[I]) -> GridControllable<GridElement<I>> {
        GridControllable::from_elements(indices.iter().map(|&i| Rc::new(GridElement::new(i))))
            .unwrap()
    }

    fn rect(width: i32, height: i32) -> GridControllable<GridElement<Index2D>> {
        let cells: Vec<Index2D> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Index2D::new(x, y)))
            .collect();
        grid_of(&cells)
    }

    fn at(x: i32, y: i32) -> Index2D {
        Index2D::new(x, y)
    }

    //=====================================================================
    // Lookup
    //=====================================================================

    #[test]
    fn lookup_round_trips_for_every_element() {
        let grid = rect(5, 5);
        for element in grid.interactables().unwrap() {
            let index = element.grid_index();
            assert_eq!(grid.interactable_at(index).unwrap().grid_index(), index);
        }
    }

    #[test]
    fn lookup_returns_the_shared_element() {
        let cell = Rc::new(GridElement::new(at(0, 0)));
        let grid = GridControllable::from_elements([cell.clone()]).unwrap();
        assert!(Rc::ptr_eq(&grid.interactable_at(at(0, 0)).unwrap(), &cell));
    }

    #[test]
    fn lookup_miss_is_not_found() {
        let grid = rect(2, 2);
        assert!(grid.interactable_at(at(9, 9)).unwrap_err().is_not_found());
    }

    #[test]
    fn origin_lookup() {
        let grid = rect(3, 3);
        assert_eq!(grid.interactable_at_origin().unwrap().grid_index(), at(0, 0));
    }

    #[test]
    fn origin_missing_is_not_found() {
        let grid = grid_of(&[at(1, 1), at(2, 1)]);
        assert!(grid.interactable_at_origin().unwrap_err().is_not_found());
    }

    #[test]
    fn unassembled_grid_is_invariant_violation() {
        let grid = GridControllable::<GridElement<Index2D>>::new();
        assert!(matches!(
            grid.interactable_at(at(0, 0)),
            Err(GridError::InvariantViolation(_))
        ));
        assert!(matches!(
            grid.next_position(at(0, 0), Index2D::RIGHT),
            Err(GridError::InvariantViolation(_))
        ));
    }

    #[test]
    fn interactables_view_is_restartable() {
        let grid = rect(3, 1);
        let first: Vec<_> = grid.interactables().unwrap().iter().map(|e| e.grid_index()).collect();
        let second: Vec<_> = grid.interactables().unwrap().iter().map(|e| e.grid_index()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    //=====================================================================
    // Wraparound
    //=====================================================================

    #[test]
    fn zero_delta_is_identity() {
        let grid = rect(5, 5);
        for element in grid.interactables().unwrap() {
            let index = element.grid_index();
            assert_eq!(grid.next_position(index, at(0, 0)).unwrap(), index);
        }
    }

    #[test]
    fn wraps_right_edge_to_left() {
        let grid = rect(5, 1);
        assert_eq!(grid.next_position(at(4, 0), at(1, 0)).unwrap(), at(0, 0));
    }

    #[test]
    fn wraps_left_edge_to_right() {
        let grid = rect(5, 1);
        assert_eq!(grid.next_position(at(0, 0), at(-1, 0)).unwrap(), at(4, 0));
    }

    #[test]
    fn wraps_vertically() {
        let grid = rect(3, 4);
        assert_eq!(grid.next_position(at(1, 3), Index2D::UP).unwrap(), at(1, 0));
        assert_eq!(grid.next_position(at(1, 0), Index2D::DOWN).unwrap(), at(1, 3));
    }

    #[test]
    fn large_deltas_reduce_modulo_span() {
        let grid = rect(5, 1);
        assert_eq!(grid.next_position(at(1, 0), at(12, 0)).unwrap(), at(3, 0));
        assert_eq!(grid.next_position(at(1, 0), at(-12, 0)).unwrap(), at(4, 0));
    }

    #[test]
    fn single_element_row_never_moves_horizontally() {
        let grid = grid_of(&[at(0, 0), at(1, 0), at(2, 0), at(3, 2)]);
        assert_eq!(grid.next_position(at(3, 2), at(5, 0)).unwrap(), at(3, 2));
        assert_eq!(grid.next_position(at(3, 2), at(-1, 0)).unwrap(), at(3, 2));
    }

    #[test]
    fn jagged_rows_wrap_within_their_own_extent() {
        // Row 0: x in 0..=4, row 1: x in 1..=2
        let grid = grid_of(&[
            at(0, 0), at(1, 0), at(2, 0), at(3, 0), at(4, 0),
            at(1, 1), at(2, 1),
        ]);
        assert_eq!(grid.next_position(at(2, 1), Index2D::RIGHT).unwrap(), at(1, 1));
        assert_eq!(grid.next_position(at(1, 1), Index2D::LEFT).unwrap(), at(2, 1));
        assert_eq!(grid.next_position(at(4, 0), Index2D::RIGHT).unwrap(), at(0, 0));
    }

    #[test]
    fn gaps_inside_a_line_are_part_of_the_extent() {
        let grid = grid_of(&[at(0, 0), at(4, 0)]);
        // Lands on the empty cell; resolution is left to the caller.
        assert_eq!(grid.next_position(at(0, 0), Index2D::RIGHT).unwrap(), at(1, 0));
        assert!(grid.interactable_at(at(1, 0)).unwrap_err().is_not_found());
    }

    #[test]
    fn negative_coordinates_wrap() {
        let grid = grid_of(&[at(-2, 0), at(-1, 0), at(0, 0)]);
        assert_eq!(grid.next_position(at(-2, 0), Index2D::LEFT).unwrap(), at(0, 0));
        assert_eq!(grid.next_position(at(0, 0), Index2D::RIGHT).unwrap(), at(-2, 0));
    }

    #[test]
    fn unknown_line_is_not_found() {
        let grid = rect(3, 3);
        assert!(grid
            .next_position(at(0, 10), Index2D::RIGHT)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn one_dimensional_wrap() {
        let grid = grid_of(&[Index1D(0), Index1D(1), Index1D(2)]);
        assert_eq!(grid.next_position(Index1D(2), Index1D::NEXT).unwrap(), Index1D(0));
        assert_eq!(grid.next_position(Index1D(0), Index1D::PREVIOUS).unwrap(), Index1D(2));
    }

    #[test]
    fn three_dimensional_wrap_per_axis() {
        let cells: Vec<Index3D> = (0..2)
            .flat_map(|z| (0..2).flat_map(move |y| (0..3).map(move |x| Index3D::new(x, y, z))))
            .collect();
        let grid = grid_of(&cells);

        assert_eq!(
            grid.next_position(Index3D::new(2, 1, 1), Index3D::new(1, 1, 1)).unwrap(),
            Index3D::new(0, 0, 0)
        );
        assert_eq!(
            grid.next_position(Index3D::new(0, 0, 0), Index3D::BACK).unwrap(),
            Index3D::new(0, 0, 1)
        );
    }

    #[test]
    fn key_topology_rejects_movement() {
        let grid = grid_of(&[KeyIndex(0), KeyIndex(7)]);
        assert!(matches!(
            grid.next_position(KeyIndex(0), KeyIndex(1)),
            Err(GridError::InvalidArgument(_))
        ));
        assert_eq!(grid.interactable_at(KeyIndex(7)).unwrap().grid_index(), KeyIndex(7));
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn assemble_emits_ready_once() {
        let grid = GridControllable::<GridElement<Index2D>>::new();
        let readiness = grid.readiness().subscribe();
        assert!(!grid.is_ready());

        grid.assemble([Rc::new(GridElement::new(at(0, 0)))]).unwrap();

        assert!(grid.is_ready());
        assert_eq!(readiness.drain(), vec![Readiness::Ready]);
    }

    #[test]
    fn second_assemble_is_rejected() {
        let grid = rect(1, 1);
        let err = grid.assemble([Rc::new(GridElement::new(at(5, 5)))]).unwrap_err();
        assert!(matches!(err, GridError::InvalidArgument(_)));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn suspend_and_resume_emit_levels() {
        let grid = rect(2, 2);
        let readiness = grid.readiness().subscribe();

        grid.suspend();
        grid.suspend();
        grid.resume().unwrap();
        grid.resume().unwrap();

        assert_eq!(readiness.drain(), vec![Readiness::NotReady, Readiness::Ready]);
    }

    #[test]
    fn resume_before_assembly_fails() {
        let grid = GridControllable::<GridElement<Index2D>>::new();
        assert!(matches!(grid.resume(), Err(GridError::InvariantViolation(_))));
        assert!(!grid.is_ready());
    }

    #[test]
    fn length_tracks_assembly() {
        let grid = GridControllable::<GridElement<Index2D>>::new();
        assert!(grid.is_empty());
        grid.assemble((0..4).map(|x| Rc::new(GridElement::new(at(x, 0))))).unwrap();
        assert_eq!(grid.len(), 4);
    }
}
