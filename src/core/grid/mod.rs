//=========================================================================
// Grid Model
//=========================================================================
//
// Indexing abstraction and element ownership for navigable grids.
//
// Architecture:
//   GridIndex ←── Interactable::grid_index()
//                      ↑
//   Controllable ── owns Rc<Interactable> ──> lookup / next_position
//
//=========================================================================

//=== Module Declarations =================================================

mod controllable;
mod index;
mod interactable;

//=== Public API ==========================================================

pub use controllable::{wrap_position, Controllable, GridControllable, Readiness};
pub use index::{GridIndex, Index1D, Index2D, Index3D, KeyIndex};
pub use interactable::{GridElement, Interactable};
