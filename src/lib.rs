//=========================================================================
// Aetheric Grid — Library Root
//
// Input-to-action dispatch for grid-structured interactive elements.
//
// Raw input (keyboard, mouse, gamepad) is turned into Commands by an
// InputProvider; a GridController applies them to a Controllable grid of
// Interactables, moving selection and forwarding clicks. The same
// controller drives 1D lists, 2D tile maps, 3D voxel grids and keyed slots.
//
// Typical usage:
// ```no_run
// use std::rc::Rc;
// use std::time::Duration;
// use aetheric_grid::prelude::*;
//
// type Hotbar = GridControllable<GridElement<Index1D>>;
//
// EngineBuilder::new().build().run(|| {
//     let slots = (0..9).map(|i| Rc::new(GridElement::new(Index1D(i))));
//     let hotbar = Rc::new(Hotbar::from_elements(slots).unwrap());
//     let keys = KeyboardInputProvider::with_default_bindings(Duration::from_millis(150));
//     let controller = GridController::builder()
//         .controllable(hotbar)
//         .input_provider(keys.command_source())
//         .build()
//         .unwrap();
//
//     let mut session = GridSession::new();
//     session.add_provider(keys);
//     session.add_controller(controller);
//     session
// });
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` holds the winit integration and stays private; hosts reach
// it only through `Engine`.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
