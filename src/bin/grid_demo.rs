//=========================================================================
// Grid Demo
//=========================================================================
//
// Opens a window and navigates a 5x5 board.
//
//   Arrows / WASD / d-pad  move (wraps at the edges)
//   Enter / Space / click  click the selected cell
//
// Usage: grid_demo [config.toml]
//
//=========================================================================

use std::rc::Rc;

use aetheric_grid::prelude::*;
use log::{error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

type Board = GridControllable<GridElement<Index2D>>;

const SIZE: i32 = 5;

//=== Feedback ============================================================

/// Logs what happened to the board each tick.
struct Feedback {
    selected: Vec<Subscription<Index2D>>,
    clicked: Vec<Subscription<Index2D>>,
}

impl Feedback {
    fn watch(cells: &[Rc<GridElement<Index2D>>]) -> Self {
        Self {
            selected: cells.iter().map(|c| c.selected().subscribe()).collect(),
            clicked: cells.iter().map(|c| c.clicked().subscribe()).collect(),
        }
    }
}

impl Tick for Feedback {
    fn tick(&mut self, _ctx: &TickContext<'_>) -> Result<()> {
        for index in self.selected.iter().flat_map(Subscription::drain) {
            info!("Selected ({}, {})", index.x, index.y);
        }
        for index in self.clicked.iter().flat_map(Subscription::drain) {
            info!("Clicked ({}, {})", index.x, index.y);
        }
        Ok(())
    }
}

//=== Session =============================================================

fn build_session(config: &GridConfig) -> Result<GridSession> {
    let cells: Vec<_> = (0..SIZE)
        .flat_map(|y| (0..SIZE).map(move |x| Rc::new(GridElement::new(Index2D::new(x, y)))))
        .collect();
    let feedback = Feedback::watch(&cells);
    let board = Rc::new(Board::from_elements(cells)?);

    let keys = KeyboardInputProvider::<Board>::with_default_bindings(config.input.move_cooldown()?);
    let controller = GridController::builder()
        .controllable(board)
        .input_provider(keys.command_source())
        .build()?;

    let mut session = GridSession::new();
    session.add_provider(keys);
    session.add_controller(controller);
    session.add_controller(feedback);
    Ok(session)
}

//=== Main ================================================================

fn main() {
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger unavailable: {}", e);
    }

    let config = match std::env::args().nth(1) {
        Some(path) => match GridConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => GridConfig::default(),
    };

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    // The session holds `Rc` cells and must be built on the logic thread;
    // a trial build here rejects a bad board before any window opens.
    if let Err(e) = build_session(&config) {
        error!("Failed to build session: {}", e);
        std::process::exit(1);
    }

    info!("Starting {}x{} grid demo", SIZE, SIZE);

    EngineBuilder::new()
        .with_config(&config)
        .build()
        .run(move || match build_session(&config) {
            Ok(session) => session,
            Err(e) => {
                error!("Failed to build session: {}", e);
                std::process::exit(1);
            }
        });
}

//=========================================================================
// Unit Tests
//=========================================================================
