//=========================================================================
// Engine
//
// Entry point that wires the window to a grid session.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(factory)──>  [Runtime]
//         │                                   │
//         ├─ with_tps()                       ├─ logic thread: factory() → GridSession
//         ├─ with_channel_capacity()          ├─ main thread:  Platform event loop
//         ├─ with_window_title()              └─ joins logic thread on close
//         └─ with_config()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::bounded;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::config::{GridConfig, WindowSection};
use crate::core::session::GridSession;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Configures an [`Engine`].
///
/// Defaults: 60 TPS, channel capacity 128, an 800x600 window titled
/// "Aetheric Grid".
///
/// ```no_run
/// use aetheric_grid::prelude::*;
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_window_title("Inventory")
///     .build()
///     .run(GridSession::new);
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    window: WindowSection,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowSection::default(),
        }
    }

    /// Logic ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0` or is not finite.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0 && tps.is_finite(), "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Bound of the platform → logic channel. When full, the windowing
    /// thread blocks until the logic thread catches up.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Applies the `[engine]` and `[window]` sections.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`with_tps`](Self::with_tps) and
    /// [`with_channel_capacity`](Self::with_channel_capacity); run
    /// [`GridConfig::validate`] first for a recoverable check.
    pub fn with_config(self, config: &GridConfig) -> Self {
        let mut builder = self
            .with_tps(config.engine.tps)
            .with_channel_capacity(config.engine.channel_capacity);
        builder.window = config.window.clone();
        builder
    }

    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, window: {:?} {}x{})",
            self.tps, self.channel_capacity, self.window.title, self.window.width, self.window.height
        );

        Engine {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Runs one grid session behind one window.
///
/// ```text
/// Engine (main thread)
///   ├─► CoreSystemsOrchestrator (logic thread @ TPS)
///   │     └─► GridSession: providers → controllers
///   │
///   └─► Platform (winit event loop)
///
/// Transport: bounded crossbeam channel of PlatformEvent
/// ```
#[derive(Debug)]
pub struct Engine {
    tps: f64,
    channel_capacity: usize,
    window: WindowSection,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Blocks until the window closes.
    ///
    /// `factory` runs once on the logic thread and builds everything the
    /// session ticks. Grid elements are `Rc` values and never cross threads.
    ///
    /// A platform failure is logged and shuts the logic thread down; a
    /// panicking logic thread is logged at join.
    pub fn run<F>(self, factory: F)
    where
        F: FnOnce() -> GridSession + Send + 'static,
    {
        info!("Starting engine runtime (TPS: {})", self.tps);

        let (tx, rx) = bounded(self.channel_capacity);
        let core_handle = CoreSystemsOrchestrator::spawn(rx, self.tps, factory);

        let platform = Platform::new(tx, self.window);
        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        match core_handle.join() {
            Ok(()) => info!("Logic thread terminated cleanly"),
            Err(e) => error!("Logic thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
