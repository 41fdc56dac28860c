//=========================================================================
// Platform
//=========================================================================
//
// Owns the OS window and turns winit events into bridge messages.
//
// Architecture:
// ```text
//  Main thread                          Logic thread
//  ┌─────────────────────────────┐      ┌───────────────────────────┐
//  │ winit event loop            │      │ EventCollector            │
//  │   ↓                         │      │   ↓                       │
//  │ InputProcessor (modifiers)  │      │ StateTracker              │
//  │   ↓                         │      │   ↓                       │
//  │ InputBuffer                 │      │ GridSession::tick         │
//  │   ↓ RedrawRequested         │      │   providers → controllers │
//  │ Sender<PlatformEvent> ──────┼─────→│                           │
//  └─────────────────────────────┘      └───────────────────────────┘
// ```
//
// RedrawRequested is the frame boundary: buffered input is sent as one
// message, empty frames are skipped. If the logic thread has gone away the
// platform keeps running so the window can still be closed.
//
// winit requires the event loop on the main thread on macOS and iOS, so
// `Engine::run` calls `Platform::run` from the caller's thread.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::config::WindowSection;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Not `Send`; lives and dies on the main thread.
pub(crate) struct Platform {
    settings: WindowSection,
    window: Option<Window>,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
}

impl Platform {
    pub(crate) fn new(event_sender: Sender<PlatformEvent>, settings: WindowSection) -> Self {
        info!(target: "platform", "Platform initialized for window {:?}", settings.title);
        Self {
            settings,
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    /// Blocks until the window closes.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the event loop cannot be created or fails while
    /// running.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    fn window_attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height))
    }

    fn notify_closed(&self) {
        if self.event_sender.send(PlatformEvent::WindowClosed).is_err() {
            debug!(target: "platform", "Logic thread already gone at close");
        }
    }

    /// Sends this frame's input as one message; no-op when nothing arrived.
    fn flush_input_buffer(&mut self) {
        let Some(events) = self.buffer.drain() else {
            return;
        };

        let count = events.len();
        trace!(target: "platform::input", "Flushing {} input events", count);

        if self.event_sender.send(PlatformEvent::Inputs(events)).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping {} events", count);
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(self.window_attributes()) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.notify_closed();
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.notify_closed();
                event_loop.exit();
            }

            WindowEvent::ModifiersChanged(state) => {
                if let Some(event) = self.input_processor.update_modifiers(state.state()) {
                    self.buffer.push(event);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(&event) {
                    self.buffer.push(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(button, state);
                self.buffer.push(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
