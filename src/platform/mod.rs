//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Owns the OS window on the main thread and forwards everything the logic
// thread needs over the bounded channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  winit event loop        │    │  EventCollector  │
//  │   ↓                      │    │  ↓               │
//  │  InputProcessor          │    │  InputSystem     │
//  │   ↓                      │    │  ↓               │
//  │  InputBuffer             │    │  SceneManager    │
//  │   ↓ RedrawRequested      │    │  ↓               │
//  │  Sender ─────────────────┼───>│  Renderer        │
//  └──────────────────────────┘    └──────────────────┘
// ```
//
// Resize and scale-factor changes are sent immediately; input waits for
// the next redraw so one batch holds one frame of input.
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
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowSettings ======================================================

/// Initial window configuration, sizes in logical pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self { title: "Prism Lab".to_owned(), width: 1280, height: 720 }
    }
}

//=== Platform ============================================================

/// Window owner and input aggregator. Must stay on the main thread.
pub(crate) struct Platform {
    window: Option<Window>,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
    settings: WindowSettings,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// The window itself is created lazily in `resumed()`.
    pub(crate) fn new(event_sender: Sender<PlatformEvent>, settings: WindowSettings) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            settings,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when the event loop cannot be created or
    /// stops abnormally.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    fn send(&self, event: PlatformEvent) {
        if self.event_sender.send(event).is_err() {
            warn!(target: "platform", "Core channel disconnected, event dropped");
        }
    }

    fn send_resize(&self, size: PhysicalSize<u32>, scale_factor: f64) {
        trace!(target: "platform", "Surface {}x{} @{}", size.width, size.height, scale_factor);
        self.send(PlatformEvent::Resized {
            width: size.width,
            height: size.height,
            scale_factor,
        });
    }

    /// Sends the input gathered since the last redraw. Empty frames send nothing.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };
        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete.len(),
            continuous.len()
        );
        self.send(PlatformEvent::Inputs { discrete, continuous });
    }

    fn window_attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height))
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let window = event_loop
            .create_window(self.window_attributes())
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;

        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width, size.height, scale_factor
        );

        self.send_resize(size, scale_factor);
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            error!(target: "platform", "{}", e);
            self.send(PlatformEvent::WindowClosed);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                let scale_factor = self.window.as_ref().map_or(1.0, Window::scale_factor);
                self.send_resize(size, scale_factor);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    self.send_resize(window.inner_size(), scale_factor);
                }
            }

            WindowEvent::ModifiersChanged(state) => {
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_mouse_move(position.x, position.y);
                self.buffer.push_continuous(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let event = self.input_processor.process_wheel(delta);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(&key_event) {
                    self.buffer.push_discrete(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(button, state);
                self.buffer.push_discrete(event);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crossbeam_channel::unbounded;

    fn platform() -> (Platform, crossbeam_channel::Receiver<PlatformEvent>) {
        let (tx, rx) = unbounded();
        (Platform::new(tx, WindowSettings::default()), rx)
    }

    fn space() -> InputEvent {
        InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE }
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn window_is_created_lazily() {
        let (platform, _rx) = platform();
        assert!(platform.window.is_none());
        assert_eq!(platform.settings.title, "Prism Lab");
    }

    #[test]
    fn empty_flush_sends_nothing() {
        let (mut platform, rx) = platform();
        platform.flush_input_buffer();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn flush_sends_one_batch_per_frame() {
        let (mut platform, rx) = platform();
        platform.buffer.push_discrete(space());
        platform.buffer.push_continuous(InputEvent::MouseWheel { delta_x: 0.0, delta_y: 40.0 });

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete, vec![space()]);
                assert_eq!(continuous.len(), 1);
            }
            other => panic!("expected Inputs, got {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn resize_is_forwarded_in_physical_pixels() {
        let (platform, rx) = platform();
        platform.send_resize(PhysicalSize::new(2560, 1440), 2.0);

        match rx.try_recv() {
            Ok(PlatformEvent::Resized { width, height, scale_factor }) => {
                assert_eq!((width, height), (2560, 1440));
                assert_eq!(scale_factor, 2.0);
            }
            other => panic!("expected Resized, got {:?}", other),
        }
    }

    #[test]
    fn disconnected_channel_does_not_panic() {
        let (mut platform, rx) = platform();
        drop(rx);
        platform.buffer.push_discrete(space());
        platform.flush_input_buffer();
        platform.send(PlatformEvent::WindowClosed);
    }
}
