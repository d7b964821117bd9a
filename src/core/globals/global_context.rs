//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - input_state: Low-level input state (keys, mouse, wheel, scroll)
// - message_bus: Actions, scene transitions, resize and scene messages
// - viewport:    Surface size and pixel ratio
// - clock:       Elapsed and delta time
//
//=========================================================================

//=== Internal Dependencies ===============================================

use log::debug;

use crate::core::clock::Clock;
use crate::core::input::{InputEvent, StateTracker};
use crate::core::message_bus::MessageBus;
use crate::core::viewport::{Viewport, ViewportResized};

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
///
/// Scenes receive `&mut GlobalContext` in their lifecycle methods. Engine
/// systems that act on it live in `GlobalSystems`.
pub struct GlobalContext {
    /// Raw input state tracker for low-level input queries.
    pub input_state: StateTracker,

    /// Type-keyed message queues shared by systems and scenes.
    pub message_bus: MessageBus,

    /// Current surface size.
    pub viewport: Viewport,

    /// Time since start and since the previous tick.
    pub clock: Clock,

    /// Input batches for the current frame, consumed by the InputSystem.
    pub(crate) frame_input_events: Vec<Vec<InputEvent>>,
}

impl GlobalContext {
    /// Creates a context with empty state for a surface of `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            input_state: StateTracker::new(),
            message_bus: MessageBus::new(),
            viewport,
            clock: Clock::new(),
            frame_input_events: Vec::new(),
        }
    }

    /// Queues one input batch for the next update.
    pub fn push_input(&mut self, batch: Vec<InputEvent>) {
        if !batch.is_empty() {
            self.frame_input_events.push(batch);
        }
    }

    /// Applies a surface resize and publishes [`ViewportResized`] when the
    /// size or scale factor actually changed.
    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) -> bool {
        if !self.viewport.apply_resize(width, height, scale_factor) {
            return false;
        }
        debug!("Viewport resized to {}x{} @ {}x", width, height, scale_factor);
        self.message_bus.push(ViewportResized { viewport: self.viewport });
        true
    }

    /// The resize published this tick, if any.
    pub fn resized(&self) -> Option<Viewport> {
        self.message_bus
            .read::<ViewportResized>()
            .last()
            .map(|resized| resized.viewport)
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
