//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between the window thread and the logic thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Messages sent from the platform thread over the bounded channel.
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    /// Input gathered between two redraws.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window surface changed size or monitor scale factor.
    ///
    /// Sizes are physical pixels.
    Resized {
        width: u32,
        height: u32,
        scale_factor: f64,
    },

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    #[error("event loop error: {0}")]
    EventLoopExecution(String),

    #[error("window creation failed: {0}")]
    WindowCreation(String),
}
