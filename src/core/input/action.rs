//=========================================================================
// Action Trait & Input Context
//=========================================================================
//
// Actions: opaque identifiers routed by the host, interpreted by scenes.
// Contexts: separate binding sets (scene navigation vs. panel editing).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for application-defined action enums.
///
/// Actions are mapped from raw key/button presses and published on the
/// message bus every tick; scenes read them with
/// `context.message_bus.read::<A>()`.
///
/// ```
/// use prism_lab::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum DemoAction { CreateSphere, CreateBox }
///
/// impl Action for DemoAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== InputContext ========================================================

/// Identifies which set of input bindings is currently active.
///
/// Raw state queries on the `StateTracker` work regardless of context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputContext {
    /// Default context.
    #[default]
    Primary,

    /// User-defined context.
    Custom(u32),
}

impl InputContext {
    /// Creates a custom context.
    ///
    /// ```
    /// # use prism_lab::prelude::*;
    /// const PANEL: InputContext = InputContext::custom(0);
    /// ```
    #[inline]
    pub const fn custom(id: u32) -> Self {
        Self::Custom(id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
