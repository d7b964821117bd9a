//=========================================================================
// Scene System
//=========================================================================
//
// Manages scene lifecycle and stack-based scene switching.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene>>
//     └─ stack: Vec<S>
//
// Flow:
//   update() → collect_active_scenes() → Scene::update()
//   render_view() → topmost scene that exposes a view
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::graphics::RenderView;

//=== Module Declarations =================================================

mod scene_manager;

//=== Public API ==========================================================

pub use scene_manager::{SceneKey, SceneManager, SceneTransition};

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and update logic.
///
/// Scenes are registered in SceneManager and activated via scene stack.
/// Each scene keeps its own graph, camera and state between activations.
///
/// # Minimal Implementation
///
/// Only `update()` is required:
///
/// ```rust
/// # use prism_lab::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum LabKey { Main }
/// # impl SceneKey for LabKey {}
/// struct Empty;
///
/// impl Scene<LabKey> for Empty {
///     fn update(&mut self, context: &mut GlobalContext) {
///         let _dt = context.clock.delta();
///     }
/// }
/// ```
pub trait Scene<S: SceneKey>: Send {
    /// Called when the scene enters the active stack.
    fn on_enter(&mut self, _context: &mut GlobalContext) {}

    /// Called when the scene leaves the active stack.
    fn on_exit(&mut self, _context: &mut GlobalContext) {}

    /// Called every tick while the scene is active.
    fn update(&mut self, context: &mut GlobalContext);

    /// Graph and camera to draw this tick; `None` draws nothing.
    fn render_view(&self) -> Option<RenderView<'_>> {
        None
    }

    /// Whether scenes below this one should keep updating.
    ///
    /// Transparent scenes (overlays) let the scene underneath continue.
    fn is_transparent(&self) -> bool {
        false
    }
}
