//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Contains systems that process input, manage scenes, and hand the
// current view to the renderer. Systems operate on GlobalContext data.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::input::{Action, InputContext, InputSystem};
use crate::core::scene::{SceneKey, SceneManager};
use crate::core::viewport::ViewportResized;
use crate::graphics::{RenderError, RenderSnapshot, Renderer};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `input`: Action mapping over the raw input state
/// - `scene_manager`: Stack-based scene lifecycle manager
pub struct GlobalSystems<S: SceneKey, A: Action> {
    /// Key and button bindings; publishes actions each tick.
    pub input: InputSystem<A>,

    /// Scene registration, activation, updates and transitions.
    pub scene_manager: SceneManager<S>,
}

impl<S: SceneKey, A: Action> GlobalSystems<S, A> {
    /// Creates a systems container with empty bindings and no scenes.
    ///
    /// Windowed applications configure it through [`crate::Engine::init`];
    /// headless hosts drive it directly.
    pub fn new() -> Self {
        Self {
            input: InputSystem::new(),
            scene_manager: SceneManager::new(),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one logic tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Input Processing**: Frame batches into input state and actions
    /// 2. **Action Publishing**: Stale actions cleared, fresh ones published
    /// 3. **Scene Update**: Active scenes update against the context
    /// 4. **Context Switch**: The last `InputContext` a scene pushed becomes
    ///    the active binding set for the next tick
    /// 5. **Transition Processing**: Queued scene transitions applied
    /// 6. **Resize Expiry**: This tick's `ViewportResized` dropped
    pub fn update(&mut self, context: &mut GlobalContext) {
        // 1. Process input events into state and actions
        self.input.process_frame(&mut context.input_state, &context.frame_input_events);
        context.frame_input_events.clear();

        // 2. Clear previous frame's actions and publish fresh ones
        context.message_bus.clear::<A>();
        context.message_bus.extend(self.input.actions().iter().copied());

        // 3. Update active scenes (can read actions from message bus)
        self.scene_manager.update(context);

        // 4. Apply binding-context requests
        if let Some(&requested) = context.message_bus.read::<InputContext>().last() {
            self.input.set_context(requested);
        }
        context.message_bus.clear::<InputContext>();

        // 5. Process scene transitions
        self.scene_manager.process_transitions(context);

        // 6. Resize notices live for exactly one tick
        context.message_bus.clear::<ViewportResized>();
    }

    //--- Rendering --------------------------------------------------------

    /// Draws the topmost scene's view; `Ok(false)` when nothing is shown.
    pub fn render(&self, context: &GlobalContext, renderer: &mut dyn Renderer) -> Result<bool, RenderError> {
        let Some(view) = self.scene_manager.render_view() else {
            trace!("No scene view to render");
            return Ok(false);
        };
        let snapshot = RenderSnapshot::capture(view, &context.viewport)?;
        renderer.render(&snapshot)?;
        Ok(true)
    }
}

impl<S: SceneKey, A: Action> Default for GlobalSystems<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
