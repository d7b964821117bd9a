//=========================================================================
// Stage
//=========================================================================
//
// Graph, camera and optional orbit controls shared by every exercise.
//
//   enter()   camera aspect from the current viewport
//   update()  aspect on ViewportResized, then orbit input and damping
//   view()    graph + camera for the renderer
//
//=========================================================================

use glam::Vec3;

use crate::core::globals::GlobalContext;
use crate::graphics::{Node, NodeId, OrbitControls, PerspectiveCamera, RenderView, SceneGraph};

#[derive(Debug)]
pub(crate) struct Stage {
    pub graph: SceneGraph,
    pub camera: NodeId,
    controls: Option<OrbitControls>,
}

impl Stage {
    /// Empty graph with a root-level camera at `position`, looking down -Z.
    pub fn new(fov: f32, near: f32, far: f32, position: Vec3) -> Self {
        let mut graph = SceneGraph::new();
        let camera = graph.add(Node::camera(PerspectiveCamera::new(fov, 1.0, near, far)).named("camera").at(position));
        Self { graph, camera, controls: None }
    }

    /// Stage around a graph whose camera node the caller already placed.
    pub fn with_camera(graph: SceneGraph, camera: NodeId) -> Self {
        Self { graph, camera, controls: None }
    }

    /// Adds damped orbit controls around `target` and aims the camera.
    pub fn orbit(mut self, target: Vec3) -> Self {
        let mut controls = OrbitControls::damped(target);
        if let Some(transform) = self.graph.transform_mut(self.camera) {
            controls.update(transform);
        }
        self.controls = Some(controls);
        self
    }

    pub fn look_at(&mut self, target: Vec3) {
        if let Some(transform) = self.graph.transform_mut(self.camera) {
            transform.look_at(target);
        }
    }

    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref()
    }

    //--- Lifecycle --------------------------------------------------------

    pub fn enter(&mut self, context: &GlobalContext) {
        self.set_aspect(context.viewport.aspect());
    }

    pub fn update(&mut self, context: &GlobalContext) {
        if let Some(viewport) = context.resized() {
            self.set_aspect(viewport.aspect());
        }

        if let Some(controls) = &mut self.controls {
            controls.handle_input(&context.input_state, context.viewport.height as f32);
            if let Some(transform) = self.graph.transform_mut(self.camera) {
                controls.update(transform);
            }
        }
    }

    pub fn view(&self) -> RenderView<'_> {
        RenderView { graph: &self.graph, camera: self.camera }
    }

    fn set_aspect(&mut self, aspect: f32) {
        if let Some(camera) = self.graph.camera_mut(self.camera) {
            camera.set_aspect(aspect);
        }
    }
}

/// Feeds one frame of raw input into the context, as the input system does.
#[cfg(test)]
pub(crate) fn input_frame(context: &mut GlobalContext, events: &[crate::core::input::InputEvent]) {
    context.input_state.clear();
    context.input_state.process_events(events);
    context.input_state.finalize_frame();
}

//=========================================================================
// Unit Tests
//=========================================================================
