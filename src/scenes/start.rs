//=========================================================================
// Start
//=========================================================================
//
// A single squashed, tilted wireframe cube seen from a camera aimed at it.
//
//=========================================================================

use std::f32::consts::PI;

use glam::Vec3;

use super::stage::Stage;
use super::{navigate, LabScene};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::graphics::{Color, Geometry, Material, NodeId, RenderView};

pub struct StartScene {
    stage: Stage,
    mesh: NodeId,
}

impl StartScene {
    pub fn new() -> Self {
        let mut stage = Stage::new(75.0, 0.1, 2000.0, Vec3::new(0.0, 0.0, 3.0));

        let mesh = stage.graph.add_mesh(Geometry::cube(1.0), Material::basic(Color::RED).wireframe());
        if let Some(transform) = stage.graph.transform_mut(mesh) {
            transform.scale = Vec3::new(1.5, 0.5, 1.0);
            transform.rotation = Vec3::new(0.0, PI * 0.3, PI * 0.25);
            transform.position = Vec3::new(0.0, 0.5, 0.0);
        }
        stage.look_at(Vec3::new(0.0, 0.5, 0.0));

        Self { stage, mesh }
    }
}

impl Default for StartScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<LabScene> for StartScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::Start) {
            return;
        }
        self.stage.update(context);
    }

    fn render_view(&self) -> Option<RenderView<'_>> {
        Some(self.stage.view())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_looks_at_the_cube() {
        let mut scene = StartScene::new();
        assert!(scene.stage.graph.node_material_mut(scene.mesh).unwrap().wireframe);

        let graph = &scene.stage.graph;
        let camera = graph.transform(scene.stage.camera).unwrap();
        let cube = graph.world_position(scene.mesh).unwrap();

        let forward = camera.quaternion() * Vec3::NEG_Z;
        let to_cube = (cube - camera.position).normalize();
        assert!(forward.dot(to_cube) > 0.9999);
    }
}
