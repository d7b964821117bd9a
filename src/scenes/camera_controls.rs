//=========================================================================
// Camera Controls
//=========================================================================
//
// Segmented wireframe cube inspected with damped orbit controls.
//
//=========================================================================

use glam::Vec3;

use super::stage::Stage;
use super::{navigate, LabScene};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::graphics::{Color, Geometry, Material, RenderView};

pub struct CameraControlsScene {
    stage: Stage,
}

impl CameraControlsScene {
    pub fn new() -> Self {
        let mut stage = Stage::new(75.0, 0.1, 1000.0, Vec3::new(0.0, 0.0, 3.0));
        stage.graph.add_mesh(
            Geometry::segmented_cuboid(1.0, 1.0, 1.0, [5, 5, 5]),
            Material::basic(Color::RED).wireframe(),
        );
        Self { stage: stage.orbit(Vec3::ZERO) }
    }
}

impl Default for CameraControlsScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<LabScene> for CameraControlsScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::CameraControls) {
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
    use crate::core::input::{InputEvent, Modifiers, MouseButton};
    use crate::scenes::stage::input_frame;

    #[test]
    fn dragging_orbits_at_constant_distance() {
        let mut scene = CameraControlsScene::new();
        let mut context = GlobalContext::default();
        scene.on_enter(&mut context);

        input_frame(&mut context, &[InputEvent::MouseMoved { x: 100.0, y: 100.0 }]);
        input_frame(
            &mut context,
            &[
                InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE },
                InputEvent::MouseMoved { x: 160.0, y: 100.0 },
            ],
        );
        scene.update(&mut context);
        for _ in 0..30 {
            input_frame(&mut context, &[]);
            scene.update(&mut context);
        }

        let camera = scene.stage.graph.transform(scene.stage.camera).unwrap().position;
        assert!((camera - Vec3::new(0.0, 0.0, 3.0)).length() > 0.1);
        assert!(camera.y.abs() < 1e-3);
        assert!((camera.length() - 3.0).abs() < 1e-3);
    }
}
