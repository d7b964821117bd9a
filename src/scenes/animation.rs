//=========================================================================
// Animation
//=========================================================================
//
// Three ways to move things:
//   red    tweened along x (to 3 after 1 s, back to -1.5 after 3 s) and
//          spun at 0.001 rad per millisecond
//   green  rotation.x = elapsed seconds
//   blue   y = sin(elapsed) · 0.5
//
// Tweens and the local clock restart every time the scene is entered.
//
//=========================================================================

use std::f32::consts::PI;

use glam::Vec3;

use super::stage::Stage;
use super::{navigate, LabScene};
use crate::animation::{Property, Target, Tween, Tweens};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::graphics::{Color, Geometry, Material, Node, NodeId, RenderView};

const SPIN_PER_MS: f32 = 0.001;
const RED_HOME: Vec3 = Vec3::new(-1.5, 1.0, 0.0);

pub struct AnimationScene {
    stage: Stage,
    tweened: NodeId,
    spinning: NodeId,
    bobbing: NodeId,
    tweens: Tweens,
    elapsed: f32,
}

impl AnimationScene {
    pub fn new() -> Self {
        let mut stage = Stage::new(75.0, 0.1, 2000.0, Vec3::new(0.0, 0.0, 3.0));
        let graph = &mut stage.graph;
        let geometry = graph.add_geometry(Geometry::cube(1.0));

        let mut mesh = |color: Color, node: fn(Node) -> Node| {
            let material = graph.add_material(Material::basic(color).wireframe());
            graph.add(node(Node::mesh(geometry, material)))
        };

        let tweened = mesh(Color::RED, |n| {
            n.named("tweened")
                .at(RED_HOME)
                .rotated(Vec3::new(0.0, PI * 0.3, PI * 0.25))
                .scaled(Vec3::new(1.5, 0.5, 1.0))
        });
        let spinning = mesh(Color::GREEN, |n| {
            n.named("spinning").at(Vec3::new(-1.5, -1.0, 0.0)).scaled(Vec3::new(1.5, 0.5, 1.0))
        });
        let bobbing = mesh(Color::BLUE, |n| n.named("bobbing").at(Vec3::new(1.5, 0.0, 0.0)));

        Self { stage, tweened, spinning, bobbing, tweens: Tweens::new(), elapsed: 0.0 }
    }

    fn restart(&mut self) {
        self.elapsed = 0.0;
        self.tweens.clear();
        if let Some(transform) = self.stage.graph.transform_mut(self.tweened) {
            transform.position = RED_HOME;
        }

        self.tweens.add(Tween::to(self.tweened, Property::Position, 1.0).x(Target::Absolute(3.0)).delay(1.0));
        self.tweens.add(Tween::to(self.tweened, Property::Position, 1.0).x(Target::Absolute(-1.5)).delay(3.0));
    }
}

impl Default for AnimationScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<LabScene> for AnimationScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
        self.restart();
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::Animation) {
            return;
        }
        self.stage.update(context);

        let dt = context.clock.delta();
        self.elapsed += dt;

        let graph = &mut self.stage.graph;
        self.tweens.update(graph, dt);

        if let Some(transform) = graph.transform_mut(self.tweened) {
            let spin = SPIN_PER_MS * dt * 1000.0;
            transform.rotation.x += spin;
            transform.rotation.y += spin;
        }
        if let Some(transform) = graph.transform_mut(self.spinning) {
            transform.rotation.x = self.elapsed;
        }
        if let Some(transform) = graph.transform_mut(self.bobbing) {
            transform.position.y = self.elapsed.sin() * 0.5;
        }
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

    fn run(scene: &mut AnimationScene, context: &mut GlobalContext, seconds: f32) {
        let steps = (seconds / 0.05).round() as usize;
        for _ in 0..steps {
            context.clock.advance(0.05);
            scene.update(context);
        }
    }

    fn x_of(scene: &AnimationScene, node: NodeId) -> f32 {
        scene.stage.graph.transform(node).unwrap().position.x
    }

    #[test]
    fn red_cube_goes_out_and_back() {
        let mut context = GlobalContext::default();
        let mut scene = AnimationScene::new();
        scene.on_enter(&mut context);

        run(&mut scene, &mut context, 1.0);
        assert!((x_of(&scene, scene.tweened) + 1.5).abs() < 1e-4);

        run(&mut scene, &mut context, 1.0);
        assert!((x_of(&scene, scene.tweened) - 3.0).abs() < 1e-3);

        run(&mut scene, &mut context, 2.1);
        assert!((x_of(&scene, scene.tweened) + 1.5).abs() < 1e-3);
        assert!(scene.tweens.is_empty());
    }

    #[test]
    fn formulas_follow_local_clock() {
        let mut context = GlobalContext::default();
        let mut scene = AnimationScene::new();
        scene.on_enter(&mut context);
        run(&mut scene, &mut context, 0.5);

        let graph = &scene.stage.graph;
        assert!((graph.transform(scene.spinning).unwrap().rotation.x - 0.5).abs() < 1e-4);
        assert!((graph.transform(scene.bobbing).unwrap().position.y - 0.5f32.sin() * 0.5).abs() < 1e-4);
        assert!((graph.transform(scene.tweened).unwrap().rotation.x - 0.5).abs() < 1e-3);
    }

    #[test]
    fn reentering_restarts_tweens() {
        let mut context = GlobalContext::default();
        let mut scene = AnimationScene::new();
        scene.on_enter(&mut context);
        run(&mut scene, &mut context, 1.5);
        assert!(x_of(&scene, scene.tweened) > -1.5);

        scene.on_enter(&mut context);
        assert_eq!(x_of(&scene, scene.tweened), -1.5);
        assert_eq!(scene.tweens.len(), 2);
    }
}
