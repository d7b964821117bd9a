//=========================================================================
// Scroll Based Animation
//=========================================================================
//
// A tall page of three sections, one toon mesh per section. Scrolling
// moves the camera down the page; entering a new section spins its mesh.
// The camera rig drifts toward the cursor for parallax.
//
//   camera.y = -scroll_y / viewport_height · OBJECT_DISTANCE
//   section  = round(scroll_y / viewport_height)
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Vec2, Vec3};
use log::debug;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::assets::Assets;
use super::stage::Stage;
use super::{drive_panel, navigate, LabScene};
use crate::animation::{Easing, Property, Target, Tween, Tweens};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::debug_panel::{ControlId, DebugPanel, PanelEventKind};
use crate::graphics::{
    Color, Filter, Geometry, Light, Material, MaterialId, Node, NodeId, PerspectiveCamera, PointCloud, RenderView,
    SceneGraph,
};
use crate::procedural::scatter_particles;

//=== Constants ===========================================================

/// Vertical spacing between section meshes, in world units.
const OBJECT_DISTANCE: f32 = 4.0;
const PARTICLES: usize = 200;
const MATERIAL_COLOR: u32 = 0xfa0000;
const PARTICLES_COLOR: u32 = 0x94a3f0;

//=== ScrollScene =========================================================

pub struct ScrollScene {
    stage: Stage,
    rig: NodeId,
    sections: Vec<NodeId>,
    mesh_material: MaterialId,
    particles_material: MaterialId,
    current_section: usize,
    tweens: Tweens,
    panel: DebugPanel,
    material_color: ControlId,
    particles_color: ControlId,
}

impl ScrollScene {
    pub fn new<R: Rng + ?Sized>(assets: &Assets, rng: &mut R) -> Self {
        let mut graph = SceneGraph::new();
        graph.background = None;

        //--- Section meshes -----------------------------------------------
        let gradient = assets.texture_with("/textures/gradients/3.jpg", |texture| {
            texture.mag_filter = Filter::Nearest;
        });
        let mesh_material = graph.add_material(Material::toon(Color::hex(MATERIAL_COLOR), gradient));

        let shapes = [
            (Geometry::torus(1.0, 0.4, 16, 60), 2.0),
            (Geometry::cone(1.0, 2.0, 32), -2.0),
            (Geometry::torus_knot(0.8, 0.35, 100, 16), 2.0),
        ];
        let sections: Vec<NodeId> = shapes
            .into_iter()
            .enumerate()
            .map(|(i, (geometry, x))| {
                let geometry = graph.add_geometry(geometry);
                graph.add(
                    Node::mesh(geometry, mesh_material)
                        .named("section")
                        .at(Vec3::new(x, -OBJECT_DISTANCE * i as f32, 0.0)),
                )
            })
            .collect();

        //--- Particles ----------------------------------------------------
        let positions = scatter_particles(rng, PARTICLES, OBJECT_DISTANCE, sections.len());
        let particles = graph.add_geometry(Geometry::Points(PointCloud::new(positions)));
        let mut dust = Material::points(0.03, true);
        dust.color = Color::hex(PARTICLES_COLOR);
        let particles_material = graph.add_material(dust);
        graph.add(Node::points(particles, particles_material).named("particles"));

        graph.add(Node::light(Light::directional(Color::WHITE, 1.0)).at(Vec3::new(1.0, 1.0, 0.0)));

        //--- Camera rig ---------------------------------------------------
        let rig = graph.add(Node::group().named("camera rig"));
        let camera = graph
            .add_child(
                rig,
                Node::camera(PerspectiveCamera::new(35.0, 1.0, 0.1, 100.0))
                    .named("camera")
                    .at(Vec3::new(0.0, 0.0, 6.0)),
            )
            .unwrap_or(rig);

        let mut panel = DebugPanel::new(LabScene::ScrollAnimation.title());
        let material_color = panel.add_color("materialColor", Color::hex(MATERIAL_COLOR));
        let particles_color = panel.add_color("particlesColor", Color::hex(PARTICLES_COLOR));

        Self {
            stage: Stage::with_camera(graph, camera),
            rig,
            sections,
            mesh_material,
            particles_material,
            current_section: 0,
            tweens: Tweens::new(),
            panel,
            material_color,
            particles_color,
        }
    }

    /// Page height beyond the first screen, in pixels.
    fn scroll_limit(&self, viewport_height: f32) -> f32 {
        self.sections.len().saturating_sub(1) as f32 * viewport_height
    }

    fn apply_panel(&mut self, control: ControlId) {
        let (material, color) = if control == self.material_color {
            (self.mesh_material, self.panel.color(self.material_color))
        } else if control == self.particles_color {
            (self.particles_material, self.panel.color(self.particles_color))
        } else {
            return;
        };
        if let (Some(material), Some(color)) = (self.stage.graph.material_mut(material), color) {
            material.color = color;
        }
    }

    fn enter_section(&mut self, section: usize) {
        self.current_section = section;
        let Some(&mesh) = self.sections.get(section) else {
            debug!("Scrolled past the last section ({})", section);
            return;
        };
        self.tweens.add(
            Tween::to(mesh, Property::Rotation, 2.0)
                .ease(Easing::Power2InOut)
                .x(Target::Relative(3.0))
                .y(Target::Relative(3.0))
                .z(Target::Relative(1.5)),
        );
    }
}

impl Scene<LabScene> for ScrollScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
        let limit = self.scroll_limit(context.viewport.height as f32);
        context.input_state.reset_scroll();
        context.input_state.set_scroll_limit(Some(limit));
        self.current_section = 0;
    }

    fn on_exit(&mut self, context: &mut GlobalContext) {
        context.input_state.set_scroll_limit(None);
        context.input_state.reset_scroll();
        self.tweens.clear();
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::ScrollAnimation) {
            return;
        }

        drive_panel(context, &mut self.panel);
        for event in self.panel.drain_events() {
            if event.kind == PanelEventKind::Changed {
                self.apply_panel(event.control);
            }
        }

        if let Some(viewport) = context.resized() {
            let limit = self.scroll_limit(viewport.height as f32);
            context.input_state.set_scroll_limit(Some(limit));
        }

        let dt = context.clock.delta();
        let height = context.viewport.height as f32;
        let scroll_y = context.input_state.scroll_offset().y;

        if height > 0.0 {
            let section = (scroll_y / height).round() as usize;
            if section != self.current_section {
                self.enter_section(section);
            }
        }

        //--- Camera -------------------------------------------------------
        if let Some(transform) = self.stage.graph.transform_mut(self.stage.camera) {
            transform.position.y = if height > 0.0 { -scroll_y / height * OBJECT_DISTANCE } else { 0.0 };
        }

        let cursor = context.input_state.cursor_normalized(context.viewport.width as f32, height);
        let parallax = Vec2::new(cursor.x, -cursor.y);
        if let Some(transform) = self.stage.graph.transform_mut(self.rig) {
            transform.position.x += (parallax.x - transform.position.x) * dt;
            transform.position.y += (parallax.y - transform.position.y) * dt;
        }

        //--- Meshes -------------------------------------------------------
        for &mesh in &self.sections {
            if let Some(transform) = self.stage.graph.transform_mut(mesh) {
                transform.rotation.x += dt * 0.3;
                transform.rotation.y += dt * 0.2;
            }
        }
        self.tweens.update(&mut self.stage.graph, dt);

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
    use crate::core::input::InputEvent;
    use crate::core::viewport::Viewport;
    use crate::scenes::stage::input_frame;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn entered() -> (ScrollScene, GlobalContext) {
        let assets = Assets::new("/nonexistent/prism-lab-assets");
        let mut scene = ScrollScene::new(&assets, &mut ChaCha8Rng::seed_from_u64(4));
        let mut context = GlobalContext::new(Viewport::new(800, 600, 1.0));
        scene.on_enter(&mut context);
        (scene, context)
    }

    fn scroll(scene: &mut ScrollScene, context: &mut GlobalContext, pixels: f32) {
        input_frame(context, &[InputEvent::MouseWheel { delta_x: 0.0, delta_y: pixels }]);
        context.clock.advance(1.0 / 60.0);
        scene.update(context);
    }

    //=====================================================================
    // Scroll Tests
    //=====================================================================

    #[test]
    fn camera_tracks_scroll_offset() {
        let (mut scene, mut context) = entered();
        scroll(&mut scene, &mut context, 300.0);

        let y = scene.stage.graph.transform(scene.stage.camera).unwrap().position.y;
        assert!((y + 2.0).abs() < 1e-5);
    }

    #[test]
    fn scroll_is_clamped_to_page() {
        let (mut scene, mut context) = entered();
        scroll(&mut scene, &mut context, 10_000.0);
        assert_eq!(context.input_state.scroll_offset().y, 1200.0);

        let y = scene.stage.graph.transform(scene.stage.camera).unwrap().position.y;
        assert!((y + 8.0).abs() < 1e-5);
    }

    #[test]
    fn each_section_change_starts_one_tween() {
        let (mut scene, mut context) = entered();

        scroll(&mut scene, &mut context, 200.0);
        assert!(scene.tweens.is_empty());

        scroll(&mut scene, &mut context, 200.0);
        assert_eq!(scene.current_section, 1);
        assert_eq!(scene.tweens.len(), 1);
        assert!(scene.tweens.is_animating(scene.sections[1]));

        scroll(&mut scene, &mut context, 100.0);
        assert_eq!(scene.tweens.len(), 1);
    }

    #[test]
    fn section_tween_adds_relative_rotation() {
        let (mut scene, mut context) = entered();
        scroll(&mut scene, &mut context, 600.0);
        let mesh = scene.sections[1];
        let start = scene.stage.graph.transform(mesh).unwrap().rotation;

        for _ in 0..150 {
            input_frame(&mut context, &[]);
            context.clock.advance(1.0 / 60.0);
            scene.update(&mut context);
        }

        assert!(scene.tweens.is_empty());
        let end = scene.stage.graph.transform(mesh).unwrap().rotation;
        assert!((end.z - start.z - 1.5).abs() < 1e-3, "z moved {}", end.z - start.z);
    }

    #[test]
    fn exit_releases_the_page() {
        let (mut scene, mut context) = entered();
        scroll(&mut scene, &mut context, 500.0);
        scene.on_exit(&mut context);
        assert_eq!(context.input_state.scroll_offset().y, 0.0);
    }

    //=====================================================================
    // Parallax Tests
    //=====================================================================

    #[test]
    fn rig_eases_toward_cursor() {
        let (mut scene, mut context) = entered();
        input_frame(&mut context, &[InputEvent::MouseMoved { x: 800.0, y: 0.0 }]);
        context.clock.advance(0.5);
        scene.update(&mut context);

        let rig = scene.stage.graph.transform(scene.rig).unwrap().position;
        assert!((rig.x - 0.25).abs() < 1e-5);
        assert!((rig.y - 0.25).abs() < 1e-5);
    }

    #[test]
    fn renders_three_sections_over_transparent_background() {
        let (scene, context) = entered();
        let snapshot =
            crate::graphics::RenderSnapshot::capture(scene.render_view().unwrap(), &context.viewport).unwrap();
        assert_eq!(snapshot.meshes().count(), 3);
        assert!(scene.stage.graph.background.is_none());
    }

    #[test]
    fn panel_increase_shifts_material_hue() {
        let (mut scene, mut context) = entered();
        let before = scene.stage.graph.material(scene.mesh_material).unwrap().color;
        assert_eq!(scene.panel.selected(), Some(scene.material_color));

        context.message_bus.push(crate::scenes::LabAction::PanelIncrease);
        scene.update(&mut context);

        let after = scene.stage.graph.material(scene.mesh_material).unwrap().color;
        assert_ne!(after.to_hex(), before.to_hex());
        assert_eq!(Some(after), scene.panel.color(scene.material_color));
        let (hue, _, _) = after.to_hsl();
        assert!((hue - crate::debug_panel::HUE_STEP).abs() < 1e-4);
    }
}
