//=========================================================================
// Lights
//=========================================================================
//
// Every light type at once over slowly tumbling shapes, each light with
// its helper gizmo. The panel toggles the gizmos.
//
//=========================================================================

use std::f32::consts::PI;

use glam::Vec3;

use super::stage::Stage;
use super::{drive_panel, navigate, LabScene};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::debug_panel::{ControlId, DebugPanel, PanelEventKind};
use crate::graphics::{Color, Geometry, HelperKind, Light, Material, Node, NodeId, RenderView};

pub struct LightsScene {
    stage: Stage,
    shapes: Vec<NodeId>,
    helpers: Vec<NodeId>,
    panel: DebugPanel,
    show_helpers: ControlId,
    elapsed: f32,
}

impl LightsScene {
    pub fn new() -> Self {
        let mut stage = Stage::new(75.0, 0.1, 100.0, Vec3::new(1.0, 1.0, 4.0));
        let graph = &mut stage.graph;

        //--- Lights -------------------------------------------------------
        graph.add(Node::light(Light::ambient(Color::WHITE, 0.1)).named("ambient"));
        let directional = graph.add(
            Node::light(Light::directional(Color::hex(0x00ffff), 0.3))
                .named("directional")
                .at(Vec3::new(2.0, 1.0, 0.0)),
        );
        let hemisphere = graph.add(
            Node::light(Light::hemisphere(Color::hex(0xff00ff), Color::hex(0x00ff00), 0.5))
                .named("hemisphere")
                .at(Vec3::Y),
        );
        let point = graph.add(
            Node::light(Light::point(Color::hex(0xf0ff0f), 0.5, 10.0, 2.0))
                .named("point")
                .at(Vec3::new(1.0, -0.3, 0.9)),
        );
        let rect_area = graph.add(
            Node::light(Light::rect_area(Color::hex(0x4e00ff), 2.0, 2.0, 1.0))
                .named("rect area")
                .at(Vec3::new(-1.0, 0.0, 1.5)),
        );
        if let Some(transform) = graph.transform_mut(rect_area) {
            transform.look_at(Vec3::ZERO);
        }
        let spot = graph.add(
            Node::light(Light::spot(Color::hex(0x78ff00), 1.0, 6.0, PI * 0.1, 0.25, 1.0))
                .named("spot")
                .at(Vec3::new(0.0, 2.0, 3.0)),
        );

        let helpers = [
            (directional, 0.2),
            (hemisphere, 0.2),
            (point, 0.2),
            (rect_area, 1.0),
            (spot, 1.0),
        ]
        .into_iter()
        .map(|(subject, size)| graph.add(Node::helper(subject, HelperKind::Light { size })))
        .collect();

        //--- Objects ------------------------------------------------------
        let material = graph.add_material(Material::standard(Color::WHITE, 0.0, 0.4));
        let mut mesh = |geometry: Geometry, x: f32| {
            let geometry = graph.add_geometry(geometry);
            graph.add(Node::mesh(geometry, material).at(Vec3::new(x, 0.0, 0.0)))
        };
        let shapes = vec![
            mesh(Geometry::sphere(0.5, 32, 32), -1.5),
            mesh(Geometry::cube(0.75), 0.0),
            mesh(Geometry::torus(0.3, 0.2, 32, 64), 1.5),
        ];

        let floor = graph.add_geometry(Geometry::plane(5.0, 5.0));
        graph.add(
            Node::mesh(floor, material)
                .named("floor")
                .at(Vec3::new(0.0, -0.65, 0.0))
                .rotated(Vec3::new(-PI * 0.5, 0.0, 0.0)),
        );

        let mut panel = DebugPanel::new(LabScene::Lights.title());
        let show_helpers = panel.add_toggle("helpers", true);

        Self { stage: stage.orbit(Vec3::ZERO), shapes, helpers, panel, show_helpers, elapsed: 0.0 }
    }
}

impl Default for LightsScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<LabScene> for LightsScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::Lights) {
            return;
        }

        drive_panel(context, &mut self.panel);
        for event in self.panel.drain_events() {
            if event.kind == PanelEventKind::Changed && event.control == self.show_helpers {
                let visible = self.panel.toggle(self.show_helpers).unwrap_or(true);
                for &helper in &self.helpers {
                    self.stage.graph.set_visible(helper, visible);
                }
            }
        }

        self.elapsed += context.clock.delta();
        for &shape in &self.shapes {
            if let Some(transform) = self.stage.graph.transform_mut(shape) {
                transform.rotation.x = 0.15 * self.elapsed;
                transform.rotation.y = 0.1 * self.elapsed;
            }
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
    use crate::graphics::{HeadlessRenderer, RenderSnapshot, Renderer};
    use crate::scenes::LabAction;

    #[test]
    fn all_six_lights_and_five_helpers_render() {
        let scene = LightsScene::new();
        let context = GlobalContext::default();
        let snapshot = RenderSnapshot::capture(scene.render_view().unwrap(), &context.viewport).unwrap();

        let mut renderer = HeadlessRenderer::new();
        renderer.render(&snapshot).unwrap();
        assert_eq!(renderer.last_frame().lights, 6);
        assert_eq!(renderer.last_frame().helpers, 5);
    }

    #[test]
    fn shapes_tumble_with_time() {
        let mut scene = LightsScene::new();
        let mut context = GlobalContext::default();
        for _ in 0..10 {
            context.clock.advance(0.2);
            scene.update(&mut context);
        }
        let rotation = scene.stage.graph.transform(scene.shapes[1]).unwrap().rotation;
        assert!((rotation.x - 0.3).abs() < 1e-4);
        assert!((rotation.y - 0.2).abs() < 1e-4);
    }

    #[test]
    fn helpers_toggle_off() {
        let mut scene = LightsScene::new();
        let mut context = GlobalContext::default();
        context.message_bus.push(LabAction::PanelActivate);
        scene.update(&mut context);

        assert!(scene.helpers.iter().all(|&h| !scene.stage.graph.node(h).unwrap().visible));
    }
}
