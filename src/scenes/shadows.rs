//=========================================================================
// Shadows
//=========================================================================
//
// Directional, spot and point lights with tuned shadow cameras over a
// bouncing sphere. Real shadow maps start off; a textured "baked" plane
// follows the sphere and fades as it rises.
//
//=========================================================================

use std::f32::consts::PI;

use glam::Vec3;

use super::assets::Assets;
use super::stage::Stage;
use super::{drive_panel, navigate, LabScene};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::debug_panel::{ControlId, DebugPanel, NumberRange, PanelEventKind};
use crate::graphics::{
    Color, Geometry, HelperKind, Light, Material, MaterialId, Node, NodeId, RenderView, SceneGraph, ShadowCamera,
    ShadowFilter, ShadowSettings,
};

const SHADOW_MAP: u32 = 1024;

struct Controls {
    ambient: ControlId,
    directional: ControlId,
    directional_x: ControlId,
    directional_y: ControlId,
    directional_z: ControlId,
    metalness: ControlId,
    roughness: ControlId,
    sphere_x: ControlId,
    sphere_y: ControlId,
    sphere_z: ControlId,
    shadow_maps: ControlId,
}

pub struct ShadowsScene {
    stage: Stage,
    ambient: NodeId,
    directional: NodeId,
    sphere: NodeId,
    fake_shadow: NodeId,
    material: MaterialId,
    panel: DebugPanel,
    controls: Controls,
    elapsed: f32,
}

/// Enables shadow casting on `light` with a `SHADOW_MAP` sized map.
fn shadowed(mut light: Light, tune: impl FnOnce(&mut ShadowCamera)) -> Light {
    if let Some(shadow) = light.enable_shadow() {
        shadow.map_size = SHADOW_MAP;
        tune(&mut shadow.camera);
    }
    light
}

fn add_shadow_helper(graph: &mut SceneGraph, light: NodeId) {
    graph.add(Node::helper(light, HelperKind::ShadowCamera).hidden());
}

impl ShadowsScene {
    pub fn new(assets: &Assets) -> Self {
        let mut stage = Stage::new(75.0, 0.1, 100.0, Vec3::new(2.0, 1.0, 4.0));
        let graph = &mut stage.graph;
        graph.shadows = ShadowSettings { enabled: false, filter: ShadowFilter::PcfSoft };

        //--- Lights -------------------------------------------------------
        let ambient = graph.add(Node::light(Light::ambient(Color::WHITE, 0.3)).named("ambient"));

        let directional = graph.add(
            Node::light(shadowed(Light::directional(Color::WHITE, 0.5), |camera| {
                camera.set_near(1.0);
                camera.set_far(6.0);
                camera.set_extent(2.0);
            }))
            .named("directional")
            .at(Vec3::new(2.0, 2.0, -1.0)),
        );
        add_shadow_helper(graph, directional);

        let spot = graph.add(
            Node::light(shadowed(Light::spot(Color::WHITE, 0.4, 10.0, PI * 0.3, 0.0, 2.0), |camera| {
                if let ShadowCamera::Perspective { fov, .. } = camera {
                    *fov = 30.0;
                }
            }))
            .named("spot")
            .at(Vec3::new(0.0, 2.0, 2.0)),
        );
        add_shadow_helper(graph, spot);

        let point = graph.add(
            Node::light(shadowed(Light::point(Color::WHITE, 0.3, 0.0, 2.0), |camera| {
                camera.set_near(0.1);
                camera.set_far(5.0);
            }))
            .named("point")
            .at(Vec3::new(-1.0, 1.0, 0.0)),
        );
        add_shadow_helper(graph, point);

        //--- Objects ------------------------------------------------------
        let material = graph.add_material(Material::standard(Color::WHITE, 0.0, 0.7));

        let sphere_geometry = graph.add_geometry(Geometry::sphere(0.5, 32, 32));
        let sphere = graph.add(Node::mesh(sphere_geometry, material).named("sphere").casting_shadow());

        let floor = graph.add_geometry(Geometry::plane(5.0, 5.0));
        graph.add(
            Node::mesh(floor, material)
                .named("floor")
                .at(Vec3::new(0.0, -0.5, 0.0))
                .rotated(Vec3::new(-PI * 0.5, 0.0, 0.0))
                .receiving_shadow(),
        );

        let baked = Material::basic(Color::BLACK).with_alpha_map(assets.texture("/textures/simpleShadow.jpg"));
        let fake_shadow = graph.add_mesh(Geometry::plane(1.5, 1.5), baked);
        if let Some(transform) = graph.transform_mut(fake_shadow) {
            transform.position.y = -0.49;
            transform.rotation.x = -PI * 0.5;
        }

        //--- Panel --------------------------------------------------------
        let mut panel = DebugPanel::new(LabScene::Shadows.title());
        let unit = NumberRange::new(0.0, 1.0, 0.001);
        let offset = NumberRange::new(-5.0, 5.0, 0.001);
        let placement = NumberRange::new(0.0, 10.0, 0.1);
        let controls = Controls {
            ambient: panel.add_number("ambient intensity", 0.3, unit),
            directional: panel.add_number("directional intensity", 0.5, unit),
            directional_x: panel.add_number("directional x", 2.0, offset),
            directional_y: panel.add_number("directional y", 2.0, offset),
            directional_z: panel.add_number("directional z", -1.0, offset),
            metalness: panel.add_number("metalness", 0.0, unit),
            roughness: panel.add_number("roughness", 0.7, unit),
            sphere_x: panel.add_number("sphere x", 0.0, placement),
            sphere_y: panel.add_number("sphere y", 0.0, placement),
            sphere_z: panel.add_number("sphere z", 0.0, placement),
            shadow_maps: panel.add_toggle("shadow maps", false),
        };

        Self {
            stage: stage.orbit(Vec3::ZERO),
            ambient,
            directional,
            sphere,
            fake_shadow,
            material,
            panel,
            controls,
            elapsed: 0.0,
        }
    }

    fn apply_panel(&mut self, control: ControlId) {
        let c = &self.controls;
        let graph = &mut self.stage.graph;
        let number = |id| self.panel.number(id).unwrap_or_default();

        if control == c.ambient || control == c.directional {
            let (node, value) =
                if control == c.ambient { (self.ambient, number(c.ambient)) } else { (self.directional, number(c.directional)) };
            if let Some(light) = graph.light_mut(node) {
                light.intensity = value;
            }
        } else if control == c.directional_x || control == c.directional_y || control == c.directional_z {
            if let Some(transform) = graph.transform_mut(self.directional) {
                transform.position =
                    Vec3::new(number(c.directional_x), number(c.directional_y), number(c.directional_z));
            }
        } else if control == c.metalness || control == c.roughness {
            if let Some(material) = graph.material_mut(self.material) {
                material.set_pbr(Some(number(c.metalness)), Some(number(c.roughness)));
            }
        } else if control == c.sphere_x || control == c.sphere_y || control == c.sphere_z {
            if let Some(transform) = graph.transform_mut(self.sphere) {
                transform.position = Vec3::new(number(c.sphere_x), number(c.sphere_y), number(c.sphere_z));
            }
        } else if control == c.shadow_maps {
            graph.shadows.enabled = self.panel.toggle(c.shadow_maps).unwrap_or(false);
        }
    }

    /// Sphere circles the origin and hops; the baked shadow tracks it.
    fn animate(&mut self) {
        let t = self.elapsed;
        let position = Vec3::new(t.cos() * 1.5, (t * 3.0).sin().abs(), t.sin() * 1.5);
        let graph = &mut self.stage.graph;

        if let Some(transform) = graph.transform_mut(self.sphere) {
            transform.position = position;
        }
        if let Some(transform) = graph.transform_mut(self.fake_shadow) {
            transform.position.x = position.x;
            transform.position.z = position.z;
            transform.scale = Vec3::splat(position.y * 2.0 + 0.5);
        }
        if let Some(material) = graph.node_material_mut(self.fake_shadow) {
            material.set_opacity((1.0 - position.y) * 0.6);
        }
    }
}

impl Scene<LabScene> for ShadowsScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::Shadows) {
            return;
        }

        drive_panel(context, &mut self.panel);
        for event in self.panel.drain_events() {
            if event.kind == PanelEventKind::Changed {
                self.apply_panel(event.control);
            }
        }

        self.elapsed += context.clock.delta();
        self.animate();
        self.stage.update(context);
    }

    fn render_view(&self) -> Option<RenderView<'_>> {
        Some(self.stage.view())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
