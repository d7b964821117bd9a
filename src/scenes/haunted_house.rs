//=========================================================================
// Haunted House
//=========================================================================
//
// Textured house, bushes and a ring of graves in fog, lit by a dim moon,
// a door lamp and three wandering ghost lights.
//
// Graph layout:
//   house (group)   walls, roof, door, door light
//   bushes ×4
//   graves (group)  40 crooked graves
//   floor, ambient, moon, ghost ×3
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::assets::Assets;
use super::stage::Stage;
use super::{drive_panel, navigate, LabScene};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::debug_panel::{ControlId, DebugPanel, NumberRange, PanelEventKind};
use crate::graphics::{
    Color, Fog, Geometry, Light, Material, Node, NodeId, RenderView, ShadowFilter, ShadowSettings, TextureMaps,
};
use crate::procedural::{ghost_positions, place_graves};

//=== Constants ===========================================================

const NIGHT: u32 = 0x262837;
const GRAVES: usize = 40;
const GHOST_COLORS: [u32; 3] = [0xff00ff, 0x00ffff, 0xffff00];

//=== Textures ============================================================

fn door_maps(assets: &Assets) -> TextureMaps {
    TextureMaps {
        color: assets.texture("/textures/door/color.jpg"),
        alpha: assets.texture("/textures/door/alpha.jpg"),
        ambient_occlusion: assets.texture("/textures/door/ambientOcclusion.jpg"),
        normal: assets.texture("/textures/door/normal.jpg"),
        roughness: assets.texture("/textures/door/roughness.jpg"),
        metalness: assets.texture("/textures/door/metalness.jpg"),
        displacement: assets.texture("/textures/door/height.jpg"),
        displacement_scale: 0.1,
    }
}

fn brick_maps(assets: &Assets) -> TextureMaps {
    TextureMaps {
        color: assets.texture("/textures/bricks/color.jpg"),
        ambient_occlusion: assets.texture("/textures/bricks/ambientOcclusion.jpg"),
        normal: assets.texture("/textures/bricks/normal.jpg"),
        roughness: assets.texture("/textures/bricks/roughness.jpg"),
        ..TextureMaps::default()
    }
}

/// Grass tiled eight times across the floor.
fn grass_maps(assets: &Assets) -> TextureMaps {
    let tiled = |url: &str| assets.texture_with(url, |texture| texture.set_repeat(8.0, 8.0));
    TextureMaps {
        color: tiled("/textures/grass/color.jpg"),
        ambient_occlusion: tiled("/textures/grass/ambientOcclusion.jpg"),
        normal: tiled("/textures/grass/normal.jpg"),
        roughness: tiled("/textures/grass/roughness.jpg"),
        ..TextureMaps::default()
    }
}

/// Point light casting a small, short-range shadow.
fn lamp(color: Color, intensity: f32, distance: f32) -> Light {
    let mut light = Light::point(color, intensity, distance, 2.0);
    shadow_256(&mut light);
    light
}

fn shadow_256(light: &mut Light) {
    if let Some(shadow) = light.enable_shadow() {
        shadow.map_size = 256;
        shadow.camera.set_far(7.0);
    }
}

//=== HauntedHouseScene ===================================================

struct Controls {
    ambient: ControlId,
    moon: ControlId,
    moon_x: ControlId,
    moon_y: ControlId,
    moon_z: ControlId,
}

pub struct HauntedHouseScene {
    stage: Stage,
    ambient: NodeId,
    moon: NodeId,
    ghosts: [NodeId; 3],
    graves: Vec<NodeId>,
    panel: DebugPanel,
    controls: Controls,
    elapsed: f32,
}

impl HauntedHouseScene {
    pub fn new<R: Rng + ?Sized>(assets: &Assets, rng: &mut R) -> Self {
        let mut stage = Stage::new(75.0, 0.1, 100.0, Vec3::new(4.0, 2.7, 7.0));
        let graph = &mut stage.graph;
        let night = Color::hex(NIGHT);
        graph.fog = Some(Fog { color: night, near: 1.0, far: 25.0 });
        graph.background = Some(night);
        graph.shadows = ShadowSettings { enabled: true, filter: ShadowFilter::PcfSoft };

        //--- House --------------------------------------------------------
        let house = graph.add(Node::group().named("house"));

        let walls = graph.add_geometry(Geometry::cuboid(4.0, 2.5, 4.0));
        let bricks = graph.add_material(Material::standard(Color::WHITE, 0.0, 1.0).with_maps(brick_maps(assets)));
        graph.add_child(
            house,
            Node::mesh(walls, bricks).named("walls").at(Vec3::new(0.0, 1.25, 0.0)).casting_shadow(),
        );

        let roof = graph.add_geometry(Geometry::cone(3.5, 2.0, 4));
        let tiles = graph.add_material(Material::standard(Color::hex(0xb35f45), 0.0, 1.0));
        if let Some(roof) = graph.add_child(house, Node::mesh(roof, tiles).named("roof").at(Vec3::new(0.0, 3.5, 0.0))) {
            if let Some(transform) = graph.transform_mut(roof) {
                transform.rotate_y(PI * 0.25);
            }
        }

        let door = graph.add_geometry(Geometry::segmented_plane(2.2, 2.2, [32, 32]));
        let mut wood = Material::standard(Color::WHITE, 0.0, 1.0).with_maps(door_maps(assets));
        wood.transparent = true;
        let wood = graph.add_material(wood);
        graph.add_child(house, Node::mesh(door, wood).named("door").at(Vec3::new(0.0, 1.0, 1.97)));

        graph.add_child(
            house,
            Node::light(lamp(Color::hex(0xff7d46), 1.0, 9.0))
                .named("door light")
                .at(Vec3::new(0.0, 2.2, 2.7)),
        );

        //--- Bushes -------------------------------------------------------
        let bush = graph.add_geometry(Geometry::sphere(1.0, 16, 16));
        let leaves = graph.add_material(Material::standard(Color::hex(0x89c854), 0.0, 1.0));
        for (position, scale) in [
            (Vec3::new(2.35, 0.3, 2.35), 0.5),
            (Vec3::new(-2.35, 0.3, 2.35), 0.5),
            (Vec3::new(2.85, 0.15, 2.85), 0.25),
            (Vec3::new(-2.85, 0.15, 2.85), 0.25),
        ] {
            graph.add(
                Node::mesh(bush, leaves)
                    .named("bush")
                    .at(position)
                    .scaled(Vec3::splat(scale))
                    .casting_shadow(),
            );
        }

        //--- Graves -------------------------------------------------------
        let yard = graph.add(Node::group().named("graves"));
        let grave = graph.add_geometry(Geometry::cuboid(0.6, 0.8, 0.2));
        let stone = graph.add_material(Material::standard(Color::hex(0xb2b6b1), 0.0, 1.0));
        let graves = place_graves(rng, GRAVES)
            .into_iter()
            .filter_map(|transform| {
                let mut node = Node::mesh(grave, stone).named("grave").casting_shadow();
                node.transform = transform;
                graph.add_child(yard, node)
            })
            .collect();

        //--- Floor --------------------------------------------------------
        let floor = graph.add_geometry(Geometry::plane(20.0, 20.0));
        let grass = graph.add_material(Material::standard(Color::WHITE, 0.0, 1.0).with_maps(grass_maps(assets)));
        graph.add(
            Node::mesh(floor, grass)
                .named("floor")
                .rotated(Vec3::new(-PI * 0.5, 0.0, 0.0))
                .receiving_shadow(),
        );

        //--- Lights -------------------------------------------------------
        let ambient = graph.add(Node::light(Light::ambient(Color::hex(0xb9d5ff), 0.15)).named("ambient"));

        let mut moonlight = Light::directional(Color::WHITE, 0.15);
        shadow_256(&mut moonlight);
        let moon = graph.add(Node::light(moonlight).named("moon").at(Vec3::new(4.0, 5.0, -2.0)));

        let ghosts = GHOST_COLORS.map(|color| graph.add(Node::light(lamp(Color::hex(color), 2.0, 3.0)).named("ghost")));

        //--- Panel --------------------------------------------------------
        let mut panel = DebugPanel::new(LabScene::HauntedHouse.title());
        let intensity = NumberRange::new(0.0, 1.0, 0.001);
        let offset = NumberRange::new(-5.0, 5.0, 0.001);
        let controls = Controls {
            ambient: panel.add_number("ambient intensity", 0.15, intensity),
            moon: panel.add_number("moon intensity", 0.15, intensity),
            moon_x: panel.add_number("moon x", 4.0, offset),
            moon_y: panel.add_number("moon y", 5.0, offset),
            moon_z: panel.add_number("moon z", -2.0, offset),
        };

        let mut scene = Self {
            stage: stage.orbit(Vec3::ZERO),
            ambient,
            moon,
            ghosts,
            graves,
            panel,
            controls,
            elapsed: 0.0,
        };
        scene.move_ghosts();
        scene
    }

    fn move_ghosts(&mut self) {
        for (&ghost, position) in self.ghosts.iter().zip(ghost_positions(self.elapsed)) {
            if let Some(transform) = self.stage.graph.transform_mut(ghost) {
                transform.position = position;
            }
        }
    }

    fn apply_panel(&mut self, control: ControlId) {
        let c = &self.controls;
        let graph = &mut self.stage.graph;
        let number = |id| self.panel.number(id).unwrap_or_default();

        if control == c.ambient || control == c.moon {
            let (node, value) = if control == c.ambient { (self.ambient, number(c.ambient)) } else { (self.moon, number(c.moon)) };
            if let Some(light) = graph.light_mut(node) {
                light.intensity = value;
            }
        } else if let Some(transform) = graph.transform_mut(self.moon) {
            transform.position = Vec3::new(number(c.moon_x), number(c.moon_y), number(c.moon_z));
        }
    }
}

impl Scene<LabScene> for HauntedHouseScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::HauntedHouse) {
            return;
        }

        drive_panel(context, &mut self.panel);
        for event in self.panel.drain_events() {
            if event.kind == PanelEventKind::Changed {
                self.apply_panel(event.control);
            }
        }

        self.elapsed += context.clock.delta();
        self.move_ghosts();
        self.stage.update(context);
    }

    fn render_view(&self) -> Option<RenderView<'_>> {
        Some(self.stage.view())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
