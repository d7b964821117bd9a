//=========================================================================
// Physics Sandbox
//=========================================================================
//
// Spheres and boxes dropped onto a tiltable floor. Every visual object is
// paired with a rigid body through `PhysicsBinding`; hard hits play the
// impact sound.
//
// Panel: createSphere, createBox, liftFloorFromLeft, liftFloorFromRight,
// and reset (listed only when `physics.enable_reset` is set).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::PI;

use glam::Vec3;
use log::info;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

//=== Internal Dependencies ===============================================

use super::stage::Stage;
use super::{drive_panel, navigate, LabAction, LabScene};
use crate::config::PhysicsConfig;
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::debug_panel::{ControlId, DebugPanel, PanelEventKind};
use crate::graphics::{Color, Geometry, Light, Material, Node, NodeId, RenderView, ShadowFilter, ShadowSettings};
use crate::physics::{DynamicsWorld, ImpactSound, LogSoundSink, PhysicsBinding, SoundSink};

//=== Constants ===========================================================

const FLAT: f32 = PI * 0.5;
const LIFTED_LEFT: f32 = PI * 0.4;
const LIFTED_RIGHT: f32 = PI * 0.6;
const HIT_SOUND: &str = "/sounds/hit.mp3";
/// Smallest random radius or edge; zero-sized colliders are rejected.
const MIN_SIZE: f32 = 0.05;

//=== PhysicsSandboxScene =================================================

struct Buttons {
    sphere: ControlId,
    cube: ControlId,
    lift_left: ControlId,
    lift_right: ControlId,
    reset: ControlId,
}

pub struct PhysicsSandboxScene {
    stage: Stage,
    floor: NodeId,
    world: DynamicsWorld,
    binding: PhysicsBinding,
    sound: Box<dyn SoundSink>,
    config: PhysicsConfig,
    rng: ChaCha8Rng,
    panel: DebugPanel,
    buttons: Buttons,
}

impl PhysicsSandboxScene {
    pub fn new(config: &PhysicsConfig, rng: ChaCha8Rng) -> Self {
        let mut stage = Stage::new(75.0, 0.1, 100.0, Vec3::new(-8.0, 4.0, 6.0));
        let graph = &mut stage.graph;
        graph.shadows = ShadowSettings { enabled: true, filter: ShadowFilter::PcfSoft };

        let world = DynamicsWorld::new(config.world_settings());

        let concrete = Material::standard(Color::hex(0x777777), 0.8, 0.4).with_env_map_intensity(0.5);
        let floor = graph.add_mesh(Geometry::plane(10.0, 10.0), concrete);
        if let Some(node) = graph.node_mut(floor) {
            node.name = "floor".to_owned();
            node.receive_shadow = true;
            node.transform.rotation.x = -FLAT;
        }

        graph.add(Node::light(Light::ambient(Color::WHITE, 2.1)).named("ambient"));
        let mut sun = Light::directional(Color::WHITE, 0.6);
        if let Some(shadow) = sun.enable_shadow() {
            shadow.map_size = 1024;
            shadow.camera.set_far(15.0);
            shadow.camera.set_extent(7.0);
        }
        graph.add(Node::light(sun).named("directional").at(Vec3::new(5.0, 5.0, 5.0)));

        let binding = PhysicsBinding::new(graph, Material::standard(Color::hex(0xba001f), 0.5, 0.4));

        let mut panel = DebugPanel::new(LabScene::PhysicsSandbox.title());
        let buttons = Buttons {
            sphere: panel.add_button("createSphere"),
            cube: panel.add_button("createBox"),
            lift_left: panel.add_button("liftFloorFromLeft"),
            lift_right: panel.add_button("liftFloorFromRight"),
            reset: panel.add_button("reset"),
        };
        panel.set_hidden(buttons.reset, !config.enable_reset);

        Self {
            stage: stage.orbit(Vec3::ZERO),
            floor,
            world,
            binding,
            sound: Box::new(LogSoundSink::new(HIT_SOUND)),
            config: config.clone(),
            rng,
            panel,
            buttons,
        }
    }

    /// Replaces the impact sound output.
    pub fn with_sound_sink(mut self, sink: Box<dyn SoundSink>) -> Self {
        self.sound = sink;
        self
    }

    pub fn object_count(&self) -> usize {
        self.binding.len()
    }

    //--- Panel Actions ----------------------------------------------------

    fn drop_point(&mut self) -> Vec3 {
        Vec3::new((self.rng.gen::<f32>() - 0.5) * 6.0, 3.0, (self.rng.gen::<f32>() - 0.5) * 6.0)
    }

    fn create_sphere(&mut self) {
        let radius = (self.rng.gen::<f32>() * 0.5).max(MIN_SIZE);
        let position = self.drop_point();
        self.binding.create_sphere(&mut self.stage.graph, &mut self.world, radius, position);
    }

    fn create_box(&mut self) {
        let mut edge = || (self.rng.gen::<f32>() * 1.5).max(MIN_SIZE);
        let size = Vec3::new(edge(), edge(), edge());
        let position = self.drop_point();
        self.binding.create_box(&mut self.stage.graph, &mut self.world, size, position);
    }

    fn tilt_floor(&mut self, angle: f32) {
        self.world.set_floor_tilt(angle);
        if let Some(transform) = self.stage.graph.transform_mut(self.floor) {
            transform.rotation.x = -angle;
        }
    }

    fn reset(&mut self) {
        info!("Removing {} physics objects", self.binding.len());
        self.binding.reset(&mut self.stage.graph, &mut self.world);
        self.tilt_floor(FLAT);
    }

    fn press(&mut self, control: ControlId) {
        let b = &self.buttons;
        if control == b.sphere {
            self.create_sphere();
        } else if control == b.cube {
            self.create_box();
        } else if control == b.lift_left {
            self.tilt_floor(LIFTED_LEFT);
        } else if control == b.lift_right {
            self.tilt_floor(LIFTED_RIGHT);
        } else if control == b.reset {
            self.reset();
        }
    }
}

impl Scene<LabScene> for PhysicsSandboxScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::PhysicsSandbox) {
            return;
        }

        drive_panel(context, &mut self.panel);
        for event in self.panel.drain_events() {
            if event.kind == PanelEventKind::Pressed {
                self.press(event.control);
            }
        }
        for action in context.message_bus.read::<LabAction>() {
            match action {
                LabAction::SpawnSphere => self.create_sphere(),
                LabAction::SpawnBox => self.create_box(),
                _ => {}
            }
        }

        let physics = &self.config;
        self.world.step(physics.fixed_step, context.clock.delta(), physics.max_substeps);
        for impact in self.world.impacts() {
            if let Some(sound) = ImpactSound::for_impact(impact, physics.impact_threshold, &mut self.rng) {
                self.sound.play(sound);
            }
        }
        self.binding.sync(&mut self.stage.graph, &self.world);

        self.stage.update(context);
    }

    fn render_view(&self) -> Option<RenderView<'_>> {
        Some(self.stage.view())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
