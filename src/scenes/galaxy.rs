//=========================================================================
// Galaxy Generator
//=========================================================================
//
// Spiral point cloud rebuilt whenever a panel edit is committed. The
// first cloud is built on first entry so registering the lab stays cheap.
//
//=========================================================================

use glam::Vec3;
use log::info;
use rand_chacha::ChaCha8Rng;

use super::stage::Stage;
use super::{drive_panel, navigate, LabScene};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::debug_panel::{ControlId, DebugPanel, NumberRange, PanelEventKind};
use crate::graphics::RenderView;
use crate::procedural::{GalaxyCloud, GalaxyParameters};

struct Controls {
    count: ControlId,
    size: ControlId,
    radius: ControlId,
    branches: ControlId,
    spin: ControlId,
    randomness: ControlId,
    random_power: ControlId,
    inside_color: ControlId,
    outside_color: ControlId,
}

impl Controls {
    fn add(panel: &mut DebugPanel, p: &GalaxyParameters) -> Self {
        Self {
            count: panel.add_number("count", p.count as f32, NumberRange::new(1000.0, 100_000.0, 1000.0)),
            size: panel.add_number("size", p.size, NumberRange::new(0.001, 0.1, 0.001)),
            radius: panel.add_number("radius", p.radius, NumberRange::new(1.0, 20.0, 0.1)),
            branches: panel.add_number("branches", p.branches as f32, NumberRange::new(1.0, 20.0, 1.0)),
            spin: panel.add_number("spin", p.spin, NumberRange::new(-5.0, 5.0, 0.01)),
            randomness: panel.add_number("randomness", p.randomness, NumberRange::new(0.0, 2.0, 0.01)),
            random_power: panel.add_number("randomPower", p.random_power, NumberRange::new(1.0, 10.0, 0.01)),
            inside_color: panel.add_color("insideColor", p.inside_color),
            outside_color: panel.add_color("outsideColor", p.outside_color),
        }
    }

    /// Parameters as currently shown on the panel.
    fn read(&self, panel: &DebugPanel, fallback: &GalaxyParameters) -> GalaxyParameters {
        let number = |id, default: f32| panel.number(id).unwrap_or(default);
        GalaxyParameters {
            count: number(self.count, fallback.count as f32).round() as u32,
            size: number(self.size, fallback.size),
            radius: number(self.radius, fallback.radius),
            branches: number(self.branches, fallback.branches as f32).round() as u32,
            spin: number(self.spin, fallback.spin),
            randomness: number(self.randomness, fallback.randomness),
            random_power: number(self.random_power, fallback.random_power),
            inside_color: panel.color(self.inside_color).unwrap_or(fallback.inside_color),
            outside_color: panel.color(self.outside_color).unwrap_or(fallback.outside_color),
        }
    }
}

pub struct GalaxyScene {
    stage: Stage,
    params: GalaxyParameters,
    cloud: GalaxyCloud,
    rng: ChaCha8Rng,
    panel: DebugPanel,
    controls: Controls,
}

impl GalaxyScene {
    pub fn new(params: GalaxyParameters, rng: ChaCha8Rng) -> Self {
        let stage = Stage::new(75.0, 0.1, 100.0, Vec3::new(3.0, 4.0, 7.0)).orbit(Vec3::ZERO);
        let mut panel = DebugPanel::new(LabScene::Galaxy.title());
        let controls = Controls::add(&mut panel, &params);
        Self { stage, params, cloud: GalaxyCloud::new(), rng, panel, controls }
    }

    pub fn params(&self) -> &GalaxyParameters {
        &self.params
    }

    fn regenerate(&mut self) {
        self.cloud.regenerate(&mut self.stage.graph, &self.params, &mut self.rng);
    }
}

impl Scene<LabScene> for GalaxyScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
        if self.cloud.node().is_none() {
            info!("Generating galaxy of {} stars", self.params.count);
            self.regenerate();
        }
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::Galaxy) {
            return;
        }

        drive_panel(context, &mut self.panel);
        let committed = self
            .panel
            .drain_events()
            .iter()
            .any(|event| event.kind == PanelEventKind::FinishChanged);
        if committed {
            self.params = self.controls.read(&self.panel, &self.params);
            self.regenerate();
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
    use crate::graphics::{Color, Geometry, NodeKind};
    use rand::SeedableRng;

    fn scene(count: u32) -> GalaxyScene {
        let params = GalaxyParameters { count, ..Default::default() };
        GalaxyScene::new(params, ChaCha8Rng::seed_from_u64(3))
    }

    fn star_count(scene: &GalaxyScene) -> usize {
        let node = scene.cloud.node().unwrap();
        let NodeKind::Points { geometry, .. } = scene.stage.graph.node(node).unwrap().kind else {
            panic!("galaxy is a point cloud");
        };
        match scene.stage.graph.geometry(geometry).unwrap() {
            Geometry::Points(cloud) => cloud.len(),
            other => panic!("unexpected geometry {:?}", other.kind_name()),
        }
    }

    #[test]
    fn cloud_is_built_on_first_entry_only() {
        let mut scene = scene(1000);
        assert!(scene.cloud.node().is_none());

        let mut context = GlobalContext::default();
        scene.on_enter(&mut context);
        let first = scene.cloud.node().unwrap();
        scene.on_exit(&mut context);
        scene.on_enter(&mut context);

        assert_eq!(scene.cloud.node(), Some(first));
        assert_eq!(star_count(&scene), 1000);
    }

    #[test]
    fn committed_edit_rebuilds_a_single_cloud() {
        let mut scene = scene(1000);
        let mut context = GlobalContext::default();
        scene.on_enter(&mut context);
        let (nodes, geometries, materials) =
            (scene.stage.graph.len(), scene.stage.graph.geometry_count(), scene.stage.graph.material_count());

        let (count, inside) = (scene.controls.count, scene.controls.inside_color);
        scene.panel.set_number(count, 3000.0);
        scene.panel.set_color(inside, Color::hex(0x00ff00));
        scene.update(&mut context);

        assert_eq!(scene.params().count, 3000);
        assert_eq!(scene.params().inside_color, Color::hex(0x00ff00));
        assert_eq!(star_count(&scene), 3000);
        assert_eq!(scene.stage.graph.len(), nodes);
        assert_eq!(scene.stage.graph.geometry_count(), geometries);
        assert_eq!(scene.stage.graph.material_count(), materials);
    }

    #[test]
    fn keyboard_nudge_commits() {
        let mut scene = scene(1000);
        let mut context = GlobalContext::default();
        scene.on_enter(&mut context);

        context.message_bus.push(crate::scenes::LabAction::PanelIncrease);
        scene.update(&mut context);

        assert_eq!(scene.params().count, 2000);
        assert_eq!(star_count(&scene), 2000);
    }
}
