//=========================================================================
// Materials
//=========================================================================
//
// Sphere, plane and torus sharing one mirror-like standard material
// that reflects a cube environment map. Metalness and roughness are
// live-editable.
//
//=========================================================================

use glam::Vec3;

use super::assets::Assets;
use super::stage::Stage;
use super::{drive_panel, navigate, LabScene};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::debug_panel::{ControlId, DebugPanel, NumberRange, PanelEventKind};
use crate::graphics::{Color, Geometry, Material, MaterialId, Node, RenderView};

const ENVIRONMENT_MAP: [&str; 6] = [
    "/textures/environmentMaps/0/px.jpg",
    "/textures/environmentMaps/0/nx.jpg",
    "/textures/environmentMaps/0/py.jpg",
    "/textures/environmentMaps/0/ny.jpg",
    "/textures/environmentMaps/0/pz.jpg",
    "/textures/environmentMaps/0/nz.jpg",
];

pub struct MaterialsScene {
    stage: Stage,
    material: MaterialId,
    panel: DebugPanel,
    metalness: ControlId,
    roughness: ControlId,
}

impl MaterialsScene {
    pub fn new(assets: &Assets) -> Self {
        let mut stage = Stage::new(75.0, 0.1, 1000.0, Vec3::new(0.0, 0.0, 1.5));
        let graph = &mut stage.graph;

        let environment = assets.cube_texture(ENVIRONMENT_MAP);
        let material = graph.add_material(Material::standard(Color::WHITE, 1.0, 0.0).with_env_map(environment));

        let shapes = [
            (Geometry::sphere(0.25, 32, 32), 0.0),
            (Geometry::segmented_plane(0.5, 0.5, [100, 100]), -0.75),
            (Geometry::torus(0.2, 0.05, 16, 32), 0.75),
        ];
        for (geometry, x) in shapes {
            let geometry = graph.add_geometry(geometry);
            graph.add(Node::mesh(geometry, material).at(Vec3::new(x, 0.0, 0.0)));
        }

        let mut panel = DebugPanel::new(LabScene::Materials.title());
        let metalness = panel.add_number("metalness", 1.0, NumberRange::new(0.0, 1.0, 0.0001));
        let roughness = panel.add_number("roughness", 0.0, NumberRange::new(0.0, 1.0, 0.0001));

        Self { stage: stage.orbit(Vec3::ZERO), material, panel, metalness, roughness }
    }
}

impl Scene<LabScene> for MaterialsScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::Materials) {
            return;
        }

        drive_panel(context, &mut self.panel);
        let edited = self
            .panel
            .drain_events()
            .iter()
            .any(|event| event.kind == PanelEventKind::Changed);
        if edited {
            let metalness = self.panel.number(self.metalness);
            let roughness = self.panel.number(self.roughness);
            if let Some(material) = self.stage.graph.material_mut(self.material) {
                material.set_pbr(metalness, roughness);
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
    use crate::scenes::LabAction;

    #[test]
    fn three_meshes_share_one_material() {
        let scene = MaterialsScene::new(&Assets::new("/nonexistent/prism-lab"));
        let graph = &scene.stage.graph;

        assert_eq!(graph.material_count(), 1);
        assert_eq!(graph.geometry_count(), 3);
        assert_eq!(graph.material(scene.material).unwrap().metalness(), Some(1.0));
        assert_eq!(graph.material(scene.material).unwrap().roughness(), Some(0.0));
    }

    #[test]
    fn panel_edits_roughness() {
        let mut scene = MaterialsScene::new(&Assets::new("/nonexistent/prism-lab"));
        let mut context = GlobalContext::default();

        scene.panel.set_number(scene.roughness, 0.35);
        context.message_bus.push(LabAction::PanelDecrease);
        scene.update(&mut context);

        let material = scene.stage.graph.material(scene.material).unwrap();
        assert!((material.roughness().unwrap() - 0.35).abs() < 1e-4);
        assert!((material.metalness().unwrap() - 0.9999).abs() < 1e-4);
    }
}
