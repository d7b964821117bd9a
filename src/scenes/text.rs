//=========================================================================
// 3D Text
//=========================================================================
//
// Centered, bevelled "Hello world!" among a hundred random donuts, all
// shaded with one matcap.
//
//=========================================================================

use glam::Vec3;
use log::warn;
use rand::Rng;

use super::assets::Assets;
use super::stage::Stage;
use super::{navigate, LabScene};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::graphics::{Bevel, Geometry, Material, Node, NodeId, RenderView, TextGeometry, TextOptions};
use crate::procedural::scatter_donuts;

const MATCAP: &str = "/textures/matcaps/4.png";
const FONT: &str = "/fonts/helvetiker_regular.typeface.json";
const DONUTS: usize = 100;

fn text_options() -> TextOptions {
    TextOptions {
        size: 0.5,
        depth: 0.2,
        curve_segments: 12,
        bevel: Some(Bevel { thickness: 0.03, size: 0.02, offset: 0.0, segments: 5 }),
    }
}

pub struct TextScene {
    stage: Stage,
    text: Option<NodeId>,
    donuts: Vec<NodeId>,
}

impl TextScene {
    pub fn new<R: Rng + ?Sized>(assets: &Assets, rng: &mut R) -> Self {
        let mut stage = Stage::new(75.0, 0.1, 1000.0, Vec3::new(0.0, 0.0, 4.0));
        let graph = &mut stage.graph;

        let material = graph.add_material(Material::matcap(assets.texture(MATCAP)));

        let text = match assets.font(FONT) {
            Some(font) => {
                let mut geometry = TextGeometry::new(&font, "Hello world!", text_options());
                geometry.center();
                let geometry = graph.add_geometry(Geometry::Text(geometry));
                Some(graph.add(Node::mesh(geometry, material).named("text")))
            }
            None => {
                warn!("Text scene shows donuts only");
                None
            }
        };

        let donut = graph.add_geometry(Geometry::torus(0.3, 0.2, 20, 45));
        let donuts = scatter_donuts(rng, DONUTS)
            .into_iter()
            .map(|transform| {
                let mut node = Node::mesh(donut, material);
                node.transform = transform;
                graph.add(node)
            })
            .collect();

        Self { stage: stage.orbit(Vec3::ZERO), text, donuts }
    }
}

impl Scene<LabScene> for TextScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::Text) {
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
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const FONT_JSON: &str = r#"{
        "familyName": "Mini",
        "resolution": 1000,
        "ascender": 800,
        "descender": -200,
        "underlineThickness": 0,
        "boundingBox": { "xMin": 0, "yMin": -200, "xMax": 1000, "yMax": 800 },
        "glyphs": {
            "H": { "ha": 700, "x_min": 50, "x_max": 650, "o": "m 50 0 l 650 0" },
            "e": { "ha": 500, "x_min": 50, "x_max": 450, "o": "m 50 0 l 450 0" }
        }
    }"#;

    #[test]
    fn without_font_only_donuts_are_built() {
        let scene = TextScene::new(&Assets::new("/nonexistent/prism-lab"), &mut ChaCha8Rng::seed_from_u64(1));
        assert!(scene.text.is_none());
        assert_eq!(scene.donuts.len(), DONUTS);
        assert_eq!(scene.stage.graph.material_count(), 1);
    }

    #[test]
    fn text_is_centered_on_origin() {
        let root = std::env::temp_dir().join(format!("prism-lab-text-{}", std::process::id()));
        std::fs::create_dir_all(root.join("fonts")).unwrap();
        std::fs::write(root.join("fonts/helvetiker_regular.typeface.json"), FONT_JSON).unwrap();

        let scene = TextScene::new(&Assets::new(&root), &mut ChaCha8Rng::seed_from_u64(1));
        let graph = &scene.stage.graph;
        let node = graph.node(scene.text.unwrap()).unwrap();
        let crate::graphics::NodeKind::Mesh { geometry, .. } = node.kind else {
            panic!("text is not a mesh");
        };
        let Some(Geometry::Text(text)) = graph.geometry(geometry) else {
            panic!("text geometry missing");
        };

        let (min, max) = text.bounds();
        assert!(((min + max) * 0.5).length() < 1e-4);
        assert_eq!(text.text, "Hello world!");

        std::fs::remove_dir_all(&root).ok();
    }
}
