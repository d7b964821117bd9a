//=========================================================================
// Textures
//=========================================================================
//
// A cube wearing a pixel-art texture, magnified without smoothing.
//
//=========================================================================

use glam::Vec3;

use super::assets::Assets;
use super::stage::Stage;
use super::{navigate, LabScene};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::graphics::{Color, Filter, Geometry, Material, NodeId, RenderView};

const COLOR_MAP: &str = "/textures/minecraft.png";

pub struct TexturesScene {
    stage: Stage,
    cube: NodeId,
}

impl TexturesScene {
    pub fn new(assets: &Assets) -> Self {
        let map = assets.texture_with(COLOR_MAP, |texture| texture.mag_filter = Filter::Nearest);

        let mut stage = Stage::new(75.0, 0.1, 1000.0, Vec3::new(0.0, 0.0, 2.0));
        let cube = stage.graph.add_mesh(Geometry::cube(1.0), Material::basic(Color::WHITE).with_map(map));

        Self { stage: stage.orbit(Vec3::ZERO), cube }
    }
}

impl Scene<LabScene> for TexturesScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::Textures) {
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
