//=========================================================================
// Group
//=========================================================================
//
// Two tall wireframe cubes moved together through their parent group.
//
//=========================================================================

use glam::Vec3;

use super::stage::Stage;
use super::{navigate, LabScene};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::graphics::{Color, Geometry, Material, Node, NodeId, RenderView};

pub struct GroupScene {
    stage: Stage,
    group: NodeId,
    cubes: Vec<NodeId>,
}

impl GroupScene {
    pub fn new() -> Self {
        let mut stage = Stage::new(75.0, 0.1, 2000.0, Vec3::new(0.0, 0.0, 3.0));
        let graph = &mut stage.graph;

        let group = graph.add(Node::group().named("group").at(Vec3::new(0.0, -1.0, 0.0)));
        let geometry = graph.add_geometry(Geometry::cube(1.0));

        let cubes = [(-1.5, Color::RED), (1.5, Color::GREEN)]
            .into_iter()
            .filter_map(|(x, color)| {
                let material = graph.add_material(Material::basic(color).wireframe());
                let node = Node::mesh(geometry, material)
                    .at(Vec3::new(x, 1.0, 0.0))
                    .scaled(Vec3::new(1.0, 3.0, 1.0));
                graph.add_child(group, node)
            })
            .collect();

        Self { stage, group, cubes }
    }
}

impl Default for GroupScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<LabScene> for GroupScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::Group) {
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
