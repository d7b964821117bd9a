//=========================================================================
// Debug GUI Playground
//=========================================================================
//
// Live tweaking of one cube through the debug panel:
//   elevation  position.y in [-1.5, 1.5], step 0.01
//   visible    node visibility
//   wireframe  material wireframe flag
//   color      material color
//   spin       two-second tween of rotation.y by +10 rad
//
//=========================================================================

use glam::Vec3;
use log::debug;

use super::stage::Stage;
use super::{drive_panel, navigate, LabScene};
use crate::animation::{Property, Target, Tween, Tweens};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::debug_panel::{ControlId, DebugPanel, NumberRange, PanelEventKind};
use crate::graphics::{Color, Geometry, Material, NodeId, RenderView};

struct Controls {
    elevation: ControlId,
    visible: ControlId,
    wireframe: ControlId,
    color: ControlId,
    spin: ControlId,
}

pub struct GuiPlaygroundScene {
    stage: Stage,
    cube: NodeId,
    panel: DebugPanel,
    controls: Controls,
    tweens: Tweens,
}

impl GuiPlaygroundScene {
    pub fn new() -> Self {
        let mut stage = Stage::new(75.0, 0.1, 1000.0, Vec3::new(0.0, 0.0, 3.0));
        let cube = stage.graph.add_mesh(Geometry::cube(1.0), Material::basic(Color::RED).wireframe());

        let mut panel = DebugPanel::new(LabScene::GuiPlayground.title());
        let controls = Controls {
            elevation: panel.add_number("elevation", 0.0, NumberRange::new(-1.5, 1.5, 0.01)),
            visible: panel.add_toggle("visible", true),
            wireframe: panel.add_toggle("wireframe", true),
            color: panel.add_color("color", Color::RED),
            spin: panel.add_button("spin"),
        };

        Self { stage: stage.orbit(Vec3::ZERO), cube, panel, controls, tweens: Tweens::new() }
    }

    pub fn panel_mut(&mut self) -> &mut DebugPanel {
        &mut self.panel
    }

    fn apply_panel(&mut self) {
        for event in self.panel.drain_events() {
            let id = event.control;
            let graph = &mut self.stage.graph;

            match event.kind {
                PanelEventKind::Changed if id == self.controls.elevation => {
                    if let (Some(y), Some(transform)) = (self.panel.number(id), graph.transform_mut(self.cube)) {
                        transform.position.y = y;
                    }
                }
                PanelEventKind::Changed if id == self.controls.visible => {
                    graph.set_visible(self.cube, self.panel.toggle(id).unwrap_or(true));
                }
                PanelEventKind::Changed if id == self.controls.wireframe => {
                    if let (Some(on), Some(material)) = (self.panel.toggle(id), graph.node_material_mut(self.cube)) {
                        material.wireframe = on;
                    }
                }
                PanelEventKind::Changed if id == self.controls.color => {
                    if let (Some(color), Some(material)) = (self.panel.color(id), graph.node_material_mut(self.cube)) {
                        material.color = color;
                    }
                }
                PanelEventKind::Pressed if id == self.controls.spin => {
                    debug!("Spinning cube");
                    self.tweens.add(Tween::to(self.cube, Property::Rotation, 2.0).y(Target::Relative(10.0)));
                }
                _ => {}
            }
        }
    }
}

impl Default for GuiPlaygroundScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<LabScene> for GuiPlaygroundScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.stage.enter(context);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if navigate(context, LabScene::GuiPlayground) {
            return;
        }

        drive_panel(context, &mut self.panel);
        self.apply_panel();

        self.tweens.update(&mut self.stage.graph, context.clock.delta());
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

    fn tick(scene: &mut GuiPlaygroundScene, context: &mut GlobalContext, actions: &[LabAction]) {
        context.message_bus.clear::<LabAction>();
        context.message_bus.extend(actions.iter().copied());
        context.clock.advance(0.1);
        scene.update(context);
    }

    #[test]
    fn elevation_moves_cube_in_steps() {
        let mut scene = GuiPlaygroundScene::new();
        let mut context = GlobalContext::default();

        tick(&mut scene, &mut context, &[LabAction::PanelIncrease, LabAction::PanelIncrease]);
        let y = scene.stage.graph.transform(scene.cube).unwrap().position.y;
        assert!((y - 0.02).abs() < 1e-5);
    }

    #[test]
    fn toggles_hide_cube_and_fill_material() {
        let mut scene = GuiPlaygroundScene::new();
        let mut context = GlobalContext::default();

        tick(&mut scene, &mut context, &[LabAction::PanelNext, LabAction::PanelActivate]);
        assert!(!scene.stage.graph.node(scene.cube).unwrap().visible);

        tick(&mut scene, &mut context, &[LabAction::PanelNext, LabAction::PanelActivate]);
        assert!(!scene.stage.graph.node_material_mut(scene.cube).unwrap().wireframe);
    }

    #[test]
    fn color_change_reaches_material() {
        let mut scene = GuiPlaygroundScene::new();
        let mut context = GlobalContext::default();
        let color = scene.controls.color;

        scene.panel_mut().set_color(color, Color::hex(0x00ff88));
        tick(&mut scene, &mut context, &[]);
        assert_eq!(scene.stage.graph.node_material_mut(scene.cube).unwrap().color.to_hex(), 0x00ff88);
    }

    #[test]
    fn spin_adds_ten_radians_over_two_seconds() {
        let mut scene = GuiPlaygroundScene::new();
        let mut context = GlobalContext::default();

        tick(&mut scene, &mut context, &[LabAction::PanelPrevious, LabAction::PanelActivate]);
        for _ in 0..25 {
            tick(&mut scene, &mut context, &[]);
        }

        let rotation = scene.stage.graph.transform(scene.cube).unwrap().rotation.y;
        assert!((rotation - 10.0).abs() < 1e-3, "rotation.y = {}", rotation);
    }
}
