//=========================================================================
// Headless Lab Tests
//=========================================================================
//
// Drives the registered lab through GlobalSystems exactly as the logic
// thread does, with a HeadlessRenderer in place of a window.
//
//=========================================================================

use prism_lab::config::LabConfig;
use prism_lab::core::input::{InputEvent, KeyCode, Modifiers};
use prism_lab::graphics::{HeadlessRenderer, Renderer};
use prism_lab::prelude::*;
use prism_lab::procedural::GalaxyParameters;
use prism_lab::scenes;

struct Lab {
    systems: GlobalSystems<LabScene, LabAction>,
    context: GlobalContext,
    renderer: HeadlessRenderer,
}

impl Lab {
    fn start(start_scene: LabScene) -> Self {
        let config = LabConfig {
            start_scene,
            galaxy: GalaxyParameters { count: 1000, ..Default::default() },
            ..LabConfig::default()
        };
        let mut systems = GlobalSystems::new();
        scenes::register(&mut systems, &config);

        let mut context = GlobalContext::default();
        let mut renderer = HeadlessRenderer::new();
        renderer.resize(&context.viewport);
        systems.scene_manager.start(&mut context);

        Self { systems, context, renderer }
    }

    fn tick(&mut self, input: Vec<InputEvent>) -> bool {
        self.context.push_input(input);
        self.context.clock.advance(1.0 / 60.0);
        self.systems.update(&mut self.context);
        self.systems.render(&self.context, &mut self.renderer).unwrap()
    }

    fn tap(&mut self, key: KeyCode) -> bool {
        self.tick(vec![
            InputEvent::KeyDown { key, modifiers: Modifiers::NONE },
            InputEvent::KeyUp { key, modifiers: Modifiers::NONE },
        ])
    }

    fn top(&self) -> Option<LabScene> {
        self.systems.scene_manager.top()
    }
}

//=========================================================================
// Navigation
//=========================================================================

#[test]
fn page_down_visits_every_exercise_and_wraps() {
    let mut lab = Lab::start(LabScene::Start);
    assert!(lab.tick(Vec::new()));

    for expected in LabScene::ALL.iter().skip(1) {
        assert!(lab.tap(KeyCode::PageDown), "{:?} rendered nothing", expected);
        assert_eq!(lab.top(), Some(*expected));
        assert_eq!(lab.systems.scene_manager.stack().len(), 1);
        assert!(lab.renderer.last_frame().draw_calls > 0, "{:?} drew nothing", expected);
    }

    lab.tap(KeyCode::PageDown);
    assert_eq!(lab.top(), Some(LabScene::Start));
}

#[test]
fn page_up_goes_backwards() {
    let mut lab = Lab::start(LabScene::Start);
    lab.tap(KeyCode::PageUp);
    assert_eq!(lab.top(), Some(LabScene::PhysicsSandbox));
    lab.tap(KeyCode::PageUp);
    assert_eq!(lab.top(), Some(LabScene::ScrollAnimation));
}

#[test]
fn tab_hands_the_keyboard_to_the_panel_and_back() {
    let mut lab = Lab::start(LabScene::PhysicsSandbox);
    lab.tick(Vec::new());
    let before = lab.renderer.last_frame();

    lab.tap(KeyCode::Tab);
    assert_eq!(lab.systems.input.context(), scenes::PANEL_FOCUS);

    lab.tap(KeyCode::Digit1);
    assert_eq!(lab.renderer.last_frame().draw_calls, before.draw_calls);

    lab.tap(KeyCode::Enter);
    assert_eq!(lab.renderer.last_frame().draw_calls, before.draw_calls + 1);

    lab.tap(KeyCode::Escape);
    assert_eq!(lab.systems.input.context(), InputContext::Primary);
}

#[test]
fn switching_exercise_releases_panel_focus() {
    let mut lab = Lab::start(LabScene::Lights);
    lab.tap(KeyCode::Tab);
    assert_eq!(lab.systems.input.context(), scenes::PANEL_FOCUS);

    lab.tap(KeyCode::PageDown);
    assert_eq!(lab.top(), Some(LabScene::Shadows));
    assert_eq!(lab.systems.input.context(), InputContext::Primary);
}

//=========================================================================
// Scene Behaviour
//=========================================================================

#[test]
fn galaxy_draws_configured_star_count() {
    let mut lab = Lab::start(LabScene::Galaxy);
    lab.tick(Vec::new());
    assert_eq!(lab.renderer.last_frame().points, 1000);
}

#[test]
fn sandbox_shortcut_adds_a_shadow_casting_body() {
    let mut lab = Lab::start(LabScene::PhysicsSandbox);
    lab.tick(Vec::new());
    let before = lab.renderer.last_frame();

    lab.tap(KeyCode::Digit1);
    let after = lab.renderer.last_frame();
    assert_eq!(after.draw_calls, before.draw_calls + 1);
    assert_eq!(after.shadow_casters, before.shadow_casters + 1);
}

#[test]
fn resize_reaches_the_renderer_viewport() {
    let mut lab = Lab::start(LabScene::Lights);
    assert!(lab.context.resize(1920, 1080, 3.0));
    lab.renderer.resize(&lab.context.viewport);
    lab.tick(Vec::new());

    assert_eq!(lab.renderer.pixel_ratio(), 2.0);
    assert!(lab.context.resized().is_none());
}
