//=========================================================================
// Lab Scenes
//=========================================================================
//
// One scene per exercise, cycled with PageUp / PageDown.
//
// Key bindings, scene context:
//   PageDown / PageUp      next / previous exercise
//   Tab                    focus the debug panel
//   Digit1 / Digit2        sandbox: drop a sphere / a box
//
// Key bindings, panel context:
//   PageDown / PageUp      next / previous exercise
//   ArrowDown / ArrowUp    select next / previous control (Shift+Tab too)
//   ArrowRight / ArrowLeft nudge the selected number or color by one step
//   Enter                  flip a toggle or press a button
//   Tab / Escape           back to the scene context
//
//=========================================================================

//=== Module Declarations =================================================

mod animation;
mod assets;
mod camera_controls;
mod galaxy;
mod group;
mod gui_playground;
mod haunted_house;
mod lights;
mod materials;
mod physics_sandbox;
mod scroll;
mod shadows;
mod stage;
mod start;
mod text;
mod textures;

//=== Public API ==========================================================

pub use animation::AnimationScene;
pub use assets::Assets;
pub use camera_controls::CameraControlsScene;
pub use galaxy::GalaxyScene;
pub use group::GroupScene;
pub use gui_playground::GuiPlaygroundScene;
pub use haunted_house::HauntedHouseScene;
pub use lights::LightsScene;
pub use materials::MaterialsScene;
pub use physics_sandbox::PhysicsSandboxScene;
pub use scroll::ScrollScene;
pub use shadows::ShadowsScene;
pub use start::StartScene;
pub use text::TextScene;
pub use textures::TexturesScene;

//=== External Dependencies ===============================================

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::config::LabConfig;
use crate::core::globals::{GlobalContext, GlobalSystems};
use crate::core::input::{Action, InputContext, KeyCode, Modifiers};
use crate::core::scene::{Scene, SceneKey, SceneManager, SceneTransition};
use crate::debug_panel::{DebugPanel, PanelCommand};

//=== LabScene ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabScene {
    #[default]
    Start,
    Group,
    Animation,
    CameraControls,
    GuiPlayground,
    Textures,
    Materials,
    Text,
    Lights,
    Shadows,
    HauntedHouse,
    Galaxy,
    ScrollAnimation,
    PhysicsSandbox,
}

impl SceneKey for LabScene {}

impl LabScene {
    /// Course order.
    pub const ALL: [LabScene; 14] = [
        LabScene::Start,
        LabScene::Group,
        LabScene::Animation,
        LabScene::CameraControls,
        LabScene::GuiPlayground,
        LabScene::Textures,
        LabScene::Materials,
        LabScene::Text,
        LabScene::Lights,
        LabScene::Shadows,
        LabScene::HauntedHouse,
        LabScene::Galaxy,
        LabScene::ScrollAnimation,
        LabScene::PhysicsSandbox,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// Following exercise, wrapping to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Preceding exercise, wrapping to the last.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Group => "Group",
            Self::Animation => "Animation",
            Self::CameraControls => "Camera Controls",
            Self::GuiPlayground => "Debug GUI",
            Self::Textures => "Textures",
            Self::Materials => "Materials",
            Self::Text => "3D Text",
            Self::Lights => "Lights",
            Self::Shadows => "Shadows",
            Self::HauntedHouse => "Haunted House",
            Self::Galaxy => "Galaxy Generator",
            Self::ScrollAnimation => "Scroll Based Animation",
            Self::PhysicsSandbox => "Physics",
        }
    }
}

//=== LabAction ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabAction {
    NextScene,
    PreviousScene,
    PanelNext,
    PanelPrevious,
    PanelIncrease,
    PanelDecrease,
    PanelActivate,
    FocusPanel,
    ReleasePanel,
    SpawnSphere,
    SpawnBox,
}

impl Action for LabAction {}

//=== Registration ========================================================

/// Binding set active while the debug panel has keyboard focus.
pub const PANEL_FOCUS: InputContext = InputContext::custom(1);

/// Binds the lab keys and registers every exercise, starting at
/// `config.start_scene`.
pub fn register(systems: &mut GlobalSystems<LabScene, LabAction>, config: &LabConfig) {
    let input = &mut systems.input;
    input.bind_key(KeyCode::PageDown, LabAction::NextScene);
    input.bind_key(KeyCode::PageUp, LabAction::PreviousScene);
    input.bind_key(KeyCode::Tab, LabAction::FocusPanel);
    input.bind_key(KeyCode::Digit1, LabAction::SpawnSphere);
    input.bind_key(KeyCode::Digit2, LabAction::SpawnBox);

    let panel_keys = [
        (KeyCode::PageDown, Modifiers::NONE, LabAction::NextScene),
        (KeyCode::PageUp, Modifiers::NONE, LabAction::PreviousScene),
        (KeyCode::ArrowDown, Modifiers::NONE, LabAction::PanelNext),
        (KeyCode::ArrowUp, Modifiers::NONE, LabAction::PanelPrevious),
        (KeyCode::Tab, Modifiers::SHIFT, LabAction::PanelPrevious),
        (KeyCode::ArrowRight, Modifiers::NONE, LabAction::PanelIncrease),
        (KeyCode::ArrowLeft, Modifiers::NONE, LabAction::PanelDecrease),
        (KeyCode::Enter, Modifiers::NONE, LabAction::PanelActivate),
        (KeyCode::Tab, Modifiers::NONE, LabAction::ReleasePanel),
        (KeyCode::Escape, Modifiers::NONE, LabAction::ReleasePanel),
    ];
    for (key, modifiers, action) in panel_keys {
        input.bind_in(key, modifiers, action, PANEL_FOCUS);
    }

    let assets = Assets::new(&config.assets.root);
    let rng = |salt: u64| ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(salt));

    let manager = &mut systems.scene_manager;
    for key in LabScene::ALL {
        let start = key == config.start_scene;
        match key {
            LabScene::Start => add(manager, key, start, StartScene::new()),
            LabScene::Group => add(manager, key, start, GroupScene::new()),
            LabScene::Animation => add(manager, key, start, AnimationScene::new()),
            LabScene::CameraControls => add(manager, key, start, CameraControlsScene::new()),
            LabScene::GuiPlayground => add(manager, key, start, GuiPlaygroundScene::new()),
            LabScene::Textures => add(manager, key, start, TexturesScene::new(&assets)),
            LabScene::Materials => add(manager, key, start, MaterialsScene::new(&assets)),
            LabScene::Text => add(manager, key, start, TextScene::new(&assets, &mut rng(1))),
            LabScene::Lights => add(manager, key, start, LightsScene::new()),
            LabScene::Shadows => add(manager, key, start, ShadowsScene::new(&assets)),
            LabScene::HauntedHouse => add(manager, key, start, HauntedHouseScene::new(&assets, &mut rng(2))),
            LabScene::Galaxy => add(manager, key, start, GalaxyScene::new(config.galaxy.clone(), rng(3))),
            LabScene::ScrollAnimation => add(manager, key, start, ScrollScene::new(&assets, &mut rng(4))),
            LabScene::PhysicsSandbox => add(manager, key, start, PhysicsSandboxScene::new(&config.physics, rng(5))),
        }
    }

    info!(
        "Registered {} scenes, starting at {:?} (assets: {} loaded, {} failed)",
        manager.scene_count(),
        config.start_scene,
        assets.manager().loaded(),
        assets.manager().failed()
    );
}

fn add<T>(manager: &mut SceneManager<LabScene>, key: LabScene, start: bool, scene: T)
where
    T: Scene<LabScene> + 'static,
{
    if start {
        manager.register_default(key, scene);
    } else {
        manager.register_scene(key, scene);
    }
}

//=== Shared Scene Helpers ================================================

/// Queues a switch away from `current` when a scene action fired, and
/// hands the keyboard back to the scene context.
///
/// Returns `true` when a transition was queued.
pub(crate) fn navigate(context: &mut GlobalContext, current: LabScene) -> bool {
    let target = context.message_bus.read::<LabAction>().iter().find_map(|action| match action {
        LabAction::NextScene => Some(current.next()),
        LabAction::PreviousScene => Some(current.previous()),
        _ => None,
    });

    match target {
        Some(next) => {
            debug!("Switching {:?} -> {:?}", current, next);
            context.message_bus.push(SceneTransition::Replace(current, next));
            context.message_bus.push(InputContext::Primary);
            true
        }
        None => false,
    }
}

/// Applies this tick's panel actions to `panel` and requests focus
/// changes. An empty panel never takes focus.
pub(crate) fn drive_panel(context: &mut GlobalContext, panel: &mut DebugPanel) {
    let mut focus = None;
    for action in context.message_bus.read::<LabAction>() {
        let command = match action {
            LabAction::PanelNext => PanelCommand::Next,
            LabAction::PanelPrevious => PanelCommand::Previous,
            LabAction::PanelIncrease => PanelCommand::Increase,
            LabAction::PanelDecrease => PanelCommand::Decrease,
            LabAction::PanelActivate => PanelCommand::Activate,
            LabAction::FocusPanel if !panel.is_empty() => {
                focus = Some(PANEL_FOCUS);
                continue;
            }
            LabAction::ReleasePanel => {
                focus = Some(InputContext::Primary);
                continue;
            }
            _ => continue,
        };
        panel.apply(command);
    }

    if let Some(focus) = focus {
        debug!("[{}] keyboard focus -> {:?}", panel.title(), focus);
        context.message_bus.push(focus);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
