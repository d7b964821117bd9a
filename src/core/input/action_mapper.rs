//=========================================================================
// Action Mapper
//=========================================================================
//
// Resolves key and mouse-button presses to actions.
//
// Architecture:
//   (Trigger, Modifiers, InputContext) → HashMap → Action
//
// Only press events resolve. Modifiers match exactly. Bindings outside
// the active context are ignored.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::action::{Action, InputContext};
use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== Trigger =============================================================

/// Physical input that can fire a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Key(KeyCode),
    Button(MouseButton),
}

impl From<KeyCode> for Trigger {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for Trigger {
    fn from(button: MouseButton) -> Self {
        Self::Button(button)
    }
}

type BindingKey = (Trigger, Modifiers, InputContext);

//=== ActionMapper ========================================================

pub(crate) struct ActionMapper<A: Action> {
    bindings: HashMap<BindingKey, A>,
    context: InputContext,
}

impl<A: Action> ActionMapper<A> {
    pub(crate) fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            context: InputContext::Primary,
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds `trigger` + exact `modifiers` in `context`. Rebinding replaces.
    pub(crate) fn bind(
        &mut self,
        trigger: Trigger,
        modifiers: Modifiers,
        action: A,
        context: InputContext,
    ) {
        self.bindings.insert((trigger, modifiers, context), action);
    }

    pub(crate) fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    //--- Context ----------------------------------------------------------

    pub(crate) fn set_context(&mut self, context: InputContext) {
        self.context = context;
    }

    pub(crate) fn context(&self) -> InputContext {
        self.context
    }

    //--- Event Mapping ----------------------------------------------------

    /// Resolves a press event in the active context.
    pub(crate) fn map_event(&self, event: &InputEvent) -> Option<A> {
        let (trigger, modifiers) = match event {
            InputEvent::KeyDown { key, modifiers } => (Trigger::Key(*key), *modifiers),
            InputEvent::MouseButtonDown { button, modifiers } => {
                (Trigger::Button(*button), *modifiers)
            }
            _ => return None,
        };
        self.bindings.get(&(trigger, modifiers, self.context)).copied()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        NextScene,
        CreateSphere,
        Reset,
        Orbit,
    }

    impl Action for TestAction {}

    const PANEL: InputContext = InputContext::custom(1);

    fn key_down(key: KeyCode, modifiers: Modifiers) -> InputEvent {
        InputEvent::KeyDown { key, modifiers }
    }

    //=====================================================================
    // Binding
    //=====================================================================

    #[test]
    fn simple_key_binding_resolves() {
        let mut mapper = ActionMapper::new();
        mapper.bind(KeyCode::PageDown.into(), Modifiers::NONE, TestAction::NextScene, InputContext::Primary);

        assert_eq!(
            mapper.map_event(&key_down(KeyCode::PageDown, Modifiers::NONE)),
            Some(TestAction::NextScene)
        );
        assert_eq!(mapper.map_event(&key_down(KeyCode::PageUp, Modifiers::NONE)), None);
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let mut mapper = ActionMapper::new();
        mapper.bind(KeyCode::KeyS.into(), Modifiers::NONE, TestAction::CreateSphere, InputContext::Primary);
        mapper.bind(KeyCode::KeyR.into(), Modifiers::SHIFT_CTRL, TestAction::Reset, InputContext::Primary);

        assert_eq!(
            mapper.map_event(&key_down(KeyCode::KeyS, Modifiers::NONE)),
            Some(TestAction::CreateSphere)
        );
        assert_eq!(mapper.map_event(&key_down(KeyCode::KeyS, Modifiers::CTRL)), None);
        assert_eq!(mapper.map_event(&key_down(KeyCode::KeyR, Modifiers::CTRL)), None);
        assert_eq!(
            mapper.map_event(&key_down(KeyCode::KeyR, Modifiers::SHIFT_CTRL)),
            Some(TestAction::Reset)
        );
    }

    #[test]
    fn mouse_buttons_bind_like_keys() {
        let mut mapper = ActionMapper::new();
        mapper.bind(MouseButton::Left.into(), Modifiers::NONE, TestAction::Orbit, InputContext::Primary);

        let press = InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE };
        let release = InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::NONE };
        assert_eq!(mapper.map_event(&press), Some(TestAction::Orbit));
        assert_eq!(mapper.map_event(&release), None);
    }

    #[test]
    fn rebinding_replaces_previous_action() {
        let mut mapper = ActionMapper::new();
        mapper.bind(KeyCode::Space.into(), Modifiers::NONE, TestAction::CreateSphere, InputContext::Primary);
        mapper.bind(KeyCode::Space.into(), Modifiers::NONE, TestAction::Reset, InputContext::Primary);

        assert_eq!(mapper.binding_count(), 1);
        assert_eq!(
            mapper.map_event(&key_down(KeyCode::Space, Modifiers::NONE)),
            Some(TestAction::Reset)
        );
    }

    //=====================================================================
    // Contexts
    //=====================================================================

    #[test]
    fn only_active_context_resolves() {
        let mut mapper = ActionMapper::new();
        mapper.bind(KeyCode::Enter.into(), Modifiers::NONE, TestAction::NextScene, InputContext::Primary);
        mapper.bind(KeyCode::Enter.into(), Modifiers::NONE, TestAction::CreateSphere, PANEL);

        let enter = key_down(KeyCode::Enter, Modifiers::NONE);
        assert_eq!(mapper.map_event(&enter), Some(TestAction::NextScene));

        mapper.set_context(PANEL);
        assert_eq!(mapper.context(), PANEL);
        assert_eq!(mapper.map_event(&enter), Some(TestAction::CreateSphere));
    }

    #[test]
    fn same_key_binds_separately_per_context() {
        let mut mapper = ActionMapper::new();
        mapper.bind(KeyCode::Tab.into(), Modifiers::NONE, TestAction::NextScene, InputContext::Primary);
        mapper.bind(KeyCode::Tab.into(), Modifiers::NONE, TestAction::Reset, PANEL);
        assert_eq!(mapper.binding_count(), 2);
    }

    //=====================================================================
    // Filtering
    //=====================================================================

    #[test]
    fn continuous_events_never_resolve() {
        let mut mapper = ActionMapper::<TestAction>::new();
        mapper.bind(KeyCode::KeyA.into(), Modifiers::NONE, TestAction::NextScene, InputContext::Primary);

        assert_eq!(mapper.map_event(&InputEvent::MouseMoved { x: 0.0, y: 0.0 }), None);
        assert_eq!(mapper.map_event(&InputEvent::MouseWheel { delta_x: 0.0, delta_y: 1.0 }), None);
    }
}
