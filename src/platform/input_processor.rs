//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit window events into engine InputEvents.
//
//   KeyboardInput      → KeyDown / KeyUp      (with cached modifiers)
//   MouseInput         → MouseButtonDown / Up (with cached modifiers)
//   CursorMoved        → MouseMoved
//   MouseWheel         → MouseWheel in pixels, positive = scroll down
//
// Line-based wheels are scaled by LINE_HEIGHT_PX so every device reports
// pixels. Unmapped keys are filtered out.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

/// Pixels per wheel notch for line-based devices.
const LINE_HEIGHT_PX: f32 = 40.0;

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self { modifiers: Modifiers::NONE }
    }

    //--- Modifier State ---------------------------------------------------

    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    pub(crate) fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //--- Conversion -------------------------------------------------------

    pub(crate) fn process_key_event(&self, event: &KeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        self.key(KeyCode::from(code), event.state)
    }

    fn key(&self, key: KeyCode, state: ElementState) -> Option<InputEvent> {
        if key == KeyCode::Unidentified {
            return None;
        }
        let modifiers = self.modifiers;
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        })
    }

    pub(crate) fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }

    pub(crate) fn process_mouse_move(&self, x: f64, y: f64) -> InputEvent {
        InputEvent::MouseMoved { x: x as f32, y: y as f32 }
    }

    /// winit reports positive y when the wheel rolls away from the user
    /// (page up); the engine convention is positive = page down.
    pub(crate) fn process_wheel(&self, delta: MouseScrollDelta) -> InputEvent {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x * LINE_HEIGHT_PX, y * LINE_HEIGHT_PX),
            MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
        };
        InputEvent::MouseWheel { delta_x: -dx, delta_y: -dy }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Digits, letters, arrows, paging and editing keys; everything else is
/// `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            W::Digit0 => Self::Digit0,
            W::Digit1 => Self::Digit1,
            W::Digit2 => Self::Digit2,
            W::Digit3 => Self::Digit3,
            W::Digit4 => Self::Digit4,
            W::Digit5 => Self::Digit5,
            W::Digit6 => Self::Digit6,
            W::Digit7 => Self::Digit7,
            W::Digit8 => Self::Digit8,
            W::Digit9 => Self::Digit9,

            W::KeyA => Self::KeyA,
            W::KeyB => Self::KeyB,
            W::KeyC => Self::KeyC,
            W::KeyD => Self::KeyD,
            W::KeyE => Self::KeyE,
            W::KeyF => Self::KeyF,
            W::KeyG => Self::KeyG,
            W::KeyH => Self::KeyH,
            W::KeyI => Self::KeyI,
            W::KeyJ => Self::KeyJ,
            W::KeyK => Self::KeyK,
            W::KeyL => Self::KeyL,
            W::KeyM => Self::KeyM,
            W::KeyN => Self::KeyN,
            W::KeyO => Self::KeyO,
            W::KeyP => Self::KeyP,
            W::KeyQ => Self::KeyQ,
            W::KeyR => Self::KeyR,
            W::KeyS => Self::KeyS,
            W::KeyT => Self::KeyT,
            W::KeyU => Self::KeyU,
            W::KeyV => Self::KeyV,
            W::KeyW => Self::KeyW,
            W::KeyX => Self::KeyX,
            W::KeyY => Self::KeyY,
            W::KeyZ => Self::KeyZ,

            W::ArrowUp => Self::ArrowUp,
            W::ArrowDown => Self::ArrowDown,
            W::ArrowLeft => Self::ArrowLeft,
            W::ArrowRight => Self::ArrowRight,
            W::PageUp => Self::PageUp,
            W::PageDown => Self::PageDown,

            W::Space => Self::Space,
            W::Enter => Self::Enter,
            W::Escape => Self::Escape,
            W::Tab => Self::Tab,
            W::Backspace => Self::Backspace,
            W::Delete => Self::Delete,

            _ => Self::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => Self::Left,
            WinitMouseButton::Right => Self::Right,
            WinitMouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    fn with_mods(shift: bool, ctrl: bool, alt: bool) -> InputProcessor {
        let mut state = ModifiersState::empty();
        state.set(ModifiersState::SHIFT, shift);
        state.set(ModifiersState::CONTROL, ctrl);
        state.set(ModifiersState::ALT, alt);

        let mut processor = InputProcessor::new();
        processor.update_modifiers(state);
        processor
    }

    //=====================================================================
    // Modifier Tests
    //=====================================================================

    #[test]
    fn cached_modifiers_apply_to_keys_and_buttons() {
        let processor = with_mods(true, false, true);
        assert_eq!(processor.modifiers(), Modifiers { shift: true, ctrl: false, alt: true });

        let key = processor.key(KeyCode::Space, ElementState::Pressed).unwrap();
        assert_eq!(key, InputEvent::KeyDown { key: KeyCode::Space, modifiers: processor.modifiers() });

        let button = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Released);
        assert_eq!(
            button,
            InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: processor.modifiers() }
        );
    }

    //=====================================================================
    // Key Tests
    //=====================================================================

    #[test]
    fn unidentified_keys_are_filtered() {
        let processor = InputProcessor::new();
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert!(processor.key(KeyCode::Unidentified, ElementState::Pressed).is_none());
    }

    #[test]
    fn paging_keys_are_mapped() {
        assert_eq!(KeyCode::from(WinitKeyCode::PageDown), KeyCode::PageDown);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit7), KeyCode::Digit7);
    }

    //=====================================================================
    // Pointer Tests
    //=====================================================================

    #[test]
    fn wheel_lines_become_pixels_with_page_down_positive() {
        let processor = InputProcessor::new();
        let event = processor.process_wheel(MouseScrollDelta::LineDelta(0.0, -1.0));
        assert!(matches!(event, InputEvent::MouseWheel { delta_y, .. } if delta_y == 40.0));
    }

    #[test]
    fn wheel_pixels_keep_magnitude() {
        let processor = InputProcessor::new();
        let event = processor.process_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(3.0, 12.5)));
        assert!(matches!(
            event,
            InputEvent::MouseWheel { delta_x, delta_y } if delta_x == -3.0 && delta_y == -12.5
        ));
    }

    #[test]
    fn cursor_position_is_narrowed() {
        let event = InputProcessor::new().process_mouse_move(123.5, 456.75);
        assert!(matches!(event, InputEvent::MouseMoved { x, y } if x == 123.5 && y == 456.75));
    }

    #[test]
    fn buttons_map_with_fallback() {
        assert_eq!(MouseButton::from(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
    }
}
