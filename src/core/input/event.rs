//=========================================================================
// Input Event Types
//=========================================================================
//
// Portable representation of low-level input coming from the window.
//
// Scenes in this crate react to four kinds of raw input:
// - keys (debug panel navigation, scene switching, sandbox shortcuts)
// - mouse buttons (orbit-controls drag)
// - cursor position (orbit drag, parallax rigs)
// - mouse wheel (orbit zoom, scroll-driven pages)
//
// Event Flow:
// ```text
// winit WindowEvent
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker / ActionMapper
//         ↓
//    LabAction on the message bus
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Side buttons, thumb buttons and anything else.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the produced character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    PageUp,
    PageDown,

    /// Keys the platform reports but this enum does not name.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Discrete events compare by type + payload (key/button + modifiers).
/// Continuous events (`MouseMoved`, `MouseWheel`) compare equal to any
/// event of the same variant, so a per-frame buffer keeps exactly one of
/// each.
///
/// ```text
/// KeyDown{A, CTRL} == KeyDown{A, CTRL}       ✓
/// KeyDown{A, CTRL} == KeyDown{A, SHIFT}      ✗
/// MouseMoved{..}   == MouseMoved{..}         ✓
/// MouseWheel{..}   == MouseWheel{..}         ✓
/// ```
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Key released.
    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Mouse button pressed.
    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Mouse button released.
    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Cursor moved, in physical pixels with a top-left origin.
    MouseMoved { x: f32, y: f32 },

    /// Wheel or touchpad scroll, in pixels.
    ///
    /// Positive `delta_y` scrolls the page down (content moves up), the
    /// same sign convention a browser's `scrollY` grows with.
    MouseWheel { delta_x: f32, delta_y: f32 },

    /// Unrecognized or unsupported event, ignored by the input system.
    Unidentified,
}

//--- Implementation ------------------------------------------------------

impl InputEvent {
    /// Returns a new event with updated modifiers (consumes self).
    ///
    /// Has no effect on continuous events and `Unidentified`.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers: m, .. }
            | Self::KeyUp { modifiers: m, .. }
            | Self::MouseButtonDown { modifiers: m, .. }
            | Self::MouseButtonUp { modifiers: m, .. } => {
                *m = modifiers;
            }
            _ => {}
        }
        self
    }

    /// Returns `true` for events whose latest value supersedes earlier ones.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. } | Self::MouseWheel { .. })
    }

    /// Merges a newer continuous event of the same variant into `self`.
    ///
    /// Cursor positions are replaced, wheel deltas accumulate. Returns
    /// `false` when the variants differ and nothing was merged.
    pub fn coalesce(&mut self, newer: &InputEvent) -> bool {
        match (self, newer) {
            (Self::MouseMoved { x, y }, Self::MouseMoved { x: nx, y: ny }) => {
                *x = *nx;
                *y = *ny;
                true
            }
            (
                Self::MouseWheel { delta_x, delta_y },
                Self::MouseWheel { delta_x: dx, delta_y: dy },
            ) => {
                *delta_x += *dx;
                *delta_y += *dy;
                true
            }
            _ => false,
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (MouseWheel { .. }, MouseWheel { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes discriminant + key/button + modifiers. Continuous payloads are
/// not hashed, consistent with equality.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            _ => {}
        }
    }
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Bindings match modifiers exactly: `Ctrl+S` does not fire on
/// `Ctrl+Shift+S`, and `S` does not fire on `Ctrl+S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key held (either side).
    pub shift: bool,

    /// Ctrl key held (either side, Command on macOS).
    pub ctrl: bool,

    /// Alt key held (either side, Option on macOS).
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };

    /// Shift only.
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };

    /// Ctrl only.
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };

    /// Alt only.
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    /// Shift + Ctrl.
    pub const SHIFT_CTRL: Self = Self { shift: true, ctrl: true, alt: false };

    /// Returns `true` if no modifier is held.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    //=====================================================================
    // Equality & Hashing
    //=====================================================================

    #[test]
    fn same_key_same_modifiers_are_equal() {
        assert_eq!(key_down(KeyCode::KeyA), key_down(KeyCode::KeyA));
        assert_eq!(hash_of(&key_down(KeyCode::KeyA)), hash_of(&key_down(KeyCode::KeyA)));
    }

    #[test]
    fn modifiers_distinguish_events() {
        let plain = key_down(KeyCode::KeyS);
        let ctrl = InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL };
        assert_ne!(plain, ctrl);
    }

    #[test]
    fn continuous_events_ignore_payload() {
        let a = InputEvent::MouseMoved { x: 1.0, y: 2.0 };
        let b = InputEvent::MouseMoved { x: 300.0, y: 400.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let w1 = InputEvent::MouseWheel { delta_x: 0.0, delta_y: 40.0 };
        let w2 = InputEvent::MouseWheel { delta_x: 0.0, delta_y: -12.0 };
        assert_eq!(w1, w2);
        assert_ne!(a, w1);
    }

    #[test]
    fn hashset_keeps_one_event_per_continuous_variant() {
        let mut set = HashSet::new();
        set.insert(InputEvent::MouseMoved { x: 1.0, y: 1.0 });
        set.insert(InputEvent::MouseMoved { x: 2.0, y: 2.0 });
        set.insert(InputEvent::MouseWheel { delta_x: 0.0, delta_y: 1.0 });
        assert_eq!(set.len(), 2);
    }

    //=====================================================================
    // Coalescing
    //=====================================================================

    #[test]
    fn coalesce_replaces_cursor_position() {
        let mut event = InputEvent::MouseMoved { x: 1.0, y: 1.0 };
        assert!(event.coalesce(&InputEvent::MouseMoved { x: 5.0, y: 6.0 }));
        match event {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (5.0, 6.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn coalesce_sums_wheel_deltas() {
        let mut event = InputEvent::MouseWheel { delta_x: 0.0, delta_y: 40.0 };
        assert!(event.coalesce(&InputEvent::MouseWheel { delta_x: 2.0, delta_y: 40.0 }));
        match event {
            InputEvent::MouseWheel { delta_x, delta_y } => {
                assert_eq!(delta_x, 2.0);
                assert_eq!(delta_y, 80.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn coalesce_rejects_mismatched_variants() {
        let mut event = InputEvent::MouseMoved { x: 1.0, y: 1.0 };
        assert!(!event.coalesce(&InputEvent::MouseWheel { delta_x: 0.0, delta_y: 1.0 }));
        assert!(matches!(event, InputEvent::MouseMoved { x, .. } if x == 1.0));
    }

    #[test]
    fn with_modifiers_only_touches_discrete_events() {
        let event = key_down(KeyCode::KeyA).with_modifiers(Modifiers::SHIFT);
        match event {
            InputEvent::KeyDown { modifiers, .. } => assert!(modifiers.shift),
            other => panic!("unexpected {:?}", other),
        }

        let wheel = InputEvent::MouseWheel { delta_x: 0.0, delta_y: 3.0 }
            .with_modifiers(Modifiers::CTRL);
        assert!(wheel.is_continuous());
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert!(Modifiers::NONE.is_empty());
        assert!(!Modifiers::SHIFT_CTRL.is_empty());
    }
}
