//=========================================================================
// State Tracker
//=========================================================================
//
// Raw input state with per-frame deltas.
//
// Architecture:
//   InputEvent → process_events() → held sets + cursor + scroll → query
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
// Scroll model: wheel deltas accumulate into a page offset, mirroring a
// browser's `scrollY`. The offset is clamped to [0, scroll_limit] once a
// scene declares how tall its page is.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

/// Persistent input state (held keys, cursor, scroll offset) plus the
/// transitions observed during the current frame.
pub struct StateTracker {
    //--- Persistent State ------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    cursor: Vec2,
    modifiers: Modifiers,
    scroll_offset: Vec2,
    scroll_limit: Option<f32>,

    //--- Frame Deltas ----------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    wheel_delta: Vec2,

    //--- Derived ---------------------------------------------------------
    cursor_delta: Vec2,
    last_cursor: Vec2,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            cursor: Vec2::ZERO,
            modifiers: Modifiers::NONE,
            scroll_offset: Vec2::ZERO,
            scroll_limit: None,
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            buttons_pressed: HashSet::new(),
            buttons_released: HashSet::new(),
            wheel_delta: Vec2::ZERO,
            cursor_delta: Vec2::ZERO,
            last_cursor: Vec2::ZERO,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears per-frame transitions and the wheel delta.
    pub(crate) fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.wheel_delta = Vec2::ZERO;
        self.last_cursor = self.cursor;
    }

    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Computes the cursor delta for the frame.
    pub(crate) fn finalize_frame(&mut self) {
        self.cursor_delta = self.cursor - self.last_cursor;
    }

    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.insert(*key) {
                    self.keys_pressed.insert(*key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released.insert(*key);
                }
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.buttons_down.insert(*button) {
                    self.buttons_pressed.insert(*button);
                }
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.buttons_down.remove(button) {
                    self.buttons_released.insert(*button);
                }
            }

            InputEvent::MouseMoved { x, y } => {
                self.cursor = Vec2::new(*x, *y);
            }

            InputEvent::MouseWheel { delta_x, delta_y } => {
                let delta = Vec2::new(*delta_x, *delta_y);
                self.wheel_delta += delta;
                self.scroll_offset += delta;
                self.clamp_scroll();
            }

            InputEvent::Unidentified => {}
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset.x = self.scroll_offset.x.max(0.0);
        self.scroll_offset.y = match self.scroll_limit {
            Some(limit) => self.scroll_offset.y.clamp(0.0, limit),
            None => self.scroll_offset.y.max(0.0),
        };
    }

    //=====================================================================
    // Scroll Control
    //=====================================================================

    /// Sets the maximum vertical scroll offset in pixels (page height minus
    /// one viewport). `None` leaves the page unbounded below.
    pub fn set_scroll_limit(&mut self, limit: Option<f32>) {
        self.scroll_limit = limit.map(|l| l.max(0.0));
        self.clamp_scroll();
    }

    /// Scrolls back to the top of the page.
    pub fn reset_scroll(&mut self) {
        self.scroll_offset = Vec2::ZERO;
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` only on the frame the key came up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    //=====================================================================
    // Query API - Mouse Buttons
    //=====================================================================

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    //=====================================================================
    // Query API - Cursor & Wheel
    //=====================================================================

    /// Cursor position in physical pixels, top-left origin.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Cursor movement since the previous frame.
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Cursor mapped to `[-0.5, 0.5]` on both axes, `+y` pointing down.
    ///
    /// Returns zero for a degenerate viewport.
    pub fn cursor_normalized(&self, width: f32, height: f32) -> Vec2 {
        if width <= 0.0 || height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(self.cursor.x / width - 0.5, self.cursor.y / height - 0.5)
    }

    /// Wheel movement received this frame, in pixels.
    pub fn wheel_delta(&self) -> Vec2 {
        self.wheel_delta
    }

    /// Accumulated page scroll, in pixels.
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    //=====================================================================
    // Query API - Modifiers
    //=====================================================================

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn shift_held(&self) -> bool {
        self.modifiers.shift
    }

    pub fn ctrl_held(&self) -> bool {
        self.modifiers.ctrl
    }

    //=====================================================================
    // Query API - Iteration
    //=====================================================================

    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_pressed.iter()
    }

    pub fn buttons_pressed(&self) -> impl Iterator<Item = &MouseButton> {
        self.buttons_pressed.iter()
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
