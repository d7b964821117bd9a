//=========================================================================
// Debug Panel
//=========================================================================
//
// Ordered, keyboard-driven list of live parameters for one scene.
//
//   apply(PanelCommand) ─┬─ Next / Previous   move the selection
//                        ├─ Increase/Decrease one step on a number,
//                        │                    one hue step on a color
//                        └─ Activate          flip a toggle, press a button
//
// Every value change queues Changed followed by FinishChanged; a button
// press queues Pressed. Scenes drain the queue once per tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::control::{Control, ControlId, ControlValue, NumberRange};
use crate::graphics::Color;

//=== Events ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEventKind {
    Changed,
    FinishChanged,
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelEvent {
    pub control: ControlId,
    pub kind: PanelEventKind,
}

//=== PanelCommand ========================================================

/// Hue rotation applied to a color control per Increase/Decrease.
pub const HUE_STEP: f32 = 1.0 / 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    Next,
    Previous,
    Increase,
    Decrease,
    Activate,
}

//=== DebugPanel ==========================================================

#[derive(Debug, Clone, Default)]
pub struct DebugPanel {
    title: String,
    controls: Vec<Control>,
    selected: Option<usize>,
    events: Vec<PanelEvent>,
}

impl DebugPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    //--- Building ---------------------------------------------------------

    pub fn add_number(&mut self, label: impl Into<String>, value: f32, range: NumberRange) -> ControlId {
        let value = range.fit(value);
        self.push(Control::new(label, ControlValue::Number { value, range }))
    }

    pub fn add_toggle(&mut self, label: impl Into<String>, on: bool) -> ControlId {
        self.push(Control::new(label, ControlValue::Toggle(on)))
    }

    pub fn add_color(&mut self, label: impl Into<String>, color: Color) -> ControlId {
        self.push(Control::new(label, ControlValue::Color(color)))
    }

    pub fn add_button(&mut self, label: impl Into<String>) -> ControlId {
        self.push(Control::new(label, ControlValue::Button))
    }

    fn push(&mut self, control: Control) -> ControlId {
        self.controls.push(control);
        let id = self.controls.len() - 1;
        if self.selected.is_none() {
            self.selected = Some(id);
        }
        ControlId(id)
    }

    /// Hides a control from navigation; it keeps its value.
    pub fn set_hidden(&mut self, id: ControlId, hidden: bool) {
        if let Some(control) = self.controls.get_mut(id.0) {
            control.hidden = hidden;
        }
        if hidden && self.selected == Some(id.0) {
            self.selected = self.step_selection(id.0, 1);
        } else if !hidden && self.selected.is_none() {
            self.selected = Some(id.0);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.0)
    }

    pub fn number(&self, id: ControlId) -> Option<f32> {
        self.control(id).and_then(Control::number)
    }

    pub fn toggle(&self, id: ControlId) -> Option<bool> {
        self.control(id).and_then(Control::toggle)
    }

    pub fn color(&self, id: ControlId) -> Option<Color> {
        self.control(id).and_then(Control::color)
    }

    pub fn selected(&self) -> Option<ControlId> {
        self.selected.map(ControlId)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    //--- Editing ----------------------------------------------------------

    /// Sets a number, fitted to its range. Returns whether it changed.
    pub fn set_number(&mut self, id: ControlId, new_value: f32) -> bool {
        let Some(ControlValue::Number { value, range }) = self.controls.get_mut(id.0).map(|c| &mut c.value) else {
            warn!("Control {:?} is not a number", id);
            return false;
        };
        let fitted = range.fit(new_value);
        if fitted == *value {
            return false;
        }
        *value = fitted;
        self.changed(id);
        true
    }

    pub fn set_toggle(&mut self, id: ControlId, on: bool) -> bool {
        let Some(ControlValue::Toggle(current)) = self.controls.get_mut(id.0).map(|c| &mut c.value) else {
            warn!("Control {:?} is not a toggle", id);
            return false;
        };
        if *current == on {
            return false;
        }
        *current = on;
        self.changed(id);
        true
    }

    pub fn set_color(&mut self, id: ControlId, color: Color) -> bool {
        let Some(ControlValue::Color(current)) = self.controls.get_mut(id.0).map(|c| &mut c.value) else {
            warn!("Control {:?} is not a color", id);
            return false;
        };
        if *current == color {
            return false;
        }
        *current = color;
        self.changed(id);
        true
    }

    /// Presses a button control.
    pub fn press(&mut self, id: ControlId) -> bool {
        if !matches!(self.control(id).map(|c| c.value), Some(ControlValue::Button)) {
            return false;
        }
        self.events.push(PanelEvent { control: id, kind: PanelEventKind::Pressed });
        true
    }

    fn changed(&mut self, id: ControlId) {
        self.events.push(PanelEvent { control: id, kind: PanelEventKind::Changed });
        self.events.push(PanelEvent { control: id, kind: PanelEventKind::FinishChanged });
    }

    //--- Navigation -------------------------------------------------------

    pub fn apply(&mut self, command: PanelCommand) {
        match command {
            PanelCommand::Next => self.move_selection(1),
            PanelCommand::Previous => self.move_selection(-1),
            PanelCommand::Increase => self.nudge(1.0),
            PanelCommand::Decrease => self.nudge(-1.0),
            PanelCommand::Activate => self.activate(),
        }
    }

    fn move_selection(&mut self, direction: isize) {
        if let Some(current) = self.selected {
            self.selected = self.step_selection(current, direction);
            if let Some(control) = self.selected.and_then(|i| self.controls.get(i)) {
                debug!("[{}] selected '{}'", self.title, control.label);
            }
        }
    }

    /// Next visible index from `from` in `direction`, wrapping around.
    fn step_selection(&self, from: usize, direction: isize) -> Option<usize> {
        let count = self.controls.len() as isize;
        (1..=count)
            .map(|offset| (from as isize + direction * offset).rem_euclid(count) as usize)
            .find(|&i| !self.controls[i].hidden)
    }

    fn nudge(&mut self, direction: f32) {
        let Some(index) = self.selected else { return };
        let id = ControlId(index);
        match self.controls[index].value {
            ControlValue::Number { value, range } => {
                self.set_number(id, value + direction * range.step);
            }
            ControlValue::Color(color) => {
                self.set_color(id, color.rotate_hue(direction * HUE_STEP));
            }
            ControlValue::Toggle(_) | ControlValue::Button => {}
        }
    }

    fn activate(&mut self) {
        let Some(index) = self.selected else { return };
        let id = ControlId(index);
        match self.controls[index].value {
            ControlValue::Toggle(on) => {
                self.set_toggle(id, !on);
            }
            ControlValue::Button => {
                self.press(id);
            }
            ControlValue::Number { .. } | ControlValue::Color(_) => {}
        }
    }

    //--- Events -----------------------------------------------------------

    pub fn drain_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
