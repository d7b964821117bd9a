//=========================================================================
// Panel Controls
//=========================================================================

use crate::graphics::Color;

//=== ControlId ===========================================================

/// Index of a control inside its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub(crate) usize);

//=== NumberRange =========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl NumberRange {
    pub fn new(min: f32, max: f32, step: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self { min, max, step: step.abs() }
    }

    /// Snaps to the step grid anchored at `min`, then clamps.
    pub fn fit(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.min;
        }
        let snapped = if self.step > 0.0 {
            self.min + ((value - self.min) / self.step).round() * self.step
        } else {
            value
        };
        snapped.clamp(self.min, self.max)
    }
}

//=== ControlValue ========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Number { value: f32, range: NumberRange },
    Toggle(bool),
    Color(Color),
    Button,
}

//=== Control =============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub label: String,
    pub value: ControlValue,
    /// Hidden controls keep their value but are skipped by navigation.
    pub hidden: bool,
}

impl Control {
    pub(crate) fn new(label: impl Into<String>, value: ControlValue) -> Self {
        Self { label: label.into(), value, hidden: false }
    }

    pub fn number(&self) -> Option<f32> {
        match self.value {
            ControlValue::Number { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn toggle(&self) -> Option<bool> {
        match self.value {
            ControlValue::Toggle(on) => Some(on),
            _ => None,
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self.value {
            ControlValue::Color(color) => Some(color),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
