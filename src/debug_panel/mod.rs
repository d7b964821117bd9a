//=========================================================================
// Debug Panel
//=========================================================================
//
// Live-editable parameters for the current exercise.
//
//=========================================================================

//=== Module Declarations =================================================

mod control;
mod panel;

//=== Public API ==========================================================

pub use control::{Control, ControlId, ControlValue, NumberRange};
pub use panel::{DebugPanel, PanelCommand, PanelEvent, PanelEventKind, HUE_STEP};
