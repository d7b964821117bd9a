//=========================================================================
// Input
//=========================================================================
//
// Raw input state and action mapping on the logic thread.
//
// Architecture:
//   PlatformEvent::Inputs → InputSystem::process_frame()
//                             ├─ StateTracker (held / pressed / scroll)
//                             └─ ActionMapper → actions → MessageBus
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod action_mapper;
pub(crate) mod event;
mod input_system;
mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, InputContext};
pub use action_mapper::Trigger;
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use input_system::InputSystem;
pub use state_tracker::StateTracker;
