//=========================================================================
// Platform Bridge
//=========================================================================
//
// Core-side half of the window/logic thread split.
//
// - `interface`: the events and errors crossing the channel
// - `event_collector`: bounded draining of that channel once per tick
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub use interface::{PlatformError, PlatformEvent};
