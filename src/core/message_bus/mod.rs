//=========================================================================
// Message Bus
//=========================================================================
//
// Type-keyed queues shared by the host and the running scenes.
//
// Producers on the logic thread:
// - InputSystem publishes the tick's actions
// - the orchestrator publishes `ViewportResized`
// - scenes publish `SceneTransition`, `Impact`, `ImpactSound`, ...
//
//=========================================================================

//=== Module Declarations =================================================

mod message_bus;
mod message_queue;

//=== Public API ==========================================================

pub use message_bus::{Message, MessageBus};
