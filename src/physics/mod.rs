//=========================================================================
// Physics
//=========================================================================
//
// Coupling between the visual scene graph and a rapier3d world.
//
// Architecture:
//   DynamicsWorld   fixed-step simulation, floor half-space, impacts
//   PhysicsBinding  {node, body} registry, pose sync, bulk reset
//   ImpactSound     strong impacts → SoundSink
//
//=========================================================================

//=== Module Declarations =================================================

mod binding;
mod sound;
mod world;

//=== Public API ==========================================================

pub use binding::{BoundObject, PhysicsBinding};
pub use sound::{ImpactSound, LogSoundSink, SoundSink};
pub use world::{BodyId, DynamicsWorld, Impact, WorldSettings};
