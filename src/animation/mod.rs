//=========================================================================
// Animation
//=========================================================================
//
// Property tweens on scene graph nodes.
//
//   Tweens::add(Tween::to(node, Property::Rotation, 1.5).y(Target::Relative(3.0)))
//   Tweens::update(graph, dt)   once per tick, drops finished tweens
//
//=========================================================================

//=== Module Declarations =================================================

mod easing;
mod tween;

//=== Public API ==========================================================

pub use easing::Easing;
pub use tween::{Property, Target, Tween, Tweens};
