//=========================================================================
// Tweens
//=========================================================================
//
// Time-based interpolation of one node property.
//
//   |── delay ──|────────── duration ──────────|
//               ^ start value sampled here      ^ target reached, dropped
//
// The start value is read from the node when the delay ends, not when
// the tween is created, so chained tweens on the same property pick up
// where the previous one left off.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::debug;

//=== Internal Dependencies ===============================================

use super::easing::Easing;
use crate::graphics::{NodeId, SceneGraph, Transform};

//=== Property ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Position,
    Rotation,
    Scale,
}

impl Property {
    fn read(self, transform: &Transform) -> Vec3 {
        match self {
            Self::Position => transform.position,
            Self::Rotation => transform.rotation,
            Self::Scale => transform.scale,
        }
    }

    fn write(self, transform: &mut Transform, value: Vec3) {
        match self {
            Self::Position => transform.position = value,
            Self::Rotation => transform.rotation = value,
            Self::Scale => transform.scale = value,
        }
    }
}

//=== Target ==============================================================

/// End value of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Absolute(f32),
    /// Offset from the start value (`+=`).
    Relative(f32),
}

impl Target {
    fn resolve(self, start: f32) -> f32 {
        match self {
            Self::Absolute(value) => value,
            Self::Relative(offset) => start + offset,
        }
    }
}

//=== Tween ===============================================================

#[derive(Debug, Clone)]
pub struct Tween {
    node: NodeId,
    property: Property,
    axes: [Option<Target>; 3],
    duration: f32,
    delay: f32,
    easing: Easing,
    elapsed: f32,
    from: Option<Vec3>,
}

impl Tween {
    /// Tween of `property` on `node` lasting `duration` seconds. Axes
    /// without a target keep their current value.
    pub fn to(node: NodeId, property: Property, duration: f32) -> Self {
        Self {
            node,
            property,
            axes: [None; 3],
            duration: duration.max(0.0),
            delay: 0.0,
            easing: Easing::default(),
            elapsed: 0.0,
            from: None,
        }
    }

    //--- Builders ---------------------------------------------------------

    pub fn x(mut self, target: Target) -> Self {
        self.axes[0] = Some(target);
        self
    }

    pub fn y(mut self, target: Target) -> Self {
        self.axes[1] = Some(target);
        self
    }

    pub fn z(mut self, target: Target) -> Self {
        self.axes[2] = Some(target);
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn is_started(&self) -> bool {
        self.from.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }

    //--- Playback ---------------------------------------------------------

    /// Advances by `dt` seconds and writes the eased value into the node.
    ///
    /// Returns `false` once the tween is done or its node is gone.
    pub fn advance(&mut self, graph: &mut SceneGraph, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.delay {
            return true;
        }

        let Some(transform) = graph.transform_mut(self.node) else {
            debug!("Tween target {:?} removed, dropping tween", self.node);
            return false;
        };

        let from = *self.from.get_or_insert_with(|| self.property.read(transform));
        let to = self.end_value(from);

        let progress = if self.duration > 0.0 {
            (self.elapsed - self.delay) / self.duration
        } else {
            1.0
        };
        let eased = self.easing.apply(progress);
        self.property.write(transform, from + (to - from) * eased);

        !self.is_finished()
    }

    fn end_value(&self, from: Vec3) -> Vec3 {
        let mut to = from;
        for (axis, target) in self.axes.iter().enumerate() {
            if let Some(target) = target {
                to[axis] = target.resolve(from[axis]);
            }
        }
        to
    }
}

//=== Tweens ==============================================================

/// Running tweens of one scene, advanced once per tick.
#[derive(Debug, Default)]
pub struct Tweens {
    active: Vec<Tween>,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tween: Tween) {
        self.active.push(tween);
    }

    /// Advances every tween; finished ones are dropped.
    pub fn update(&mut self, graph: &mut SceneGraph, dt: f32) {
        self.active.retain_mut(|tween| tween.advance(graph, dt));
    }

    /// Whether any tween currently drives `node`.
    pub fn is_animating(&self, node: NodeId) -> bool {
        self.active.iter().any(|tween| tween.node == node)
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{Geometry, Material};

    fn graph_with_cube() -> (SceneGraph, NodeId) {
        let mut graph = SceneGraph::new();
        let cube = graph.add_mesh(Geometry::cube(1.0), Material::basic(crate::graphics::Color::RED));
        (graph, cube)
    }

    fn x_of(graph: &SceneGraph, node: NodeId) -> f32 {
        graph.transform(node).unwrap().position.x
    }

    //=====================================================================
    // Tween Tests
    //=====================================================================

    #[test]
    fn delayed_tween_leaves_node_untouched_until_delay_ends() {
        let (mut graph, cube) = graph_with_cube();
        let mut tween = Tween::to(cube, Property::Position, 1.0)
            .x(Target::Absolute(3.0))
            .delay(1.0)
            .ease(Easing::Linear);

        assert!(tween.advance(&mut graph, 0.5));
        assert_eq!(x_of(&graph, cube), 0.0);
        assert!(!tween.is_started());

        assert!(tween.advance(&mut graph, 1.0));
        assert!((x_of(&graph, cube) - 1.5).abs() < 1e-5);

        assert!(!tween.advance(&mut graph, 0.5));
        assert!((x_of(&graph, cube) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn start_value_is_sampled_when_delay_ends() {
        let (mut graph, cube) = graph_with_cube();
        let mut tween = Tween::to(cube, Property::Position, 1.0)
            .x(Target::Relative(1.0))
            .delay(1.0);

        tween.advance(&mut graph, 0.5);
        graph.transform_mut(cube).unwrap().position.x = 10.0;
        tween.advance(&mut graph, 2.0);

        assert!((x_of(&graph, cube) - 11.0).abs() < 1e-5);
    }

    #[test]
    fn relative_targets_move_all_named_axes() {
        let (mut graph, cube) = graph_with_cube();
        graph.transform_mut(cube).unwrap().rotation = Vec3::new(1.0, 1.0, 1.0);

        let mut tween = Tween::to(cube, Property::Rotation, 1.5)
            .ease(Easing::Power2InOut)
            .x(Target::Relative(6.0))
            .y(Target::Relative(3.0));
        while tween.advance(&mut graph, 0.1) {}

        let rotation = graph.transform(cube).unwrap().rotation;
        assert!((rotation - Vec3::new(7.0, 4.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let (mut graph, cube) = graph_with_cube();
        let mut tween = Tween::to(cube, Property::Scale, 0.0).y(Target::Absolute(2.0));
        assert!(!tween.advance(&mut graph, 0.016));
        assert_eq!(graph.transform(cube).unwrap().scale, Vec3::new(1.0, 2.0, 1.0));
    }

    //=====================================================================
    // Tweens Tests
    //=====================================================================

    #[test]
    fn finished_tweens_are_dropped() {
        let (mut graph, cube) = graph_with_cube();
        let mut tweens = Tweens::new();
        tweens.add(Tween::to(cube, Property::Position, 1.0).x(Target::Absolute(3.0)));
        tweens.add(Tween::to(cube, Property::Position, 1.0).x(Target::Absolute(-1.5)).delay(3.0));
        assert!(tweens.is_animating(cube));

        for _ in 0..25 {
            tweens.update(&mut graph, 0.1);
        }
        assert_eq!(tweens.len(), 1);

        for _ in 0..20 {
            tweens.update(&mut graph, 0.1);
        }
        assert!(tweens.is_empty());
        assert!((x_of(&graph, cube) + 1.5).abs() < 1e-5);
    }

    #[test]
    fn removed_node_drops_its_tween() {
        let (mut graph, cube) = graph_with_cube();
        let mut tweens = Tweens::new();
        tweens.add(Tween::to(cube, Property::Position, 2.0).x(Target::Absolute(1.0)));

        graph.remove(cube);
        tweens.update(&mut graph, 0.1);
        assert!(tweens.is_empty());
    }
}
