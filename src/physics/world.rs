//=========================================================================
// Dynamics World
//=========================================================================
//
// rapier3d pipeline with a fixed-step accumulator.
//
//   step(fixed_dt, elapsed_dt, max_substeps)
//     accumulator += elapsed_dt
//     while accumulator >= fixed_dt && substeps < max_substeps:
//         record linear velocities → pipeline.step → collect contact starts
//     accumulator %= fixed_dt
//
// Impact speed is measured along the contact normal with the velocities
// recorded before the substep that produced the contact, since the solver
// has already pushed the bodies apart by the time the event is reported.
// Every dynamic body in a new contact gets its own `Impact`, so two bodies
// colliding report twice and a floor hit reports once.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::sync::Mutex;

use glam::{Quat, Vec3};
use log::trace;
use rapier3d::prelude::*;

//=== WorldSettings =======================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSettings {
    pub gravity: Vec3,
    pub friction: f32,
    pub restitution: f32,
    /// Floor tilt about −X in radians; π/2 makes the floor horizontal.
    pub floor_tilt: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.82, 0.0),
            friction: 0.1,
            restitution: 0.7,
            floor_tilt: std::f32::consts::FRAC_PI_2,
        }
    }
}

//=== Identifiers =========================================================

/// Handle of a dynamic body inside a [`DynamicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(RigidBodyHandle);

//=== Impact ==============================================================

/// A contact that started during the last `step`, seen from `body`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub body: BodyId,
    /// Other dynamic body, `None` for the floor.
    pub other: Option<BodyId>,
    /// Relative speed along the contact normal, always ≥ 0.
    pub velocity: f32,
}

//=== Contact Collection ==================================================

#[derive(Debug, Clone, Copy)]
struct ContactStart {
    collider1: ColliderHandle,
    collider2: ColliderHandle,
    normal: Option<Vector<Real>>,
}

/// Collects contact starts raised while the pipeline steps.
#[derive(Default)]
struct ContactCollector {
    started: Mutex<Vec<ContactStart>>,
}

impl ContactCollector {
    fn take(&self) -> Vec<ContactStart> {
        match self.started.lock() {
            Ok(mut started) => std::mem::take(&mut *started),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        contact_pair: Option<&ContactPair>,
    ) {
        let CollisionEvent::Started(collider1, collider2, _) = event else {
            return;
        };
        let normal = contact_pair
            .and_then(|pair| pair.manifolds.first())
            .map(|manifold| manifold.data.normal);

        let start = ContactStart { collider1, collider2, normal };
        match self.started.lock() {
            Ok(mut started) => started.push(start),
            Err(poisoned) => poisoned.into_inner().push(start),
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

//=== DynamicsWorld =======================================================

pub struct DynamicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    contacts: ContactCollector,

    settings: WorldSettings,
    floor: ColliderHandle,
    accumulator: f32,
    impacts: Vec<Impact>,
}

impl DynamicsWorld {
    //--- Construction -----------------------------------------------------

    /// Empty world with a static floor half-space.
    pub fn new(settings: WorldSettings) -> Self {
        let mut colliders = ColliderSet::new();
        let floor = colliders.insert(
            ColliderBuilder::halfspace(Vector::z_axis())
                .rotation(vector![-settings.floor_tilt, 0.0, 0.0])
                .friction(settings.friction)
                .restitution(settings.restitution)
                .build(),
        );

        Self {
            gravity: vector![settings.gravity.x, settings.gravity.y, settings.gravity.z],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            contacts: ContactCollector::default(),
            settings,
            floor,
            accumulator: 0.0,
            impacts: Vec::new(),
        }
    }

    //--- Floor ------------------------------------------------------------

    /// Rotates the floor plane about −X. At π/2 the normal points up.
    pub fn set_floor_tilt(&mut self, angle: f32) {
        self.settings.floor_tilt = angle;
        if let Some(floor) = self.colliders.get_mut(self.floor) {
            floor.set_rotation(Rotation::from_axis_angle(&Vector::x_axis(), -angle));
        }
    }

    pub fn floor_tilt(&self) -> f32 {
        self.settings.floor_tilt
    }

    /// World-space floor normal.
    pub fn floor_normal(&self) -> Vec3 {
        Quat::from_rotation_x(-self.settings.floor_tilt) * Vec3::Z
    }

    //--- Bodies -----------------------------------------------------------

    /// Unit-mass dynamic sphere.
    pub fn add_sphere(&mut self, radius: f32, position: Vec3) -> BodyId {
        self.add_body(ColliderBuilder::ball(radius), position)
    }

    /// Unit-mass dynamic box.
    pub fn add_box(&mut self, half_extents: Vec3, position: Vec3) -> BodyId {
        self.add_body(ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z), position)
    }

    fn add_body(&mut self, shape: ColliderBuilder, position: Vec3) -> BodyId {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .can_sleep(false)
            .build();
        let handle = self.bodies.insert(body);

        let collider = shape
            .mass(1.0)
            .friction(self.settings.friction)
            .restitution(self.settings.restitution)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.colliders.insert_with_parent(collider, handle, &mut self.bodies);

        trace!("Body {:?} added at {:?}", handle, position);
        BodyId(handle)
    }

    /// Removes a body and its colliders. Returns `false` if it was unknown.
    pub fn remove(&mut self, body: BodyId) -> bool {
        self.bodies
            .remove(
                body.0,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn contains(&self, body: BodyId) -> bool {
        self.bodies.contains(body.0)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn position(&self, body: BodyId) -> Option<Vec3> {
        let t = self.bodies.get(body.0)?.translation();
        Some(Vec3::new(t.x, t.y, t.z))
    }

    pub fn orientation(&self, body: BodyId) -> Option<Quat> {
        let q = self.bodies.get(body.0)?.rotation();
        Some(Quat::from_xyzw(q.i, q.j, q.k, q.w))
    }

    pub fn linear_velocity(&self, body: BodyId) -> Option<Vec3> {
        let v = self.bodies.get(body.0)?.linvel();
        Some(Vec3::new(v.x, v.y, v.z))
    }

    /// Applies a force at a world-space point for the next substep.
    pub fn apply_force_at_point(&mut self, body: BodyId, force: Vec3, point: Vec3) {
        if let Some(rb) = self.bodies.get_mut(body.0) {
            rb.add_force_at_point(vector![force.x, force.y, force.z], point![point.x, point.y, point.z], true);
        }
    }

    //--- Simulation -------------------------------------------------------

    /// Advances by `elapsed_dt` in fixed steps of `fixed_dt`, at most
    /// `max_substeps` of them. Returns the number of substeps taken.
    pub fn step(&mut self, fixed_dt: f32, elapsed_dt: f32, max_substeps: u32) -> u32 {
        self.impacts.clear();
        if elapsed_dt <= 0.0 || fixed_dt <= 0.0 {
            return 0;
        }

        self.integration_parameters.dt = fixed_dt;
        self.accumulator += elapsed_dt;

        let mut substeps = 0;
        while self.accumulator >= fixed_dt && substeps < max_substeps {
            self.substep();
            self.accumulator -= fixed_dt;
            substeps += 1;
        }
        self.accumulator %= fixed_dt;
        substeps
    }

    fn substep(&mut self) {
        let velocities: HashMap<RigidBodyHandle, Vector<Real>> =
            self.bodies.iter().map(|(handle, body)| (handle, *body.linvel())).collect();

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &self.contacts,
        );

        // Forces are per substep.
        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces(false);
        }

        for start in self.contacts.take() {
            let impacts = self.contact_impacts(start, &velocities);
            self.impacts.extend(impacts.into_iter().flatten());
        }
    }

    /// One impact per dynamic body taking part in the contact.
    fn contact_impacts(
        &self,
        start: ContactStart,
        velocities: &HashMap<RigidBodyHandle, Vector<Real>>,
    ) -> [Option<Impact>; 2] {
        let parent = |collider| self.colliders.get(collider).map(|c| c.parent());
        let (Some(body1), Some(body2)) = (parent(start.collider1), parent(start.collider2)) else {
            return [None, None];
        };
        let velocity_of = |body: Option<RigidBodyHandle>| {
            body.and_then(|handle| velocities.get(&handle).copied()).unwrap_or_else(Vector::zeros)
        };
        let relative = velocity_of(body1) - velocity_of(body2);
        let speed = match start.normal {
            Some(normal) => relative.dot(&normal).abs(),
            None => relative.norm(),
        };

        trace!("Contact {:?} / {:?} at {:.3} m/s", body1, body2, speed);
        let seen_from = |body: Option<RigidBodyHandle>, other: Option<RigidBodyHandle>| {
            body.map(|body| Impact { body: BodyId(body), other: other.map(BodyId), velocity: speed })
        };
        [seen_from(body1, body2), seen_from(body2, body1)]
    }

    /// Contacts that started during the last `step`.
    pub fn impacts(&self) -> &[Impact] {
        &self.impacts
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }
}

impl Default for DynamicsWorld {
    fn default() -> Self {
        Self::new(WorldSettings::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
