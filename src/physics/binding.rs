//=========================================================================
// Physics Binding
//=========================================================================
//
// Registry of visual nodes paired with dynamic bodies.
//
//   create_sphere / create_box   node + body in one call
//   sync()                       body pose → node transform, once a frame
//   reset()                      removes every pair from both worlds
//
// All spheres share one unit sphere geometry and all boxes one unit cube;
// size comes from the node scale. Lookups are linear scans.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::debug;

//=== Internal Dependencies ===============================================

use super::world::{BodyId, DynamicsWorld};
use crate::graphics::{Geometry, GeometryId, Material, MaterialId, Node, NodeId, SceneGraph};

//=== BoundObject =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundObject {
    pub node: NodeId,
    pub body: BodyId,
}

//=== PhysicsBinding ======================================================

#[derive(Debug)]
pub struct PhysicsBinding {
    objects: Vec<BoundObject>,
    sphere_geometry: GeometryId,
    box_geometry: GeometryId,
    material: MaterialId,
}

impl PhysicsBinding {
    /// Registers the shared geometries and `material` in `graph`.
    pub fn new(graph: &mut SceneGraph, material: Material) -> Self {
        Self {
            objects: Vec::new(),
            sphere_geometry: graph.add_geometry(Geometry::sphere(1.0, 20, 20)),
            box_geometry: graph.add_geometry(Geometry::cube(1.0)),
            material: graph.add_material(material),
        }
    }

    //--- Creation ---------------------------------------------------------

    pub fn create_sphere(
        &mut self,
        graph: &mut SceneGraph,
        world: &mut DynamicsWorld,
        radius: f32,
        position: Vec3,
    ) -> BoundObject {
        let node = Node::mesh(self.sphere_geometry, self.material)
            .named("sphere")
            .at(position)
            .scaled(Vec3::splat(radius))
            .casting_shadow();
        let object = BoundObject { node: graph.add(node), body: world.add_sphere(radius, position) };
        self.objects.push(object);
        object
    }

    pub fn create_box(
        &mut self,
        graph: &mut SceneGraph,
        world: &mut DynamicsWorld,
        size: Vec3,
        position: Vec3,
    ) -> BoundObject {
        let node = Node::mesh(self.box_geometry, self.material)
            .named("box")
            .at(position)
            .scaled(size)
            .casting_shadow();
        let object = BoundObject { node: graph.add(node), body: world.add_box(size * 0.5, position) };
        self.objects.push(object);
        object
    }

    //--- Per Frame --------------------------------------------------------

    /// Copies every body's position and orientation into its node.
    pub fn sync(&self, graph: &mut SceneGraph, world: &DynamicsWorld) {
        for object in &self.objects {
            let (Some(position), Some(orientation)) = (world.position(object.body), world.orientation(object.body))
            else {
                debug!("Body {:?} no longer exists, skipping sync", object.body);
                continue;
            };
            if let Some(transform) = graph.transform_mut(object.node) {
                transform.position = position;
                transform.set_quaternion(orientation);
            }
        }
    }

    //--- Teardown ---------------------------------------------------------

    /// Removes every registered pair from the dynamics world and the graph.
    pub fn reset(&mut self, graph: &mut SceneGraph, world: &mut DynamicsWorld) {
        for object in self.objects.drain(..) {
            world.remove(object.body);
            graph.remove(object.node);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn node_of(&self, body: BodyId) -> Option<NodeId> {
        self.objects.iter().find(|o| o.body == body).map(|o| o.node)
    }

    pub fn objects(&self) -> &[BoundObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
