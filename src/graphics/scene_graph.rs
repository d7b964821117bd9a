//=========================================================================
// Scene Graph
//=========================================================================
//
// Arena-backed node hierarchy owned by a single scene.
//
// Architecture:
//   SceneGraph
//     ├─ nodes:      Arena<Node>      (parent / children links)
//     ├─ geometries: Arena<Geometry>  (shared by id)
//     ├─ materials:  Arena<Material>  (shared by id)
//     └─ environment: background, fog, shadow map settings
//
// Ids are generational: removing a node, geometry or material bumps the
// slot generation so stale ids resolve to `None` instead of aliasing a
// newer entry.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Vec3};
use log::debug;

//=== Internal Dependencies ===============================================

use super::camera::PerspectiveCamera;
use super::color::Color;
use super::geometry::Geometry;
use super::light::{HelperKind, Light};
use super::material::Material;
use super::transform::Transform;

//=== Handles =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Handle {
    index: u32,
    generation: u32,
}

/// Node reference; stale after the node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Handle);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(Handle);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(Handle);

//=== Arena ===============================================================

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug)]
struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Arena<T> {
    fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), len: 0 }
    }

    fn insert(&mut self, value: T) -> Handle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return Handle { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, value: Some(value) });
        Handle { index, generation: 0 }
    }

    fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(value)
    }

    fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value.as_ref().map(|value| {
                (Handle { index: index as u32, generation: slot.generation }, value)
            })
        })
    }
}

//=== NodeKind ============================================================

#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    Mesh { geometry: GeometryId, material: MaterialId },
    Points { geometry: GeometryId, material: MaterialId },
    Light(Light),
    Camera(PerspectiveCamera),
    /// Debug visual attached to another node (light gizmo, shadow frustum).
    Helper { subject: NodeId, kind: HelperKind },
}

//=== Node ================================================================

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    pub visible: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            name: String::new(),
            kind,
            transform: Transform::IDENTITY,
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    pub fn mesh(geometry: GeometryId, material: MaterialId) -> Self {
        Self::new(NodeKind::Mesh { geometry, material })
    }

    pub fn points(geometry: GeometryId, material: MaterialId) -> Self {
        Self::new(NodeKind::Points { geometry, material })
    }

    pub fn light(light: Light) -> Self {
        Self::new(NodeKind::Light(light))
    }

    pub fn camera(camera: PerspectiveCamera) -> Self {
        Self::new(NodeKind::Camera(camera))
    }

    pub fn helper(subject: NodeId, kind: HelperKind) -> Self {
        Self::new(NodeKind::Helper { subject, kind })
    }

    //--- Builders ---------------------------------------------------------

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn casting_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    pub fn receiving_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }

    //--- Links ------------------------------------------------------------

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

//=== Environment =========================================================

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowFilter {
    Basic,
    #[default]
    Pcf,
    PcfSoft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowSettings {
    pub enabled: bool,
    pub filter: ShadowFilter,
}

//=== SceneGraph ==========================================================

#[derive(Debug)]
pub struct SceneGraph {
    nodes: Arena<Node>,
    geometries: Arena<Geometry>,
    materials: Arena<Material>,
    roots: Vec<NodeId>,

    /// Clear color; `None` keeps the surface transparent.
    pub background: Option<Color>,
    pub fog: Option<Fog>,
    pub shadows: ShadowSettings,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            geometries: Arena::new(),
            materials: Arena::new(),
            roots: Vec::new(),
            background: Some(Color::BLACK),
            fog: None,
            shadows: ShadowSettings::default(),
        }
    }

    //=====================================================================
    // Resources
    //=====================================================================

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        GeometryId(self.geometries.insert(geometry))
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0)
    }

    /// Frees the geometry. Meshes still referencing it become dangling.
    pub fn dispose_geometry(&mut self, id: GeometryId) -> bool {
        self.geometries.remove(id.0).is_some()
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        MaterialId(self.materials.insert(material))
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    pub fn dispose_material(&mut self, id: MaterialId) -> bool {
        self.materials.remove(id.0).is_some()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len
    }

    /// Adds the geometry and material and a mesh node using both.
    pub fn add_mesh(&mut self, geometry: Geometry, material: Material) -> NodeId {
        let geometry = self.add_geometry(geometry);
        let material = self.add_material(material);
        self.add(Node::mesh(geometry, material))
    }

    //=====================================================================
    // Hierarchy
    //=====================================================================

    /// Adds `node` at the root.
    pub fn add(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        let id = NodeId(self.nodes.insert(node));
        self.roots.push(id);
        id
    }

    /// Adds `node` under `parent`; `None` if the parent no longer exists.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> Option<NodeId> {
        self.nodes.get(parent.0)?;
        node.parent = Some(parent);
        node.children.clear();
        let id = NodeId(self.nodes.insert(node));
        self.nodes.get_mut(parent.0)?.children.push(id);
        Some(id)
    }

    /// Removes `id` and its whole subtree. Geometries and materials are
    /// left in their tables.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes.get(id.0).map(|node| node.parent) else {
            return false;
        };

        match parent {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(parent.0) {
                    parent.children.retain(|&child| child != id);
                }
            }
            None => self.roots.retain(|&root| root != id),
        }

        let mut pending = vec![id];
        let mut removed = 0usize;
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next.0) {
                pending.extend(node.children);
                removed += 1;
            }
        }
        debug!("Removed {} node(s) from scene graph", removed);
        true
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.node(id).map(|node| &node.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.node_mut(id).map(|node| &mut node.transform)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.node_mut(id) {
            node.visible = visible;
        }
    }

    pub fn light_mut(&mut self, id: NodeId) -> Option<&mut Light> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn camera(&self, id: NodeId) -> Option<&PerspectiveCamera> {
        match &self.node(id)?.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    pub fn camera_mut(&mut self, id: NodeId) -> Option<&mut PerspectiveCamera> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Material of a mesh or points node.
    pub fn node_material_mut(&mut self, id: NodeId) -> Option<&mut Material> {
        let material = match self.node(id)?.kind {
            NodeKind::Mesh { material, .. } | NodeKind::Points { material, .. } => material,
            _ => return None,
        };
        self.material_mut(material)
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(handle, _)| NodeId(handle))
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(handle, node)| (NodeId(handle), node))
    }

    //=====================================================================
    // World Space
    //=====================================================================

    /// Local-to-world matrix composed through every ancestor.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.node(id)?;
        let mut matrix = node.transform.matrix();
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            matrix = node.transform.matrix() * matrix;
        }
        Some(matrix)
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.transform_point3(Vec3::ZERO))
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
