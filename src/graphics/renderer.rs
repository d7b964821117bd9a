//=========================================================================
// Renderer
//=========================================================================
//
// Boundary to the rasterizer.
//
// Flow (once per tick, logic thread):
//   Scene::render_view() → RenderSnapshot::capture() → Renderer::render()
//
// The snapshot flattens visible nodes into draw items with world
// matrices; geometry and material data stay borrowed from the graph so a
// GPU backend can upload what changed. `HeadlessRenderer` records frame
// statistics and is the default backend.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Mat4;
use log::{debug, trace};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::camera::PerspectiveCamera;
use super::color::Color;
use super::geometry::Geometry;
use super::light::{HelperKind, Light};
use super::material::Material;
use super::scene_graph::{Fog, GeometryId, MaterialId, NodeId, NodeKind, SceneGraph, ShadowSettings};
use crate::core::viewport::Viewport;

//=== RenderError =========================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("camera node {0:?} does not exist or is not a camera")]
    MissingCamera(NodeId),

    #[error("node {node:?} references disposed geometry {geometry:?}")]
    DanglingGeometry { node: NodeId, geometry: GeometryId },

    #[error("node {node:?} references disposed material {material:?}")]
    DanglingMaterial { node: NodeId, material: MaterialId },

    #[error("render backend failure: {0}")]
    Backend(String),
}

//=== RenderView ==========================================================

/// What a scene wants drawn: its graph seen through one camera node.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub graph: &'a SceneGraph,
    pub camera: NodeId,
}

//=== RenderSnapshot ======================================================

#[derive(Debug, Clone, Copy)]
pub enum DrawKind<'a> {
    Mesh {
        geometry: &'a Geometry,
        material: &'a Material,
        cast_shadow: bool,
        receive_shadow: bool,
    },
    Points {
        geometry: &'a Geometry,
        material: &'a Material,
    },
    Light(&'a Light),
    Helper {
        subject: NodeId,
        kind: HelperKind,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub node: NodeId,
    pub world: Mat4,
    pub kind: DrawKind<'a>,
}

/// One frame's worth of draw data.
#[derive(Debug, Clone)]
pub struct RenderSnapshot<'a> {
    pub camera: PerspectiveCamera,
    pub view: Mat4,
    pub projection: Mat4,
    pub items: Vec<DrawItem<'a>>,
    pub background: Option<Color>,
    pub fog: Option<Fog>,
    pub shadows: ShadowSettings,
    pub viewport: Viewport,
}

impl<'a> RenderSnapshot<'a> {
    /// Flattens the visible part of `view.graph`.
    ///
    /// Hidden nodes hide their whole subtree. The camera's aspect is
    /// taken from `viewport`.
    pub fn capture(view: RenderView<'a>, viewport: &Viewport) -> Result<Self, RenderError> {
        let graph = view.graph;
        let mut camera = *graph.camera(view.camera).ok_or(RenderError::MissingCamera(view.camera))?;
        camera.set_aspect(viewport.aspect());

        let camera_world = graph
            .world_matrix(view.camera)
            .ok_or(RenderError::MissingCamera(view.camera))?;

        let mut items = Vec::with_capacity(graph.len());
        let mut pending: Vec<(NodeId, Mat4)> =
            graph.roots().iter().rev().map(|&id| (id, Mat4::IDENTITY)).collect();

        while let Some((id, parent_world)) = pending.pop() {
            let Some(node) = graph.node(id) else { continue };
            if !node.visible {
                continue;
            }

            let world = parent_world * node.transform.matrix();
            if let Some(kind) = Self::draw_kind(graph, id, &node.kind)? {
                items.push(DrawItem { node: id, world, kind });
            }

            pending.extend(node.children().iter().rev().map(|&child| (child, world)));
        }

        Ok(Self {
            camera,
            view: camera_world.inverse(),
            projection: camera.projection_matrix(),
            items,
            background: graph.background,
            fog: graph.fog,
            shadows: graph.shadows,
            viewport: *viewport,
        })
    }

    fn draw_kind(graph: &'a SceneGraph, id: NodeId, kind: &'a NodeKind) -> Result<Option<DrawKind<'a>>, RenderError> {
        let resolve = |geometry: GeometryId, material: MaterialId| {
            let g = graph
                .geometry(geometry)
                .ok_or(RenderError::DanglingGeometry { node: id, geometry })?;
            let m = graph
                .material(material)
                .ok_or(RenderError::DanglingMaterial { node: id, material })?;
            Ok::<_, RenderError>((g, m))
        };

        let kind = match *kind {
            NodeKind::Group | NodeKind::Camera(_) => return Ok(None),
            NodeKind::Mesh { geometry, material } => {
                let (geometry, material) = resolve(geometry, material)?;
                let node = graph.node(id);
                DrawKind::Mesh {
                    geometry,
                    material,
                    cast_shadow: node.is_some_and(|n| n.cast_shadow),
                    receive_shadow: node.is_some_and(|n| n.receive_shadow),
                }
            }
            NodeKind::Points { geometry, material } => {
                let (geometry, material) = resolve(geometry, material)?;
                DrawKind::Points { geometry, material }
            }
            NodeKind::Light(ref light) => DrawKind::Light(light),
            NodeKind::Helper { subject, kind } => {
                if !graph.contains(subject) {
                    return Ok(None);
                }
                DrawKind::Helper { subject, kind }
            }
        };
        Ok(Some(kind))
    }

    //--- Queries ----------------------------------------------------------

    pub fn meshes(&self) -> impl Iterator<Item = &DrawItem<'a>> {
        self.items.iter().filter(|item| matches!(item.kind, DrawKind::Mesh { .. }))
    }

    pub fn lights(&self) -> impl Iterator<Item = &'a Light> + '_ {
        self.items.iter().filter_map(|item| match item.kind {
            DrawKind::Light(light) => Some(light),
            _ => None,
        })
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.items.iter().any(|item| item.node == node)
    }
}

//=== Renderer ============================================================

/// Render backend driven from the logic thread.
pub trait Renderer: Send {
    /// Surface size or pixel ratio changed.
    fn resize(&mut self, viewport: &Viewport);

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<(), RenderError>;
}

//=== HeadlessRenderer ====================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub vertices: usize,
    pub points: usize,
    pub lights: usize,
    pub shadow_casters: usize,
    pub helpers: usize,
}

/// Renderer that draws nothing and records what it was asked to draw.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    last: FrameStats,
    size: (u32, u32),
    pixel_ratio: f64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> FrameStats {
        self.last
    }

    /// Physical drawing-buffer size after the last resize.
    pub fn buffer_size(&self) -> (u32, u32) {
        self.size
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
}

impl Renderer for HeadlessRenderer {
    fn resize(&mut self, viewport: &Viewport) {
        let (w, h) = viewport.logical_size();
        let ratio = viewport.pixel_ratio();
        self.size = ((w as f64 * ratio).round() as u32, (h as f64 * ratio).round() as u32);
        self.pixel_ratio = ratio;
        debug!("Headless renderer resized to {}x{} (pixel ratio {})", self.size.0, self.size.1, ratio);
    }

    fn render(&mut self, snapshot: &RenderSnapshot<'_>) -> Result<(), RenderError> {
        let mut stats = FrameStats::default();

        for item in &snapshot.items {
            match item.kind {
                DrawKind::Mesh { geometry, cast_shadow, .. } => {
                    stats.draw_calls += 1;
                    stats.vertices += geometry.vertex_count();
                    if cast_shadow {
                        stats.shadow_casters += 1;
                    }
                }
                DrawKind::Points { geometry, .. } => {
                    stats.draw_calls += 1;
                    stats.points += geometry.vertex_count();
                }
                DrawKind::Light(_) => stats.lights += 1,
                DrawKind::Helper { .. } => stats.helpers += 1,
            }
        }

        self.frames += 1;
        self.last = stats;
        trace!("Frame {}: {:?}", self.frames, stats);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::scene_graph::Node;
    use glam::Vec3;

    fn stage() -> (SceneGraph, NodeId) {
        let mut graph = SceneGraph::new();
        let camera = graph.add(Node::camera(PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0)).at(Vec3::new(0.0, 0.0, 3.0)));
        (graph, camera)
    }

    //=====================================================================
    // Snapshot Tests
    //=====================================================================

    #[test]
    fn capture_requires_camera_node() {
        let (mut graph, _) = stage();
        let group = graph.add(Node::group());
        let view = RenderView { graph: &graph, camera: group };
        let err = RenderSnapshot::capture(view, &Viewport::default()).unwrap_err();
        assert_eq!(err, RenderError::MissingCamera(group));
    }

    #[test]
    fn hidden_nodes_hide_their_subtree() {
        let (mut graph, camera) = stage();
        let group = graph.add(Node::group().hidden());
        let inner = graph
            .add_child(group, Node::light(Light::ambient(Color::WHITE, 1.0)))
            .unwrap();
        let cube = graph.add_mesh(Geometry::cube(1.0), Material::basic(Color::RED));

        let snapshot = RenderSnapshot::capture(RenderView { graph: &graph, camera }, &Viewport::default()).unwrap();
        assert!(!snapshot.contains(inner));
        assert!(snapshot.contains(cube));
        assert_eq!(snapshot.meshes().count(), 1);
    }

    #[test]
    fn world_matrix_includes_parent() {
        let (mut graph, camera) = stage();
        let group = graph.add(Node::group().at(Vec3::new(1.0, 0.0, 0.0)));
        let geometry = graph.add_geometry(Geometry::cube(1.0));
        let material = graph.add_material(Material::basic(Color::RED));
        let cube = graph.add_child(group, Node::mesh(geometry, material).at(Vec3::new(0.0, 2.0, 0.0))).unwrap();

        let snapshot = RenderSnapshot::capture(RenderView { graph: &graph, camera }, &Viewport::default()).unwrap();
        let item = snapshot.items.iter().find(|i| i.node == cube).unwrap();
        assert!((item.world.transform_point3(Vec3::ZERO) - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn disposed_geometry_is_reported() {
        let (mut graph, camera) = stage();
        let geometry = graph.add_geometry(Geometry::cube(1.0));
        let material = graph.add_material(Material::basic(Color::RED));
        let cube = graph.add(Node::mesh(geometry, material));
        graph.dispose_geometry(geometry);

        let err = RenderSnapshot::capture(RenderView { graph: &graph, camera }, &Viewport::default()).unwrap_err();
        assert_eq!(err, RenderError::DanglingGeometry { node: cube, geometry });
    }

    #[test]
    fn camera_aspect_follows_viewport() {
        let (graph, camera) = stage();
        let viewport = Viewport::new(1600, 800, 1.0);
        let snapshot = RenderSnapshot::capture(RenderView { graph: &graph, camera }, &viewport).unwrap();
        assert_eq!(snapshot.camera.aspect, 2.0);
    }

    //=====================================================================
    // Headless Renderer Tests
    //=====================================================================

    #[test]
    fn headless_counts_draws() {
        let (mut graph, camera) = stage();
        graph.add_mesh(Geometry::plane(1.0, 1.0), Material::basic(Color::RED));
        let cube = graph.add_mesh(Geometry::cube(1.0), Material::standard(Color::WHITE, 0.0, 0.5));
        graph.node_mut(cube).unwrap().cast_shadow = true;
        graph.add(Node::light(Light::ambient(Color::WHITE, 0.5)));

        let snapshot = RenderSnapshot::capture(RenderView { graph: &graph, camera }, &Viewport::default()).unwrap();
        let mut renderer = HeadlessRenderer::new();
        renderer.render(&snapshot).unwrap();

        let stats = renderer.last_frame();
        assert_eq!(renderer.frames(), 1);
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.lights, 1);
        assert_eq!(stats.shadow_casters, 1);
        assert_eq!(stats.vertices, 4 + 24);
    }

    #[test]
    fn headless_resize_caps_pixel_ratio() {
        let mut renderer = HeadlessRenderer::new();
        renderer.resize(&Viewport::new(2400, 1200, 3.0));
        assert_eq!(renderer.pixel_ratio(), 2.0);
        assert_eq!(renderer.buffer_size(), (1600, 800));
    }
}
