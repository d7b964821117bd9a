//=========================================================================
// Graphics
//=========================================================================
//
// Scene description types handed to the render backend.
//
// Architecture:
//   SceneGraph (nodes + geometry/material tables)
//     ├─ Transform, Light, PerspectiveCamera per node
//     └─ Geometry / Material / Texture descriptors
//   OrbitControls → camera Transform
//   RenderSnapshot → Renderer (HeadlessRenderer by default)
//
//=========================================================================

//=== Module Declarations =================================================

pub mod camera;
pub mod color;
pub mod controls;
pub mod font;
pub mod geometry;
pub mod light;
pub mod material;
pub mod renderer;
pub mod scene_graph;
pub mod texture;
pub mod transform;

//=== Public API ==========================================================

pub use camera::PerspectiveCamera;
pub use color::{Color, ColorParseError};
pub use controls::OrbitControls;
pub use font::{Bevel, Font, FontError, FontHandle, FontLoader, TextGeometry, TextOptions};
pub use geometry::{Geometry, PointCloud};
pub use light::{HelperKind, Light, LightKind, Shadow, ShadowCamera};
pub use material::{Blending, Material, Shading, TextureMaps};
pub use renderer::{DrawItem, DrawKind, FrameStats, HeadlessRenderer, RenderError, RenderSnapshot, RenderView, Renderer};
pub use scene_graph::{Fog, GeometryId, MaterialId, Node, NodeId, NodeKind, SceneGraph, ShadowFilter, ShadowSettings};
pub use texture::{
    CubeTexture, CubeTextureHandle, CubeTextureLoader, Filter, LoadingManager, Texture, TextureError,
    TextureHandle, TextureLoader, WrapMode,
};
pub use transform::Transform;
