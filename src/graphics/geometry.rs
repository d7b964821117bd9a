//=========================================================================
// Geometry Descriptors
//=========================================================================
//
// Parametric shapes handed to the render backend. Tessellation happens
// there; this side only records parameters, plus the vertex count each
// parameter set produces so scenes and tests can reason about cost.
//
// Point clouds are the exception: their positions (and optional colors)
// are generated here and owned by the descriptor.
//
//=========================================================================

use glam::Vec3;

use super::color::Color;
use super::font::TextGeometry;

//=== PointCloud ==========================================================

/// Positions plus optional per-point colors (same length when present).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub colors: Option<Vec<Color>>,
}

impl PointCloud {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self { positions, colors: None }
    }

    /// Attaches per-point colors; ignored with a mismatched length.
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        if colors.len() == self.positions.len() {
            self.colors = Some(colors);
        } else {
            log::warn!(
                "Dropping {} point colors for a cloud of {} points",
                colors.len(),
                self.positions.len()
            );
        }
        self
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounds as (min, max); `None` for an empty cloud.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))))
    }
}

//=== Geometry ============================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Box {
        width: f32,
        height: f32,
        depth: f32,
        segments: [u32; 3],
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
        segments: [u32; 2],
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
    },
    Text(TextGeometry),
    Points(PointCloud),
}

impl Geometry {
    //--- Constructors -----------------------------------------------------

    pub fn cube(size: f32) -> Self {
        Self::cuboid(size, size, size)
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Box { width, height, depth, segments: [1, 1, 1] }
    }

    pub fn segmented_cuboid(width: f32, height: f32, depth: f32, segments: [u32; 3]) -> Self {
        Self::Box { width, height, depth, segments: segments.map(|s| s.max(1)) }
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    pub fn plane(width: f32, height: f32) -> Self {
        Self::Plane { width, height, segments: [1, 1] }
    }

    pub fn segmented_plane(width: f32, height: f32, segments: [u32; 2]) -> Self {
        Self::Plane { width, height, segments: segments.map(|s| s.max(1)) }
    }

    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Self::Torus {
            radius,
            tube,
            radial_segments: radial_segments.max(2),
            tubular_segments: tubular_segments.max(3),
        }
    }

    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Self::Cone { radius, height, radial_segments: radial_segments.max(3) }
    }

    pub fn torus_knot(radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32) -> Self {
        Self::TorusKnot {
            radius,
            tube,
            tubular_segments: tubular_segments.max(3),
            radial_segments: radial_segments.max(3),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Vertices the backend produces for this parameter set.
    ///
    /// Text reports zero: glyph outlines are triangulated by the backend
    /// from the font, so the count is not known here.
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Box { segments: [w, h, d], .. } => {
                let (w, h, d) = (*w as usize + 1, *h as usize + 1, *d as usize + 1);
                2 * (w * h + h * d + w * d)
            }
            Self::Sphere { width_segments, height_segments, .. } => {
                (*width_segments as usize + 1) * (*height_segments as usize + 1)
            }
            Self::Plane { segments: [w, h], .. } => (*w as usize + 1) * (*h as usize + 1),
            Self::Torus { radial_segments, tubular_segments, .. } => {
                (*radial_segments as usize + 1) * (*tubular_segments as usize + 1)
            }
            Self::Cone { radial_segments, .. } => {
                let r = *radial_segments as usize;
                // Side (one height segment) plus the base cap: centers + rim.
                (r + 1) * 2 + r + (r + 1)
            }
            Self::TorusKnot { tubular_segments, radial_segments, .. } => {
                (*tubular_segments as usize + 1) * (*radial_segments as usize + 1)
            }
            Self::Text(_) => 0,
            Self::Points(cloud) => cloud.len(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Sphere { .. } => "sphere",
            Self::Plane { .. } => "plane",
            Self::Torus { .. } => "torus",
            Self::Cone { .. } => "cone",
            Self::TorusKnot { .. } => "torus-knot",
            Self::Text(_) => "text",
            Self::Points(_) => "points",
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_box_has_24_vertices() {
        assert_eq!(Geometry::cube(1.0).vertex_count(), 24);
    }

    #[test]
    fn segmented_box_counts_every_face_grid() {
        let g = Geometry::segmented_cuboid(1.0, 1.0, 1.0, [5, 5, 5]);
        assert_eq!(g.vertex_count(), 6 * 36);
    }

    #[test]
    fn sphere_and_torus_grids() {
        assert_eq!(Geometry::sphere(0.5, 32, 32).vertex_count(), 33 * 33);
        assert_eq!(Geometry::torus(0.3, 0.2, 20, 45).vertex_count(), 21 * 46);
        assert_eq!(Geometry::torus_knot(0.8, 0.35, 100, 16).vertex_count(), 101 * 17);
    }

    #[test]
    fn four_sided_cone_counts_side_and_base() {
        assert_eq!(Geometry::cone(3.5, 2.0, 4).vertex_count(), 10 + 4 + 5);
    }

    #[test]
    fn constructors_clamp_degenerate_segments() {
        match Geometry::segmented_plane(1.0, 1.0, [0, 0]) {
            Geometry::Plane { segments, .. } => assert_eq!(segments, [1, 1]),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(Geometry::plane(10.0, 10.0).vertex_count(), 4);
    }

    #[test]
    fn point_cloud_colors_must_match_length() {
        let cloud = PointCloud::new(vec![Vec3::ZERO, Vec3::ONE]).with_colors(vec![Color::RED]);
        assert!(cloud.colors.is_none());

        let cloud = cloud.with_colors(vec![Color::RED, Color::BLUE]);
        assert_eq!(cloud.colors.as_ref().map(Vec::len), Some(2));
        assert_eq!(cloud.bounds(), Some((Vec3::ZERO, Vec3::ONE)));
        assert_eq!(Geometry::Points(cloud).vertex_count(), 2);
    }
}
