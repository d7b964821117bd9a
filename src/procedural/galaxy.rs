//=========================================================================
// Galaxy Generator
//=========================================================================
//
// Spiral point cloud:
//
//   radius = r · R                     r uniform in [0, 1)
//   branch = (i mod branches) / branches · 2π
//   spin   = radius · spin
//   x      = cos(branch + spin) · radius + jitter
//   y      = jitter
//   z      = sin(branch + spin) · radius + jitter
//   jitter = u^power · ±1              u uniform, sign by coin flip
//   color  = lerp(inside, outside, radius / R)
//
// `randomness` is carried and editable but, as in the exercise it comes
// from, does not scale the jitter.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::TAU;

use glam::Vec3;
use log::debug;
use rand::Rng;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::graphics::{Color, Geometry, GeometryId, Material, MaterialId, Node, NodeId, PointCloud, SceneGraph};

//=== GalaxyParameters ====================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalaxyParameters {
    pub count: u32,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub random_power: f32,
    pub inside_color: Color,
    pub outside_color: Color,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 10,
            spin: 1.0,
            randomness: 0.2,
            random_power: 3.0,
            inside_color: Color::hex(0xf74008),
            outside_color: Color::hex(0x4950bc),
        }
    }
}

//=== Generation ==========================================================

fn jitter<R: Rng + ?Sized>(rng: &mut R, power: f32) -> f32 {
    let magnitude = rng.gen::<f32>().powf(power);
    if rng.gen::<f32>() < 0.5 {
        magnitude
    } else {
        -magnitude
    }
}

/// Positions and colors of one galaxy.
pub fn generate_galaxy<R: Rng + ?Sized>(params: &GalaxyParameters, rng: &mut R) -> PointCloud {
    let count = params.count as usize;
    let branches = params.branches.max(1);
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for i in 0..count {
        let radius = rng.gen::<f32>() * params.radius;
        let branch = (i as u32 % branches) as f32 / branches as f32 * TAU;
        let angle = branch + radius * params.spin;

        let offset = Vec3::new(
            jitter(rng, params.random_power),
            jitter(rng, params.random_power),
            jitter(rng, params.random_power),
        );
        positions.push(Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius) + offset);

        let t = if params.radius > 0.0 { radius / params.radius } else { 0.0 };
        colors.push(params.inside_color.lerp(params.outside_color, t));
    }

    PointCloud::new(positions).with_colors(colors)
}

//=== GalaxyCloud =========================================================

/// The single galaxy node of a scene and the resources it owns.
#[derive(Debug, Default)]
pub struct GalaxyCloud {
    current: Option<(NodeId, GeometryId, MaterialId)>,
}

impl GalaxyCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disposes the previous cloud, then builds and adds a new one.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        graph: &mut SceneGraph,
        params: &GalaxyParameters,
        rng: &mut R,
    ) -> NodeId {
        self.dispose(graph);

        let cloud = generate_galaxy(params, rng);
        debug!("Galaxy regenerated with {} points", cloud.len());

        let geometry = graph.add_geometry(Geometry::Points(cloud));
        let material = graph.add_material(Material::points(params.size, true).glowing_vertex_colors());
        let node = graph.add(Node::points(geometry, material).named("galaxy"));

        self.current = Some((node, geometry, material));
        node
    }

    pub fn dispose(&mut self, graph: &mut SceneGraph) {
        if let Some((node, geometry, material)) = self.current.take() {
            graph.dispose_geometry(geometry);
            graph.dispose_material(material);
            graph.remove(node);
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        self.current.map(|(node, _, _)| node)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small() -> GalaxyParameters {
        GalaxyParameters { count: 2_000, ..GalaxyParameters::default() }
    }

    //=====================================================================
    // Generation Tests
    //=====================================================================

    #[test]
    fn defaults_match_exercise() {
        let params = GalaxyParameters::default();
        assert_eq!(params.count, 100_000);
        assert_eq!(params.branches, 10);
        assert_eq!(params.inside_color.to_hex(), 0xf74008);
        assert_eq!(params.outside_color.to_hex(), 0x4950bc);
    }

    #[test]
    fn same_seed_same_galaxy() {
        let a = generate_galaxy(&small(), &mut ChaCha8Rng::seed_from_u64(1));
        let b = generate_galaxy(&small(), &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(a, b);
        assert_eq!(a.len(), 2_000);
        assert_eq!(a.colors.as_ref().map(Vec::len), Some(2_000));
    }

    #[test]
    fn points_stay_within_radius_plus_jitter() {
        let params = small();
        let cloud = generate_galaxy(&params, &mut ChaCha8Rng::seed_from_u64(3));
        for p in &cloud.positions {
            assert!(p.y.abs() <= 1.0);
            assert!(Vec3::new(p.x, 0.0, p.z).length() <= params.radius + 2.0_f32.sqrt());
        }
    }

    #[test]
    fn color_blends_inside_to_outside_with_radius() {
        let params = GalaxyParameters { random_power: 50.0, ..small() };
        let cloud = generate_galaxy(&params, &mut ChaCha8Rng::seed_from_u64(9));
        let colors = cloud.colors.as_ref().unwrap();

        let (inner, outer) = cloud
            .positions
            .iter()
            .zip(colors)
            .fold((None, None), |(inner, outer), (p, c)| {
                let r = Vec3::new(p.x, 0.0, p.z).length();
                (
                    if r < 0.2 { Some(*c) } else { inner },
                    if r > 4.8 { Some(*c) } else { outer },
                )
            });
        let (inner, outer) = (inner.unwrap(), outer.unwrap());
        assert!(inner.r > outer.r);
        assert!(inner.b < outer.b);
    }

    //=====================================================================
    // GalaxyCloud Tests
    //=====================================================================

    #[test]
    fn regeneration_keeps_exactly_one_cloud() {
        let mut graph = SceneGraph::new();
        let mut galaxy = GalaxyCloud::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let first = galaxy.regenerate(&mut graph, &small(), &mut rng);
        let second = galaxy.regenerate(&mut graph, &small(), &mut rng);

        assert!(!graph.contains(first));
        assert!(graph.contains(second));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.geometry_count(), 1);
        assert_eq!(graph.material_count(), 1);

        galaxy.dispose(&mut graph);
        assert!(graph.is_empty());
        assert!(galaxy.node().is_none());
    }
}
