//=========================================================================
// Random Placement
//=========================================================================
//
// Seeded placement of decorative objects. Callers own the RNG, so a
// fixed seed reproduces a layout exactly.
//
//=========================================================================

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::graphics::Transform;

fn centered<R: Rng + ?Sized>(rng: &mut R, span: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * span
}

/// Scroll-page particles: a 10×10 column covering every section plus half
/// a section above the first.
pub fn scatter_particles<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    object_distance: f32,
    sections: usize,
) -> Vec<Vec3> {
    let depth = object_distance * sections as f32;
    (0..count)
        .map(|_| {
            let x = centered(rng, 10.0);
            let y = object_distance * 0.5 - rng.gen::<f32>() * depth;
            let z = centered(rng, 10.0);
            Vec3::new(x, y, z)
        })
        .collect()
}

/// Donuts in a 10-unit cube with random tilt and uniform scale in [0, 1).
pub fn scatter_donuts<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Transform> {
    (0..count)
        .map(|_| {
            let position = Vec3::new(centered(rng, 10.0), centered(rng, 10.0), centered(rng, 10.0));
            let rotation = Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.0);
            let scale = Vec3::splat(rng.gen::<f32>());
            Transform { position, rotation, scale }
        })
        .collect()
}

/// Graves on the annulus 4..10 around the house, slightly crooked.
pub fn place_graves<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Transform> {
    (0..count)
        .map(|_| {
            let angle = rng.gen::<f32>() * TAU;
            let radius = 4.0 + rng.gen::<f32>() * 6.0;

            let mut transform = Transform::from_position(Vec3::new(angle.cos() * radius, 0.3, angle.sin() * radius));
            transform.rotate_y(centered(rng, 0.4));
            transform.rotate_z(centered(rng, 0.4));
            transform
        })
        .collect()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn particles_cover_all_sections() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let particles = scatter_particles(&mut rng, 200, 4.0, 3);

        assert_eq!(particles.len(), 200);
        for p in &particles {
            assert!(p.x.abs() <= 5.0 && p.z.abs() <= 5.0);
            assert!(p.y <= 2.0 && p.y >= -10.0);
        }
    }

    #[test]
    fn donuts_fit_in_cube_with_unit_scale() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for donut in scatter_donuts(&mut rng, 100) {
            assert!(donut.position.abs().max_element() <= 5.0);
            assert!(donut.scale.x >= 0.0 && donut.scale.x < 1.0);
            assert_eq!(donut.scale.x, donut.scale.z);
            assert!(donut.rotation.x >= 0.0 && donut.rotation.x <= PI);
        }
    }

    #[test]
    fn graves_sit_on_annulus() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let graves = place_graves(&mut rng, 40);

        assert_eq!(graves.len(), 40);
        for grave in &graves {
            let r = Vec3::new(grave.position.x, 0.0, grave.position.z).length();
            assert!((4.0..=10.0).contains(&r), "radius {}", r);
            assert_eq!(grave.position.y, 0.3);
            assert!(grave.rotation.abs().max_element() < 0.5);
        }
    }

    #[test]
    fn layout_is_reproducible() {
        let a = place_graves(&mut ChaCha8Rng::seed_from_u64(4), 10);
        let b = place_graves(&mut ChaCha8Rng::seed_from_u64(4), 10);
        assert_eq!(a, b);
    }
}
