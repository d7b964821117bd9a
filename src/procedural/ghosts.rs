//=========================================================================
// Ghost Paths
//=========================================================================

use glam::Vec3;

/// Positions of the three ghost lights at `elapsed` seconds.
///
/// Ghost one circles at radius 4, ghost two at radius 6 the other way
/// round, ghost three on a wobbling orbit around 7.
pub fn ghost_positions(elapsed: f32) -> [Vec3; 3] {
    let t = elapsed;

    let a1 = t / 1.5;
    let ghost1 = Vec3::new(a1.cos() * 4.0, (t * 3.0).sin(), a1.sin() * 4.0);

    let a2 = -t / 2.5;
    let ghost2 = Vec3::new(a2.cos() * 6.0, (t * 2.0).sin() + (t * 3.0).sin(), a2.sin() * 6.0);

    let a3 = t / 3.5;
    let ghost3 = Vec3::new(
        a3.cos() * (7.0 + (t * 0.32).cos()),
        (t * 1.5).sin() + (t * 3.5).sin(),
        a3.sin() * (7.0 + (t * 0.62).sin()),
    );

    [ghost1, ghost2, ghost3]
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Path Tests
    //=====================================================================

    #[test]
    fn start_positions() {
        let [g1, g2, g3] = ghost_positions(0.0);
        assert_eq!(g1, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(g2, Vec3::new(6.0, 0.0, 0.0));
        assert_eq!(g3, Vec3::new(8.0, 0.0, 0.0));
    }

    #[test]
    fn ghosts_keep_their_orbits() {
        for step in 0..200 {
            let [g1, g2, g3] = ghost_positions(step as f32 * 0.37);
            assert!((Vec3::new(g1.x, 0.0, g1.z).length() - 4.0).abs() < 1e-4);
            assert!((Vec3::new(g2.x, 0.0, g2.z).length() - 6.0).abs() < 1e-4);
            let r3 = Vec3::new(g3.x, 0.0, g3.z).length();
            assert!((6.0..=8.0).contains(&r3));
            assert!(g2.y.abs() <= 2.0);
        }
    }

    #[test]
    fn second_ghost_turns_the_other_way() {
        let [g1, g2, _] = ghost_positions(0.5);
        assert!(g1.z > 0.0);
        assert!(g2.z < 0.0);
    }
}
