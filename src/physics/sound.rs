//=========================================================================
// Impact Sound
//=========================================================================

use log::info;
use rand::Rng;

use super::world::Impact;

/// One hit sound to play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactSound {
    /// Playback volume in [0, 1).
    pub volume: f32,
}

impl ImpactSound {
    /// Sound for `impact` when it is stronger than `threshold`, at a random
    /// volume.
    pub fn for_impact<R: Rng + ?Sized>(impact: &Impact, threshold: f32, rng: &mut R) -> Option<Self> {
        (impact.velocity > threshold).then(|| Self { volume: rng.gen_range(0.0..1.0) })
    }
}

/// Audio output seam. Each call restarts the clip from the beginning.
pub trait SoundSink: Send {
    fn play(&mut self, sound: ImpactSound);
}

/// Sink that only logs what it would play.
#[derive(Debug, Clone)]
pub struct LogSoundSink {
    clip: String,
    played: usize,
}

impl LogSoundSink {
    pub fn new(clip: impl Into<String>) -> Self {
        Self { clip: clip.into(), played: 0 }
    }

    pub fn played(&self) -> usize {
        self.played
    }
}

impl SoundSink for LogSoundSink {
    fn play(&mut self, sound: ImpactSound) {
        self.played += 1;
        info!("Playing {} at volume {:.2}", self.clip, sound.volume);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::DynamicsWorld;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn impact(velocity: f32) -> Impact {
        let mut world = DynamicsWorld::default();
        let body = world.add_sphere(0.5, Vec3::Y);
        Impact { body, other: None, velocity }
    }

    //=====================================================================
    // ImpactSound Tests
    //=====================================================================

    #[test]
    fn only_strong_impacts_make_sound() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(ImpactSound::for_impact(&impact(0.9), 1.0, &mut rng).is_none());
        assert!(ImpactSound::for_impact(&impact(1.0), 1.0, &mut rng).is_none());

        let sound = ImpactSound::for_impact(&impact(4.0), 1.0, &mut rng).unwrap();
        assert!((0.0..1.0).contains(&sound.volume));
    }

    //=====================================================================
    // SoundSink Tests
    //=====================================================================

    #[test]
    fn log_sink_counts_plays() {
        let mut sink = LogSoundSink::new("sounds/hit.mp3");
        sink.play(ImpactSound { volume: 0.5 });
        sink.play(ImpactSound { volume: 0.1 });
        assert_eq!(sink.played(), 2);
    }
}
