//=========================================================================
// Event Collector
//=========================================================================
//
// Drains the platform channel once per tick.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input batches
//                                             → latest resize
//                                             → TickControl
//
// At most MAX_EVENTS_PER_FRAME events are taken per tick so a flood of
// input cannot starve the update. An idle tick sleeps briefly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

const MAX_EVENTS_PER_FRAME: usize = 100;
const IDLE_SLEEP_MS: u64 = 10;

//=== TickControl =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== SurfaceSize =========================================================

/// Last surface size reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    pub scale_factor: f64,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
    resize: Option<SurfaceSize>,
    idle_sleep: Duration,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
            resize: None,
            idle_sleep: Duration::from_millis(IDLE_SLEEP_MS),
        }
    }

    /// Drains pending events for this tick.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        self.resize = None;
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    drained += 1;
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        if drained == 0 && !self.idle_sleep.is_zero() {
            thread::sleep(self.idle_sleep);
        }

        TickControl::Continue
    }

    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Moves the batches out, leaving an empty buffer for the next tick.
    pub(crate) fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.input_batches)
    }

    /// The newest resize received this tick, if any.
    pub(crate) fn resize(&self) -> Option<SurfaceSize> {
        self.resize
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                if !discrete.is_empty() {
                    self.input_batches.push(discrete);
                }
                if !continuous.is_empty() {
                    self.input_batches.push(continuous);
                }
                TickControl::Continue
            }
            PlatformEvent::Resized { width, height, scale_factor } => {
                debug!("Surface resized to {}x{} @{}", width, height, scale_factor);
                self.resize = Some(SurfaceSize { width, height, scale_factor });
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }

    #[cfg(test)]
    fn without_idle_sleep(mut self) -> Self {
        self.idle_sleep = Duration::ZERO;
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};
    use crossbeam_channel::unbounded;

    fn collector() -> (crossbeam_channel::Sender<PlatformEvent>, EventCollector) {
        let (tx, rx) = unbounded();
        (tx, EventCollector::new(rx).without_idle_sleep())
    }

    fn key_batch() -> PlatformEvent {
        PlatformEvent::Inputs {
            discrete: vec![InputEvent::KeyDown { key: KeyCode::Tab, modifiers: Modifiers::NONE }],
            continuous: vec![InputEvent::MouseWheel { delta_x: 0.0, delta_y: 40.0 }],
        }
    }

    #[test]
    fn empty_queue_continues() {
        let (_tx, mut collector) = collector();
        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.batches().is_empty());
        assert!(collector.resize().is_none());
    }

    #[test]
    fn discrete_and_continuous_become_separate_batches() {
        let (tx, mut collector) = collector();
        tx.send(key_batch()).unwrap();

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 2);

        let taken = collector.take_batches();
        assert_eq!(taken.len(), 2);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn latest_resize_wins_within_a_tick() {
        let (tx, mut collector) = collector();
        tx.send(PlatformEvent::Resized { width: 800, height: 600, scale_factor: 1.0 }).unwrap();
        tx.send(PlatformEvent::Resized { width: 1920, height: 1080, scale_factor: 2.0 }).unwrap();

        collector.collect_frame();
        let size = collector.resize().unwrap();
        assert_eq!((size.width, size.height), (1920, 1080));
        assert_eq!(size.scale_factor, 2.0);

        collector.collect_frame();
        assert!(collector.resize().is_none());
    }

    #[test]
    fn window_closed_exits() {
        let (tx, mut collector) = collector();
        tx.send(PlatformEvent::WindowClosed).unwrap();
        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn disconnect_exits() {
        let (tx, mut collector) = collector();
        drop(tx);
        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn backlog_is_bounded_per_tick() {
        let (tx, mut collector) = collector();
        for _ in 0..(MAX_EVENTS_PER_FRAME + 20) {
            tx.send(key_batch()).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.batches().len(), MAX_EVENTS_PER_FRAME * 2);

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 40);
    }
}
