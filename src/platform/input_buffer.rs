//=========================================================================
// Input Buffer
//=========================================================================
//
// Collects converted input between two redraws, split into:
//   discrete   — key / button transitions, order preserved
//   continuous — cursor moves and wheel scrolls, coalesced per variant
//
// Cursor moves keep the latest position; wheel deltas are summed so a
// fast scroll between redraws is not lost.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 128;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: Vec::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Continuous Event Handling ---------------------------------------

    /// Merges into the pending event of the same variant, or appends.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        match self.continuous.iter_mut().find(|pending| **pending == event) {
            Some(pending) => {
                pending.coalesce(&event);
            }
            None => self.continuous.push(event),
        }
    }

    //--- Discrete Event Handling -----------------------------------------

    /// Appends a transition; consecutive duplicates (key repeat) are dropped.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes both buffers, or `None` when nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let capacity = self.discrete.capacity();
        let discrete = std::mem::replace(&mut self.discrete, Vec::with_capacity(capacity));
        let continuous = std::mem::take(&mut self.continuous);
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------

    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn wheel(delta_y: f32) -> InputEvent {
        InputEvent::MouseWheel { delta_x: 0.0, delta_y }
    }

    #[test]
    fn discrete_deduplicates_repeats() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(key_down(KeyCode::KeyA));
        buffer.push_discrete(key_down(KeyCode::KeyA));
        buffer.push_discrete(key_down(KeyCode::KeyB));
        buffer.push_discrete(key_down(KeyCode::KeyA));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn cursor_moves_keep_latest_position() {
        let mut buffer = InputBuffer::new();
        buffer.push_continuous(InputEvent::MouseMoved { x: 10.0, y: 10.0 });
        buffer.push_continuous(InputEvent::MouseMoved { x: 20.0, y: 30.0 });

        let (_, continuous) = buffer.drain().unwrap();
        assert_eq!(continuous.len(), 1);
        assert!(matches!(continuous[0], InputEvent::MouseMoved { x, y } if (x, y) == (20.0, 30.0)));
    }

    #[test]
    fn wheel_deltas_accumulate_next_to_cursor() {
        let mut buffer = InputBuffer::new();
        buffer.push_continuous(wheel(40.0));
        buffer.push_continuous(InputEvent::MouseMoved { x: 1.0, y: 1.0 });
        buffer.push_continuous(wheel(-10.0));

        let (_, continuous) = buffer.drain().unwrap();
        assert_eq!(continuous.len(), 2);
        assert!(matches!(continuous[0], InputEvent::MouseWheel { delta_y, .. } if delta_y == 30.0));
    }

    #[test]
    fn drain_empties_and_empty_drain_is_none() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());

        buffer.push_discrete(key_down(KeyCode::KeyA));
        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }

    #[test]
    fn drain_keeps_discrete_capacity_for_next_frame() {
        let mut buffer = InputBuffer::new();
        for key in [KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC] {
            buffer.push_discrete(key_down(key));
        }
        let before = buffer.discrete.capacity();

        let (discrete, _) = buffer.drain().unwrap();
        assert_eq!(discrete.len(), 3);
        assert!(buffer.discrete.capacity() >= before);
    }
}
