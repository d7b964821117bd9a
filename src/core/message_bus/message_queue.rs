//=========================================================================
// Message Queue
//=========================================================================
//
// Type-erased view over `Vec<M>` so the bus can store heterogeneous
// queues in one map.
//
//=========================================================================

use std::any::Any;

use super::message_bus::Message;

//=== MessageQueue ========================================================

pub(super) trait MessageQueue: Send {
    /// Clears the queue, keeping its capacity.
    fn clear_queue(&mut self);

    fn len(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> MessageQueue for Vec<M> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    struct Volume(f32);

    #[test]
    fn clear_keeps_capacity() {
        let mut queue: Vec<Volume> = Vec::with_capacity(64);
        queue.extend((0..32).map(|i| Volume(i as f32 / 32.0)));
        let capacity = queue.capacity();

        let erased: &mut dyn MessageQueue = &mut queue;
        erased.clear_queue();
        assert_eq!(erased.len(), 0);

        assert_eq!(queue.capacity(), capacity);
    }

    #[test]
    fn downcast_round_trips_to_concrete_vec() {
        let mut queue = vec![Volume(0.25)];
        let erased: &mut dyn MessageQueue = &mut queue;

        let typed = erased.as_any_mut().downcast_mut::<Vec<Volume>>();
        assert!(typed.is_some());
        if let Some(v) = typed {
            v.push(Volume(0.75));
        }
        assert!(erased.as_any().downcast_ref::<Vec<u8>>().is_none());

        assert_eq!(queue.len(), 2);
        assert_eq!(queue[1].0, 0.75);
    }
}
