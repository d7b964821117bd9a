//=========================================================================
// Message Bus
//=========================================================================
//
// Architecture:
//   push<M>() → HashMap<TypeId, Vec<M>> → read<M>() (any number of readers)
//                                       → drain<M>() (single consumer)
//                                       → clear<M>() at tick boundary
//
// Queues are created lazily on first push and never deallocated, so
// recurring message types reuse their buffers every tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::message_queue::MessageQueue;

//=== Message =============================================================

/// Anything `Send + 'static` can travel on the bus.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=== MessageBus ==========================================================

/// One queue per message type, addressed by `TypeId`.
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self { queues: HashMap::new() }
    }

    //--- Producers --------------------------------------------------------

    /// Appends a message to the queue for its type.
    pub fn push<M: Message>(&mut self, message: M) {
        self.queue_mut::<M>().push(message);
    }

    /// Appends every message yielded by `messages`.
    pub fn extend<M: Message, I: IntoIterator<Item = M>>(&mut self, messages: I) {
        self.queue_mut::<M>().extend(messages);
    }

    //--- Consumers --------------------------------------------------------

    /// All queued messages of type `M`, oldest first.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queue::<M>().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes and returns every queued `M`, keeping the queue's capacity.
    ///
    /// Used by consumers that need `&mut` access to other state while
    /// handling the messages (scene transitions, for example).
    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        match self.queues.get_mut(&TypeId::of::<M>()) {
            Some(queue) => queue
                .as_any_mut()
                .downcast_mut::<Vec<M>>()
                .map(|v| v.drain(..).collect())
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    pub fn count<M: Message>(&self) -> usize {
        self.queue::<M>().map(Vec::len).unwrap_or(0)
    }

    //--- Clearing ---------------------------------------------------------

    /// Clears the queue for `M`, keeping its allocation.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears every queue, keeping entries and allocations.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    /// Number of message types that have been pushed at least once.
    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }

    fn queue_mut<M: Message>(&mut self) -> &mut Vec<M> {
        let queue = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        // Entries are keyed by the TypeId of their element type.
        queue
            .as_any_mut()
            .downcast_mut::<Vec<M>>()
            .expect("MessageBus queue stored under a foreign TypeId")
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Impact {
        strength: f32,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Resized {
        width: u32,
        height: u32,
    }

    #[test]
    fn new_bus_is_empty() {
        let bus = MessageBus::new();
        assert!(!bus.has_messages::<Impact>());
        assert!(bus.read::<Impact>().is_empty());
        assert_eq!(bus.queue_count(), 0);
    }

    #[test]
    fn messages_are_read_in_push_order_by_every_reader() {
        let mut bus = MessageBus::new();
        bus.push(Impact { strength: 1.5 });
        bus.push(Impact { strength: 3.0 });

        let first = bus.read::<Impact>();
        let second = bus.read::<Impact>();
        assert_eq!(first, second);
        assert_eq!(first[0].strength, 1.5);
        assert_eq!(first[1].strength, 3.0);
    }

    #[test]
    fn queues_are_separate_per_type() {
        let mut bus = MessageBus::new();
        bus.push(Impact { strength: 2.0 });
        bus.push(Resized { width: 800, height: 600 });

        assert_eq!(bus.count::<Impact>(), 1);
        assert_eq!(bus.count::<Resized>(), 1);

        bus.clear::<Impact>();
        assert!(!bus.has_messages::<Impact>());
        assert!(bus.has_messages::<Resized>());
    }

    #[test]
    fn drain_empties_the_queue_and_returns_everything() {
        let mut bus = MessageBus::new();
        bus.extend([Impact { strength: 1.0 }, Impact { strength: 4.0 }]);

        let drained = bus.drain::<Impact>();
        assert_eq!(drained.len(), 2);
        assert_eq!(bus.count::<Impact>(), 0);
        assert!(bus.drain::<Resized>().is_empty());
    }

    #[test]
    fn clear_all_keeps_queue_entries() {
        let mut bus = MessageBus::new();
        bus.push(Impact { strength: 1.0 });
        bus.push(Resized { width: 1, height: 1 });

        bus.clear_all();
        assert_eq!(bus.count::<Impact>(), 0);
        assert_eq!(bus.count::<Resized>(), 0);
        assert_eq!(bus.queue_count(), 2);
    }

    #[test]
    fn read_clear_read_across_ticks() {
        let mut bus = MessageBus::new();
        bus.push(Resized { width: 1280, height: 720 });
        assert_eq!(bus.read::<Resized>()[0].width, 1280);

        bus.clear::<Resized>();
        assert!(bus.read::<Resized>().is_empty());

        bus.push(Resized { width: 640, height: 480 });
        assert_eq!(bus.read::<Resized>()[0].height, 480);
    }
}
