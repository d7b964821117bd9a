//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, stack operations, and lifecycle.
//
// Scenes are stored in a HashMap by key and referenced via a stack
// of keys. This allows scenes to maintain state between activations.
//
// Transitions arrive on the message bus and are drained at the tick
// boundary, after every active scene has updated.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::globals::GlobalContext;
use crate::graphics::RenderView;

//=== Scene Transition ====================================================

/// Encapsulates scene stack operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition<K: SceneKey> {
    /// Adds a new scene to the top of the stack.
    Push(K),

    /// Removes a specific scene from the stack by key.
    Remove(K),

    /// Replaces a specific scene with another scene.
    Replace(K, K),

    /// Clears all scenes from the stack.
    Clear,

    /// No transition occurs.
    Empty,
}

impl<K: SceneKey> Default for SceneTransition<K> {
    fn default() -> Self {
        Self::Empty
    }
}

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Typically implemented by an application enum.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Manager =======================================================

/// Stack of active scenes over a registry of every known scene.
///
/// The topmost scene is the one shown; transparent scenes let the scene
/// beneath them keep updating.
pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    stack: Vec<S>,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            stack: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene; replaces (with a warning) any scene under `key`.
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!("Scene {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a scene and puts it on the stack as the initial scene.
    ///
    /// `on_enter` runs when the manager is started.
    pub fn register_default<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        self.register_scene(key, scene);

        if self.stack.contains(&key) {
            warn!("Scene {:?} is already in the stack", key);
        } else {
            debug!("Registered scene {:?} as default and added to stack", key);
            self.stack.push(key);
        }
    }

    /// Calls `on_enter` on every scene already on the stack.
    pub fn start(&mut self, context: &mut GlobalContext) {
        for &key in &self.stack {
            match self.scenes.get_mut(&key) {
                Some(scene) => {
                    info!("Starting scene {:?}", key);
                    scene.on_enter(context);
                }
                None => warn!("Initial scene {:?} not registered", key),
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_registered(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Stack from bottom to top.
    pub fn stack(&self) -> &[S] {
        &self.stack
    }

    pub fn top(&self) -> Option<S> {
        self.stack.last().copied()
    }

    /// View of the topmost scene that has one.
    pub fn render_view(&self) -> Option<RenderView<'_>> {
        self.stack
            .iter()
            .rev()
            .filter_map(|key| self.scenes.get(key))
            .find_map(|scene| scene.render_view())
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates the topmost opaque scene and every transparent scene above it.
    pub fn update(&mut self, context: &mut GlobalContext) {
        if self.stack.is_empty() {
            return;
        }

        let active = self.collect_active_scenes();
        for key in active {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.update(context);
            }
        }
    }

    //--- Transition Processing --------------------------------------------

    /// Applies queued transitions in FIFO order.
    pub fn process_transitions(&mut self, context: &mut GlobalContext) {
        for transition in context.message_bus.drain::<SceneTransition<S>>() {
            match transition {
                SceneTransition::Push(key) => self.push_internal(key, context),
                SceneTransition::Remove(key) => self.remove_internal(key, context),
                SceneTransition::Replace(old_key, new_key) => {
                    self.replace_internal(old_key, new_key, context)
                }
                SceneTransition::Clear => self.clear_internal(context),
                SceneTransition::Empty => {}
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn push_internal(&mut self, key: S, context: &mut GlobalContext) {
        if self.stack.contains(&key) {
            warn!("Scene {:?} is already in the stack, skipping push", key);
            return;
        }

        let Some(scene) = self.scenes.get_mut(&key) else {
            warn!("Attempted to push unregistered scene {:?}", key);
            return;
        };

        debug!("Pushing scene {:?} onto stack", key);
        self.stack.push(key);
        scene.on_enter(context);
    }

    fn remove_internal(&mut self, key: S, context: &mut GlobalContext) {
        let Some(pos) = self.stack.iter().position(|&k| k == key) else {
            debug!("Scene {:?} not found in stack, skipping removal", key);
            return;
        };

        debug!("Removing scene {:?} from stack at position {}", key, pos);
        self.stack.remove(pos);
        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.on_exit(context);
        }
    }

    fn replace_internal(&mut self, old_key: S, new_key: S, context: &mut GlobalContext) {
        let Some(pos) = self.stack.iter().position(|&k| k == old_key) else {
            warn!("Scene {:?} not found in stack, skipping replacement", old_key);
            return;
        };

        if self.stack.contains(&new_key) {
            warn!("Scene {:?} is already in the stack, skipping replacement", new_key);
            return;
        }

        if !self.scenes.contains_key(&new_key) {
            warn!("Attempted to replace with unregistered scene {:?}", new_key);
            return;
        }

        info!("Switching scene {:?} -> {:?}", old_key, new_key);

        if let Some(scene) = self.scenes.get_mut(&old_key) {
            scene.on_exit(context);
        }

        self.stack[pos] = new_key;

        if let Some(scene) = self.scenes.get_mut(&new_key) {
            scene.on_enter(context);
        }
    }

    fn clear_internal(&mut self, context: &mut GlobalContext) {
        debug!("Clearing all scenes from stack");

        for key in self.stack.drain(..).rev() {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.on_exit(context);
            }
        }
    }

    fn collect_active_scenes(&self) -> Vec<S> {
        let mut active = Vec::new();

        // Top-down until the first opaque scene.
        for &key in self.stack.iter().rev() {
            active.push(key);

            if let Some(scene) = self.scenes.get(&key) {
                if !scene.is_transparent() {
                    break;
                }
            }
        }

        active.reverse();
        active
    }
}

impl<S: SceneKey> Default for SceneManager<S> {
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
    use crate::core::message_bus::MessageBus;
    use crate::core::viewport::Viewport;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        A,
        B,
        Overlay,
    }

    impl SceneKey for Key {}

    type Log = Arc<Mutex<Vec<String>>>;

    struct Probe {
        name: &'static str,
        transparent: bool,
        log: Log,
    }

    impl Probe {
        fn new(name: &'static str, log: &Log) -> Self {
            Self { name, transparent: false, log: Arc::clone(log) }
        }

        fn record(&self, what: &str) {
            self.log.lock().unwrap().push(format!("{}:{}", self.name, what));
        }
    }

    impl Scene<Key> for Probe {
        fn on_enter(&mut self, _context: &mut GlobalContext) {
            self.record("enter");
        }

        fn on_exit(&mut self, _context: &mut GlobalContext) {
            self.record("exit");
        }

        fn update(&mut self, _context: &mut GlobalContext) {
            self.record("update");
        }

        fn is_transparent(&self) -> bool {
            self.transparent
        }
    }

    fn setup() -> (SceneManager<Key>, GlobalContext, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = SceneManager::new();
        manager.register_default(Key::A, Probe::new("a", &log));
        manager.register_scene(Key::B, Probe::new("b", &log));
        manager.register_scene(
            Key::Overlay,
            Probe { transparent: true, ..Probe::new("overlay", &log) },
        );
        (manager, GlobalContext::new(Viewport::default()), log)
    }

    fn take(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    fn send(context: &mut GlobalContext, transition: SceneTransition<Key>) {
        let bus: &mut MessageBus = &mut context.message_bus;
        bus.push(transition);
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn start_enters_default_scene() {
        let (mut manager, mut context, log) = setup();
        manager.start(&mut context);
        assert_eq!(take(&log), vec!["a:enter"]);
        assert_eq!(manager.top(), Some(Key::A));
    }

    #[test]
    fn replace_exits_old_and_enters_new() {
        let (mut manager, mut context, log) = setup();
        manager.start(&mut context);
        take(&log);

        send(&mut context, SceneTransition::Replace(Key::A, Key::B));
        manager.process_transitions(&mut context);

        assert_eq!(take(&log), vec!["a:exit", "b:enter"]);
        assert_eq!(manager.stack(), &[Key::B]);
        assert!(!context.message_bus.has_messages::<SceneTransition<Key>>());
    }

    #[test]
    fn replace_with_unregistered_or_present_scene_is_ignored() {
        let (mut manager, mut context, log) = setup();
        manager.start(&mut context);
        take(&log);

        send(&mut context, SceneTransition::Replace(Key::B, Key::A));
        send(&mut context, SceneTransition::Replace(Key::A, Key::A));
        manager.process_transitions(&mut context);

        assert!(take(&log).is_empty());
        assert_eq!(manager.stack(), &[Key::A]);
    }

    #[test]
    fn clear_exits_top_first() {
        let (mut manager, mut context, log) = setup();
        manager.start(&mut context);
        send(&mut context, SceneTransition::Push(Key::Overlay));
        manager.process_transitions(&mut context);
        take(&log);

        send(&mut context, SceneTransition::Clear);
        manager.process_transitions(&mut context);
        assert_eq!(take(&log), vec!["overlay:exit", "a:exit"]);
        assert!(manager.top().is_none());
    }

    //=====================================================================
    // Update Tests
    //=====================================================================

    #[test]
    fn transparent_overlay_lets_scene_below_update() {
        let (mut manager, mut context, log) = setup();
        manager.start(&mut context);
        send(&mut context, SceneTransition::Push(Key::Overlay));
        manager.process_transitions(&mut context);
        take(&log);

        manager.update(&mut context);
        assert_eq!(take(&log), vec!["a:update", "overlay:update"]);
    }

    #[test]
    fn opaque_scene_blocks_scenes_below() {
        let (mut manager, mut context, log) = setup();
        manager.start(&mut context);
        send(&mut context, SceneTransition::Push(Key::B));
        manager.process_transitions(&mut context);
        take(&log);

        manager.update(&mut context);
        assert_eq!(take(&log), vec!["b:update"]);
    }

    #[test]
    fn empty_stack_has_no_view() {
        let manager: SceneManager<Key> = SceneManager::new();
        assert!(manager.render_view().is_none());
    }
}
