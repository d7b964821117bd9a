//=========================================================================
// Input System
//=========================================================================
//
// Per-tick input pipeline owned by `GlobalSystems`.
//
// process_frame():
//   tracker.clear() → tracker.process_events() → tracker.finalize_frame()
//                   → mapper.map_event() per event → actions
//
// The actions of the tick are published on the message bus by
// `GlobalSystems::update` before scenes run.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::action::{Action, InputContext};
use super::action_mapper::{ActionMapper, Trigger};
use super::event::{InputEvent, KeyCode, Modifiers};
use super::state_tracker::StateTracker;

//=== InputSystem =========================================================

/// Binding table plus the actions resolved during the current tick.
pub struct InputSystem<A: Action> {
    mapper: ActionMapper<A>,
    actions: Vec<A>,
}

impl<A: Action> InputSystem<A> {
    pub(crate) fn new() -> Self {
        Self {
            mapper: ActionMapper::new(),
            actions: Vec::with_capacity(8),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Feeds one tick of input batches into `tracker` and resolves actions.
    pub(crate) fn process_frame(&mut self, tracker: &mut StateTracker, batches: &[Vec<InputEvent>]) {
        self.actions.clear();
        tracker.clear();

        for batch in batches {
            tracker.process_events(batch);
            for event in batch {
                if let Some(action) = self.mapper.map_event(event) {
                    trace!("Mapped {:?} to {:?}", event, action);
                    self.actions.push(action);
                }
            }
        }

        tracker.finalize_frame();
    }

    /// Actions resolved during the last `process_frame`, in input order.
    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key without modifiers in the primary context.
    pub fn bind_key(&mut self, key: KeyCode, action: A) {
        self.bind_in(key, Modifiers::NONE, action, InputContext::Primary);
    }

    /// Binds a key or mouse button with exact modifiers in `context`.
    pub fn bind_in(&mut self, trigger: impl Into<Trigger>, modifiers: Modifiers, action: A, context: InputContext) {
        let trigger = trigger.into();
        debug!("Binding {:?}+{:?} -> {:?} in {:?}", trigger, modifiers, action, context);
        self.mapper.bind(trigger, modifiers, action, context);
    }

    //--- Context ----------------------------------------------------------

    /// Switches the active binding set. Scenes request this by pushing an
    /// `InputContext` onto the message bus.
    pub fn set_context(&mut self, context: InputContext) {
        if self.mapper.context() != context {
            debug!("Input context {:?} -> {:?}", self.mapper.context(), context);
        }
        self.mapper.set_context(context);
    }

    pub fn context(&self) -> InputContext {
        self.mapper.context()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
