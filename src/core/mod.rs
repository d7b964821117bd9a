//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Central coordinator for the logic (non-platform) thread.
//
// Each tick:
//   1. EventCollector drains the platform channel (≤100 events)
//   2. Latest resize → Viewport + ViewportResized, renderer.resize()
//   3. Clock samples wall time
//   4. GlobalSystems::update (input → actions → scenes → transitions)
//   5. Renderer draws the topmost scene's view
//   6. Sleep to hold the fixed tick rate
//
// The orchestrator communicates with the platform only through the
// bounded channel, so it never touches window handles.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod clock;
pub mod globals;
pub mod input;
pub mod message_bus;
pub mod platform_bridge;
pub mod scene;
pub mod viewport;

//=== Public API ==========================================================

pub use globals::{GlobalContext, GlobalSystems};
pub use input::Action;
pub use scene::SceneKey;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::graphics::{HeadlessRenderer, Renderer};
use input::InputEvent;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use viewport::Viewport;

//=== CoreSystemsOrchestrator =============================================

/// Owns the systems, the shared context and the render backend, and runs
/// them on the logic thread.
pub(crate) struct CoreSystemsOrchestrator<S: SceneKey, A: Action> {
    systems: GlobalSystems<S, A>,
    context: GlobalContext,
    renderer: Box<dyn Renderer>,
}

impl<S: SceneKey, A: Action> CoreSystemsOrchestrator<S, A> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(viewport: Viewport) -> Self {
        Self {
            systems: GlobalSystems::new(),
            context: GlobalContext::new(viewport),
            renderer: Box::new(HeadlessRenderer::new()),
        }
    }

    /// Runs user initialization against the systems.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<S, A>),
    {
        init_fn(&mut self.systems);
    }

    pub(crate) fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = renderer;
    }

    //--- Thread -----------------------------------------------------------

    /// Spawns the logic thread ticking at `tps` until the window closes or
    /// the channel disconnects.
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut orchestrator = self;
            let mut collector = EventCollector::new(receiver);

            orchestrator.renderer.resize(&orchestrator.context.viewport);
            orchestrator.systems.scene_manager.start(&mut orchestrator.context);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if let TickControl::Exit = collector.collect_frame() {
                    info!("Core thread exiting.");
                    break;
                }

                //--- Step 2-5: Tick -----------------------------------------
                let resize = collector.resize().map(|s| (s.width, s.height, s.scale_factor));
                orchestrator.tick(collector.take_batches(), resize);

                //--- Step 6: Maintain deterministic pacing ------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }

    //--- Tick -------------------------------------------------------------

    fn tick(&mut self, batches: Vec<Vec<InputEvent>>, resize: Option<(u32, u32, f64)>) {
        if let Some((width, height, scale_factor)) = resize {
            if self.context.resize(width, height, scale_factor) {
                self.renderer.resize(&self.context.viewport);
            }
        }

        for batch in batches {
            self.context.push_input(batch);
        }

        self.context.clock.tick();
        self.systems.update(&mut self.context);

        if let Err(e) = self.systems.render(&self.context, self.renderer.as_mut()) {
            error!("Render failed: {}", e);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
