//=========================================================================
// Prism Lab — Library Root
//
// A set of standalone 3D scene exercises hosted on a multithreaded
// winit runtime, plus a rigid-body sandbox.
//
// Responsibilities:
// - Expose the scene host (`EngineBuilder`, `Engine`)
// - Expose the scene description layer (`graphics`) and the helpers the
//   exercises are built from (animation, debug panel, physics, procedural)
// - Keep OS integration (`platform`) hidden from users of the library
//
// Typical usage:
// ```no_run
// use prism_lab::config::LabConfig;
// use prism_lab::scenes::{self, LabAction, LabScene};
// use prism_lab::EngineBuilder;
//
// let config = LabConfig::default();
// EngineBuilder::<LabScene, LabAction>::new()
//     .build()
//     .init(|systems| scenes::register(systems, &config))
//     .run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the logic-thread systems (input, scenes, message bus).
// `graphics` describes what is drawn; a `Renderer` consumes snapshots.
// `scenes` holds the exercises themselves.
//
pub mod animation;
pub mod config;
pub mod core;
pub mod debug_panel;
pub mod graphics;
pub mod physics;
pub mod prelude;
pub mod procedural;
pub mod scenes;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and the winit event loop and is not part
// of the public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
