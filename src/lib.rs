//=========================================================================
// Proxima Engine - Library Root
//
// This crate defines the public API surface of the Proxima Engine.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the core systems scenes are written against (events, handlers,
//   devices, scenes)
// - Expose the native layer seam and its headless backend for tests
//
// Typical usage:
// ```no_run
// use proxima_engine::prelude::*;
//
// fn main() -> Result<(), Box<dyn std::error::Error>> {
//     EngineBuilder::new()
//         .with_scene(GameScene::Main, MainScene::new())
//         .with_initial_scene(GameScene::Main)
//         .build()?
//         .run_windowed()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all engine systems and logic (events, dispatch, input,
// scenes). `platform` holds the native layer seam, the headless queue
// backend and the Winit window runner.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the main engine entry point and the frame loop.
//
mod engine;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the engine facade so applications can simply
// `use proxima_engine::{Engine, EngineBuilder};`.
//
pub use engine::{Engine, EngineBuilder};
