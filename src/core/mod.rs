//=========================================================================
// Core Systems
//
// Everything between the native layer and game code.
//
// Responsibilities:
// - Event records, taxonomy and the posted-event queue (`event`)
// - Classification and routing to handler methods (`dispatch`)
// - Keyboard, mouse and hotplugged device state (`input`)
// - Scene lifecycle and transitions (`scene`)
// - Engine configuration, errors, render target and frame pacing
//
// Notes:
// The core never talks to the OS directly. It only sees the platform
// through the `NativeLayer` trait, so every subsystem here runs the same
// under the headless queue backend and under a real window.
//
//=========================================================================

pub mod dispatch;
pub mod error;
pub mod event;
pub mod frame;
pub mod input;
pub mod options;
pub mod scene;
pub mod surface;
