//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use proxima_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::error::{EngineError, SceneError, SceneResult};
pub use crate::core::frame::FrameStatus;
pub use crate::core::options::{EngineArgs, EngineOptions, Resolution, UpdateType};

// Events and dispatch
pub use crate::core::dispatch::{EventHandlers, HandlerResult, Response};
pub use crate::core::event::{codes, Category, Event, Value};

// Input system
pub use crate::core::input::{DeviceClass, DeviceProxy, KeyCode, Modifiers, MouseButton};

// Scene system
pub use crate::core::scene::{GameOverScene, PauseScene, Scene, SceneContext, SceneKey, SceneTransition};
pub use crate::core::surface::{Rgba, Surface};

// Native layer
pub use crate::platform::{NativeLayer, QueueBackend, QueueHandle};
