//=========================================================================
// Engine Errors
//=========================================================================
//
// Error types surfaced by the dispatch pipeline and the frame loop.
//
//   UnhandledEventError ─┐
//   ConfigError ─────────┼─► EngineError ─► Engine::run() result
//   PlatformError ───────┤
//   SceneError (boxed) ──┘   (wrapped with scene name + phase)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::event::{Category, EventCode};
use crate::platform::PlatformError;

//=== Scene Errors ========================================================

/// Error type returned by scene hooks and handlers.
///
/// Boxed so game code can propagate any error with `?`.
pub type SceneError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of a scene lifecycle hook.
pub type SceneResult = Result<(), SceneError>;

/// Lifecycle phase a scene error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    Setup,
    Update,
    Render,
    Cleanup,
    /// Inside the named event handler.
    Handler(&'static str),
}

impl fmt::Display for ScenePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => f.write_str("setup"),
            Self::Update => f.write_str("update"),
            Self::Render => f.write_str("render"),
            Self::Cleanup => f.write_str("cleanup"),
            Self::Handler(name) => write!(f, "{}", name),
        }
    }
}

//=== UnhandledEventError =================================================

/// Raised by the fallback handler in strict mode (`no_unhandled_events`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unhandled {category} event: {handler} (code 0x{code:04x})")]
pub struct UnhandledEventError {
    /// Handler method that no proxy implemented.
    pub handler: &'static str,
    pub category: Category,
    pub code: EventCode,
}

//=== ConfigError =========================================================

/// Invalid or incomplete engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid resolution '{0}': expected WIDTHxHEIGHT")]
    InvalidResolution(String),

    #[error("target fps must be finite and non-negative, got {0}")]
    InvalidTargetFps(f64),

    #[error("fps refresh rate must be greater than zero")]
    ZeroRefreshRate,

    #[error("scene {0} is not registered")]
    UnknownScene(String),

    #[error("unhandled event policy flag `{0}` is not configured")]
    MissingPolicyFlag(&'static str),
}

//=== EngineError =========================================================

/// Fatal error surfaced by the frame loop.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Unhandled(#[from] UnhandledEventError),

    #[error("scene '{scene}' failed during {phase}: {source}")]
    Scene {
        scene: String,
        phase: ScenePhase,
        #[source]
        source: SceneError,
    },

    #[error("scene '{scene}' panicked: {message}")]
    ScenePanic { scene: String, message: String },

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

//=========================================================================
// Unit Tests
//=========================================================================
