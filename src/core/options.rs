//=========================================================================
// Engine Options
//=========================================================================
//
// Runtime configuration consumed by the engine, plus the `clap` argument
// group that produces it from a command line.
//
//   EngineArgs (clap, flattened into the game's CLI)
//       │ into_options()
//       ▼
//   EngineOptions ──► EngineBuilder::with_options()
//
// The unhandled-event policy flags are `Option<bool>`: `None` means the
// flag was never configured, which the fallback handler reports as a
// configuration error instead of guessing a policy.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

use clap::{Args, ValueEnum};

//=== Internal Dependencies ===============================================

use crate::core::error::ConfigError;
use crate::core::dispatch::UnhandledEventPolicy;

//=== UpdateType ==========================================================

/// How a rendered frame is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum UpdateType {
    /// Partial update of dirty regions.
    #[default]
    Update,

    /// Full buffer flip.
    Flip,
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => f.write_str("update"),
            Self::Flip => f.write_str("flip"),
        }
    }
}

//=== Resolution ==========================================================

/// Window or screen size in pixels, parsed from `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(800, 480)
    }
}

impl FromStr for Resolution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidResolution(s.to_owned());

        let (w, h) = s
            .trim()
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;

        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

//=== EngineOptions =======================================================

/// Engine runtime configuration.
///
/// # Default Values
///
/// - **target_fps**: 60.0 (`0.0` runs uncapped)
/// - **fps_refresh_rate_ms**: 1000
/// - **windowed**: false
/// - **resolution**: 800x480
/// - **update_type**: `Update`
/// - **debug_events / no_unhandled_events**: `Some(false)`
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub target_fps: f64,
    /// Interval between FPS events, in milliseconds.
    pub fps_refresh_rate_ms: u64,
    pub windowed: bool,
    pub resolution: Resolution,
    pub update_type: UpdateType,
    pub debug_events: Option<bool>,
    pub no_unhandled_events: Option<bool>,
}

impl EngineOptions {
    /// Checks values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.target_fps.is_finite() || self.target_fps < 0.0 {
            return Err(ConfigError::InvalidTargetFps(self.target_fps));
        }
        if self.fps_refresh_rate_ms == 0 {
            return Err(ConfigError::ZeroRefreshRate);
        }
        Ok(())
    }

    /// Unhandled-event policy derived from the two flags.
    pub fn event_policy(&self) -> UnhandledEventPolicy {
        UnhandledEventPolicy {
            debug_events: self.debug_events,
            no_unhandled_events: self.no_unhandled_events,
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            target_fps: 60.0,
            fps_refresh_rate_ms: 1000,
            windowed: false,
            resolution: Resolution::default(),
            update_type: UpdateType::default(),
            debug_events: Some(false),
            no_unhandled_events: Some(false),
        }
    }
}

//=== EngineArgs ==========================================================

/// Command-line flags for the engine, meant to be flattened into a
/// game's own `clap::Parser`:
///
/// ```no_run
/// use clap::Parser;
/// use proxima_engine::core::options::EngineArgs;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     engine: EngineArgs,
/// }
///
/// let options = Cli::parse().engine.into_options();
/// ```
#[derive(Debug, Clone, Args)]
pub struct EngineArgs {
    /// Target frames per second (0 for uncapped)
    #[arg(short = 'f', long, default_value_t = 60.0)]
    pub target_fps: f64,

    /// Milliseconds between FPS events
    #[arg(long, default_value_t = 1000)]
    pub fps_refresh_rate: u64,

    /// Run in a window instead of fullscreen
    #[arg(short, long)]
    pub windowed: bool,

    /// Screen resolution as WIDTHxHEIGHT
    #[arg(short, long, default_value = "800x480")]
    pub resolution: Resolution,

    /// Display update strategy
    #[arg(short, long, value_enum, default_value_t = UpdateType::Update)]
    pub update_type: UpdateType,

    /// Log each unhandled event handler once with a full event dump
    #[arg(long)]
    pub debug_events: bool,

    /// Treat any unhandled event as a fatal error
    #[arg(long)]
    pub no_unhandled_events: bool,
}

impl EngineArgs {
    /// Converts parsed flags into engine options. Both policy flags are
    /// always configured when coming from the command line.
    pub fn into_options(self) -> EngineOptions {
        EngineOptions {
            target_fps: self.target_fps,
            fps_refresh_rate_ms: self.fps_refresh_rate,
            windowed: self.windowed,
            resolution: self.resolution,
            update_type: self.update_type,
            debug_events: Some(self.debug_events),
            no_unhandled_events: Some(self.no_unhandled_events),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
