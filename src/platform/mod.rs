//=========================================================================
// Platform Subsystem
//
// The seam between the engine and the native multimedia layer.
//
// Architecture:
// ```text
//  NativeLayer (trait)
//   ├─ QueueBackend   headless: events posted through a channel, simulated
//   │                 joystick / controller hotplug, frames counted
//   └─ (winit)        run_windowed(): WindowEvents translated into engine
//                     events, one engine frame per RedrawRequested
//
//  Engine frame:
//    native.pump_events() ─► dispatch ─► reconcile(native) ─► update
//    ─► render ─► native.present(surface)
// ```
//
// Device queries are keyed by the stable instance id; slot indices are
// only valid inside the ADDED event that carries them.
//
//=========================================================================

//=== Submodules ==========================================================

mod queue;
mod translate;
mod window;

//=== Public API ==========================================================

pub use queue::{QueueBackend, QueueHandle};
pub use translate::Translator;
pub use window::run_windowed;

//=== External Crates =====================================================

use thiserror::Error;

//=== Internal Imports ====================================================

use crate::core::event::Event;
use crate::core::input::DeviceClass;
use crate::core::options::UpdateType;
use crate::core::surface::Surface;

//=== DeviceInfo ==========================================================

/// What the native layer reports when a device is opened: identity plus
/// the live state of every axis, button and hat at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    pub instance_id: i32,
    pub name: String,
    pub axes: Vec<f32>,
    pub buttons: Vec<bool>,
    pub hats: Vec<(i32, i32)>,
    /// Balls only report relative motion, so there is no state to read.
    pub balls: usize,
}

impl DeviceInfo {
    /// A device at rest: centered axes and hats, no buttons held.
    pub fn neutral(instance_id: i32, name: &str, axes: usize, buttons: usize, hats: usize) -> Self {
        Self {
            instance_id,
            name: name.to_string(),
            axes: vec![0.0; axes],
            buttons: vec![false; buttons],
            hats: vec![(0, 0); hats],
            balls: 0,
        }
    }
}

//=== NativeLayer =========================================================

/// Event source, device table and display of the underlying platform.
pub trait NativeLayer {
    /// Returns the events that arrived since the last pump, in order.
    fn pump_events(&mut self) -> Vec<Event>;

    /// Number of device slots of `class` currently known to the platform.
    fn device_count(&self, class: DeviceClass) -> usize;

    /// Opens the device in slot `index`.
    fn open_device(&self, class: DeviceClass, index: usize) -> Option<DeviceInfo>;

    /// Name of an attached device; `None` once it is gone.
    fn device_name(&self, class: DeviceClass, instance_id: i32) -> Option<String>;

    /// Current slot of an attached device.
    fn device_index(&self, class: DeviceClass, instance_id: i32) -> Option<usize>;

    /// Shows a finished frame.
    fn present(&mut self, frame: &Surface, update_type: UpdateType) -> Result<(), PlatformError>;

    /// Releases native resources. Called once, after the last frame.
    fn shutdown(&mut self) {}
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are typically fatal - if the event loop can't be created,
/// the engine cannot run.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),

    #[error("Window creation failed: {0}")]
    Window(String),

    #[error("Present failed: {0}")]
    Present(String),
}

//=========================================================================
// Unit Tests
//=========================================================================
