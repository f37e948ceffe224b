//=========================================================================
// Input System
//=========================================================================
//
// Device state owned by the engine and the dispatchers that keep it
// current.
//
// Architecture:
//   Devices
//     ├─ keyboard:    KeyboardState   (held keys, modifiers)
//     ├─ mouse:       MouseState      (position, held / dragging buttons)
//     ├─ joysticks:   DeviceRegistry  (instance id → DeviceProxy)
//     └─ controllers: DeviceRegistry
//
// Scenes read device state through `SceneContext`. All writes happen in
// the category dispatchers of this module and in `reconcile`.
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod controller;
mod device;
pub(crate) mod joystick;
pub(crate) mod keyboard;
mod keys;
pub(crate) mod mouse;

//=== Public API ==========================================================

pub use controller::{CONTROLLER_AXES, CONTROLLER_BUTTONS};
pub use device::{DeviceClass, DeviceProxy, DeviceRegistry};
pub use keyboard::KeyboardState;
pub use keys::{KeyCode, Modifiers, MouseButton};
pub use mouse::MouseState;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::platform::NativeLayer;

//=== Devices =============================================================

/// Every input device the engine tracks.
#[derive(Debug)]
pub struct Devices {
    keyboard: KeyboardState,
    mouse: MouseState,
    joysticks: DeviceRegistry,
    controllers: DeviceRegistry,
}

impl Devices {
    pub fn new() -> Self {
        Self {
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            joysticks: DeviceRegistry::new(DeviceClass::Joystick),
            controllers: DeviceRegistry::new(DeviceClass::Controller),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn joysticks(&self) -> &DeviceRegistry {
        &self.joysticks
    }

    pub fn controllers(&self) -> &DeviceRegistry {
        &self.controllers
    }

    pub fn registry(&self, class: DeviceClass) -> &DeviceRegistry {
        match class {
            DeviceClass::Joystick => &self.joysticks,
            DeviceClass::Controller => &self.controllers,
        }
    }

    pub(crate) fn registry_mut(&mut self, class: DeviceClass) -> &mut DeviceRegistry {
        match class {
            DeviceClass::Joystick => &mut self.joysticks,
            DeviceClass::Controller => &mut self.controllers,
        }
    }

    //--- Reconciliation ---------------------------------------------------

    /// Sweeps both registries against the native device list. Returns the
    /// number of purged entries.
    pub fn reconcile(&mut self, native: &dyn NativeLayer) -> usize {
        let purged = self.joysticks.reconcile(native).len() + self.controllers.reconcile(native).len();
        if purged > 0 {
            debug!("Reconciliation purged {} stale device(s)", purged);
        }
        purged
    }
}

impl Default for Devices {
    fn default() -> Self {
        Self::new()
    }
}
