//=========================================================================
// Controller Dispatch
//=========================================================================
//
// Routes game controller events through the controller registry. Same
// hotplug flow as joysticks; controllers additionally forward remap and
// touchpad events for attached devices.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::device::{device_added, device_input, device_removed, DeviceClass};
use crate::core::dispatch::{HandlerId, Router};
use crate::core::error::EngineError;
use crate::core::event::{codes, Event};
use crate::core::scene::SceneKey;

//=== Standard Layout =====================================================

/// Axes of the standard controller layout (2 sticks, 2 triggers).
pub const CONTROLLER_AXES: usize = 6;

/// Buttons of the standard controller layout.
pub const CONTROLLER_BUTTONS: usize = 15;

const CLASS: DeviceClass = DeviceClass::Controller;

//=== Dispatcher ==========================================================

pub(crate) fn dispatch<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    match event.code() {
        codes::CONTROLLER_DEVICE_ADDED => {
            device_added(router, CLASS, HandlerId::ControllerDeviceAdded, event)
        }
        codes::CONTROLLER_DEVICE_REMOVED => {
            device_removed(router, CLASS, HandlerId::ControllerDeviceRemoved, event)
        }

        codes::CONTROLLER_AXIS_MOTION => {
            device_input(router, CLASS, HandlerId::ControllerAxisMotion, event, |proxy, e| {
                if let (Some(axis), Some(value)) = (e.int("axis"), e.float("value")) {
                    proxy.set_axis(axis, value as f32);
                }
            })
        }
        codes::CONTROLLER_BUTTON_DOWN => {
            device_input(router, CLASS, HandlerId::ControllerButtonDown, event, |proxy, e| {
                if let Some(button) = e.int("button") {
                    proxy.set_button(button, true);
                }
            })
        }
        codes::CONTROLLER_BUTTON_UP => {
            device_input(router, CLASS, HandlerId::ControllerButtonUp, event, |proxy, e| {
                if let Some(button) = e.int("button") {
                    proxy.set_button(button, false);
                }
            })
        }

        codes::CONTROLLER_DEVICE_REMAPPED => {
            device_input(router, CLASS, HandlerId::ControllerDeviceRemapped, event, |_, _| {})
        }
        codes::CONTROLLER_TOUCHPAD_DOWN => {
            device_input(router, CLASS, HandlerId::ControllerTouchpadDown, event, |_, _| {})
        }
        codes::CONTROLLER_TOUCHPAD_MOTION => {
            device_input(router, CLASS, HandlerId::ControllerTouchpadMotion, event, |_, _| {})
        }
        codes::CONTROLLER_TOUCHPAD_UP => {
            device_input(router, CLASS, HandlerId::ControllerTouchpadUp, event, |_, _| {})
        }

        _ => Ok(false),
    }
}
