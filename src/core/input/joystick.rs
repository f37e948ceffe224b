//=========================================================================
// Joystick Dispatch
//=========================================================================
//
// Routes joystick events through the joystick registry.
//
//   JOY_DEVICE_ADDED    → open + register, then on_joy_device_added_event
//   JOY_AXIS/BALL/HAT/BUTTON → update proxy state, then forward
//   JOY_DEVICE_REMOVED  → on_joy_device_removed_event, then unregister
//
// Event fields:
//   axis:   instance_id, axis, value (-1.0..=1.0)
//   ball:   instance_id, ball, rel (dx, dy)
//   hat:    instance_id, hat, value (x, y)
//   button: instance_id, button
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::device::{device_added, device_input, device_removed, DeviceClass};
use crate::core::dispatch::{HandlerId, Router};
use crate::core::error::EngineError;
use crate::core::event::{codes, Event};
use crate::core::scene::SceneKey;

const CLASS: DeviceClass = DeviceClass::Joystick;

//=== Dispatcher ==========================================================

pub(crate) fn dispatch<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    match event.code() {
        codes::JOY_DEVICE_ADDED => device_added(router, CLASS, HandlerId::JoyDeviceAdded, event),
        codes::JOY_DEVICE_REMOVED => device_removed(router, CLASS, HandlerId::JoyDeviceRemoved, event),

        codes::JOY_AXIS_MOTION => device_input(router, CLASS, HandlerId::JoyAxisMotion, event, |proxy, e| {
            if let (Some(axis), Some(value)) = (e.int("axis"), e.float("value")) {
                proxy.set_axis(axis, value as f32);
            }
        }),
        codes::JOY_BALL_MOTION => device_input(router, CLASS, HandlerId::JoyBallMotion, event, |proxy, e| {
            if let (Some(ball), Some(rel)) = (e.int("ball"), e.pair("rel")) {
                proxy.set_ball(ball, rel);
            }
        }),
        codes::JOY_HAT_MOTION => device_input(router, CLASS, HandlerId::JoyHatMotion, event, |proxy, e| {
            if let (Some(hat), Some(value)) = (e.int("hat"), e.pair("value")) {
                proxy.set_hat(hat, value);
            }
        }),
        codes::JOY_BUTTON_DOWN => device_input(router, CLASS, HandlerId::JoyButtonDown, event, |proxy, e| {
            if let Some(button) = e.int("button") {
                proxy.set_button(button, true);
            }
        }),
        codes::JOY_BUTTON_UP => device_input(router, CLASS, HandlerId::JoyButtonUp, event, |proxy, e| {
            if let Some(button) = e.int("button") {
                proxy.set_button(button, false);
            }
        }),

        _ => Ok(false),
    }
}
