//=========================================================================
// Mouse
//=========================================================================
//
// Pointer tracking and mouse dispatch. Raw button and motion events are
// expanded into the finer-grained handlers scenes usually want:
//
//   MOUSE_MOTION      → on_mouse_motion_event
//                       (+ on_mouse_drag_event, on_<button>_mouse_drag_event
//                        while buttons are held)
//   MOUSE_BUTTON_DOWN → on_<button>_mouse_button_down_event | scroll up/down
//                       → on_mouse_button_down_event
//   MOUSE_BUTTON_UP   → on_<button>_mouse_button_up_event
//                       → on_mouse_button_up_event
//                       (+ on_mouse_drop_event, on_<button>_mouse_drop_event
//                        if the button was dragging)
//   MOUSE_WHEEL       → on_mouse_wheel_event
//
// Event fields: `pos` (x, y) and `rel` (dx, dy) on motion, `pos` and
// `button` (numeric index) on button events, `x`/`y` on wheel events.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::keys::MouseButton;
use crate::core::dispatch::{HandlerId, Router};
use crate::core::error::EngineError;
use crate::core::event::{codes, Event};
use crate::core::scene::SceneKey;

//=== MouseState ==========================================================

#[derive(Debug, Default)]
pub struct MouseState {
    position: (i32, i32),
    held: HashSet<MouseButton>,
    dragging: HashSet<MouseButton>,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }

    /// True if `button` has moved while held since it was pressed.
    pub fn is_dragging(&self, button: MouseButton) -> bool {
        self.dragging.contains(&button)
    }

    fn track_position(&mut self, event: &Event) {
        if let Some(pos) = event.pair("pos") {
            self.position = pos;
        }
    }
}

//--- Per-Button Handlers -------------------------------------------------

fn button_down_handler(button: MouseButton) -> Option<HandlerId> {
    match button {
        MouseButton::Left => Some(HandlerId::LeftMouseButtonDown),
        MouseButton::Middle => Some(HandlerId::MiddleMouseButtonDown),
        MouseButton::Right => Some(HandlerId::RightMouseButtonDown),
        MouseButton::WheelUp => Some(HandlerId::MouseScrollUp),
        MouseButton::WheelDown => Some(HandlerId::MouseScrollDown),
        _ => None,
    }
}

fn button_up_handler(button: MouseButton) -> Option<HandlerId> {
    match button {
        MouseButton::Left => Some(HandlerId::LeftMouseButtonUp),
        MouseButton::Middle => Some(HandlerId::MiddleMouseButtonUp),
        MouseButton::Right => Some(HandlerId::RightMouseButtonUp),
        _ => None,
    }
}

fn drag_handler(button: MouseButton) -> Option<HandlerId> {
    match button {
        MouseButton::Left => Some(HandlerId::LeftMouseDrag),
        MouseButton::Middle => Some(HandlerId::MiddleMouseDrag),
        MouseButton::Right => Some(HandlerId::RightMouseDrag),
        _ => None,
    }
}

fn drop_handler(button: MouseButton) -> Option<HandlerId> {
    match button {
        MouseButton::Left => Some(HandlerId::LeftMouseDrop),
        MouseButton::Middle => Some(HandlerId::MiddleMouseDrop),
        MouseButton::Right => Some(HandlerId::RightMouseDrop),
        _ => None,
    }
}

/// Buttons in a fixed order so per-button events fire deterministically.
const DRAG_ORDER: [MouseButton; 3] = [MouseButton::Left, MouseButton::Middle, MouseButton::Right];

//=== Dispatcher ==========================================================

pub(crate) fn dispatch<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    match event.code() {
        codes::MOUSE_MOTION => motion(router, event),
        codes::MOUSE_BUTTON_DOWN => button_down(router, event),
        codes::MOUSE_BUTTON_UP => button_up(router, event),
        codes::MOUSE_WHEEL => router.forward(HandlerId::MouseWheel, event),
        _ => Ok(false),
    }
}

fn motion<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    let mouse = &mut router.devices.mouse;
    mouse.track_position(event);
    let held: Vec<MouseButton> = mouse.held.iter().copied().collect();
    mouse.dragging.extend(held.iter().copied());

    router.forward(HandlerId::MouseMotion, event)?;
    if held.is_empty() {
        return Ok(true);
    }

    router.forward(HandlerId::MouseDrag, event)?;
    for button in DRAG_ORDER.into_iter().filter(|b| held.contains(b)) {
        if let Some(id) = drag_handler(button) {
            router.forward(id, event)?;
        }
    }
    Ok(true)
}

fn button_down<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    let mouse = &mut router.devices.mouse;
    mouse.track_position(event);
    let button = event.int("button").and_then(MouseButton::from_index);

    if let Some(button) = button {
        if !button.is_wheel() {
            mouse.held.insert(button);
            mouse.dragging.remove(&button);
        }
        if let Some(id) = button_down_handler(button) {
            router.forward(id, event)?;
        }
    }
    router.forward(HandlerId::MouseButtonDown, event)
}

fn button_up<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    let mouse = &mut router.devices.mouse;
    mouse.track_position(event);
    let button = event.int("button").and_then(MouseButton::from_index);

    let dragged = match button {
        Some(button) => {
            mouse.held.remove(&button);
            mouse.dragging.remove(&button)
        }
        None => false,
    };

    if let Some(id) = button.and_then(button_up_handler) {
        router.forward(id, event)?;
    }
    router.forward(HandlerId::MouseButtonUp, event)?;

    if dragged {
        router.forward(HandlerId::MouseDrop, event)?;
        if let Some(id) = button.and_then(drop_handler) {
            router.forward(id, event)?;
        }
    }
    Ok(true)
}

//=========================================================================
// Unit Tests
//=========================================================================
