//=========================================================================
// Window Event Translator
//=========================================================================
//
// Converts Winit window events into engine event records.
//
// Architecture:
//   WindowEvent → Translator → Vec<Event> (taxonomy codes) → EventPoster
//
// Stateful tracking: modifier state from ModifiersChanged is attached to
// every key event, and the last cursor position is attached to mouse
// button events and used for relative motion. Unmapped keys (F13-F24,
// numpad, media keys) are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    event::{ElementState, Ime, MouseButton as WinitMouseButton, MouseScrollDelta, TouchPhase, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::event::{codes, Event};
use crate::core::input::{KeyCode, Modifiers, MouseButton};

//=== Translator ==========================================================

/// Converts Winit events to engine events with modifier and cursor tracking.
#[derive(Debug, Default)]
pub struct Translator {
    modifiers: Modifiers,
    cursor: (i32, i32),
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// Translates one window event. `RedrawRequested` and events with no
    /// taxonomy counterpart produce nothing.
    pub fn translate(&mut self, event: &WindowEvent) -> Vec<Event> {
        match event {
            WindowEvent::CloseRequested => vec![Event::new(codes::WINDOW_CLOSE), Event::new(codes::QUIT)],
            WindowEvent::Resized(size) => vec![self.resized(size.width, size.height)],
            WindowEvent::Moved(pos) => vec![Event::new(codes::WINDOW_MOVED).with("pos", (pos.x, pos.y))],
            WindowEvent::Focused(true) => vec![Event::new(codes::WINDOW_FOCUS_GAINED)],
            WindowEvent::Focused(false) => vec![Event::new(codes::WINDOW_FOCUS_LOST)],
            WindowEvent::CursorEntered { .. } => vec![Event::new(codes::WINDOW_ENTER)],
            WindowEvent::CursorLeft { .. } => vec![Event::new(codes::WINDOW_LEAVE)],
            WindowEvent::Occluded(true) => vec![Event::new(codes::WINDOW_HIDDEN)],
            WindowEvent::Occluded(false) => vec![Event::new(codes::WINDOW_EXPOSED)],

            WindowEvent::ModifiersChanged(state) => {
                self.update_modifiers(state.state());
                Vec::new()
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let mut events: Vec<Event> = self
                    .key(key_event.physical_key, key_event.state, key_event.repeat)
                    .into_iter()
                    .collect();
                if key_event.state == ElementState::Pressed {
                    if let Some(text) = key_event.text.as_deref() {
                        events.extend(text_input(text));
                    }
                }
                events
            }

            WindowEvent::Ime(Ime::Preedit(text, cursor)) => {
                let start = cursor.map_or(0, |(start, _)| start);
                vec![Event::new(codes::TEXT_EDITING)
                    .with("text", text.as_str())
                    .with("start", start)
                    .with("length", text.chars().count())]
            }
            WindowEvent::Ime(Ime::Commit(text)) => text_input(text).into_iter().collect(),

            WindowEvent::CursorMoved { position, .. } => {
                vec![self.cursor_moved(position.x as f32, position.y as f32)]
            }
            WindowEvent::MouseInput { state, button, .. } => vec![self.mouse_button(*button, *state)],
            WindowEvent::MouseWheel { delta, .. } => self.wheel(*delta),

            WindowEvent::DroppedFile(path) => {
                vec![Event::new(codes::DROP_FILE).with("file", path.to_string_lossy().into_owned())]
            }
            WindowEvent::HoveredFile(_) => vec![Event::new(codes::DROP_BEGIN)],
            WindowEvent::HoveredFileCancelled => vec![Event::new(codes::DROP_COMPLETE)],

            WindowEvent::Touch(touch) => {
                vec![touch_event(touch.id, touch.phase, touch.location.x, touch.location.y)]
            }

            other => {
                trace!(target: "platform::input", "No engine event for {:?}", other);
                Vec::new()
            }
        }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached modifier state (applied to subsequent key events).
    pub fn update_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    //--- Event Builders ---------------------------------------------------

    /// Key down/up record; `None` for unmapped keys.
    pub fn key(&self, physical: PhysicalKey, state: ElementState, repeat: bool) -> Option<Event> {
        let key = match physical {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };
        if key == KeyCode::Unidentified {
            trace!(target: "platform::input", "Unmapped key ignored");
            return None;
        }

        let code = match state {
            ElementState::Pressed => codes::KEY_DOWN,
            ElementState::Released => codes::KEY_UP,
        };
        Some(
            Event::new(code)
                .with("key", key)
                .with("modifiers", self.modifiers)
                .with("repeat", repeat),
        )
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) -> Event {
        let pos = (x.round() as i32, y.round() as i32);
        let rel = (pos.0 - self.cursor.0, pos.1 - self.cursor.1);
        self.cursor = pos;
        Event::new(codes::MOUSE_MOTION).with("pos", pos).with("rel", rel)
    }

    pub fn mouse_button(&self, button: WinitMouseButton, state: ElementState) -> Event {
        let code = match state {
            ElementState::Pressed => codes::MOUSE_BUTTON_DOWN,
            ElementState::Released => codes::MOUSE_BUTTON_UP,
        };
        Event::new(code)
            .with("pos", self.cursor)
            .with("button", MouseButton::from(button).index())
    }

    /// Wheel record, followed by the legacy wheel-button press and release
    /// for vertical scrolling.
    pub fn wheel(&self, delta: MouseScrollDelta) -> Vec<Event> {
        let (x, y) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x.round() as i32, y.round() as i32),
            MouseScrollDelta::PixelDelta(pos) => (step(pos.x), step(pos.y)),
        };

        let mut events = vec![Event::new(codes::MOUSE_WHEEL).with("x", x).with("y", y)];
        let button = match y {
            y if y > 0 => Some(MouseButton::WheelUp),
            y if y < 0 => Some(MouseButton::WheelDown),
            _ => None,
        };
        if let Some(button) = button {
            for code in [codes::MOUSE_BUTTON_DOWN, codes::MOUSE_BUTTON_UP] {
                events.push(
                    Event::new(code)
                        .with("pos", self.cursor)
                        .with("button", button.index()),
                );
            }
        }
        events
    }

    pub fn resized(&self, width: u32, height: u32) -> Event {
        Event::new(codes::WINDOW_RESIZED)
            .with("width", width)
            .with("height", height)
    }
}

//=== Free Helpers ========================================================

/// Direction of a pixel scroll delta as a whole line step.
fn step(delta: f64) -> i32 {
    if delta > 0.0 {
        1
    } else if delta < 0.0 {
        -1
    } else {
        0
    }
}

/// Text-input record; control characters (Backspace, Enter, ...) produce none.
fn text_input(text: &str) -> Option<Event> {
    if text.is_empty() || text.chars().all(char::is_control) {
        return None;
    }
    Some(Event::new(codes::TEXT_INPUT).with("text", text))
}

fn touch_event(finger: u64, phase: TouchPhase, x: f64, y: f64) -> Event {
    let code = match phase {
        TouchPhase::Started => codes::FINGER_DOWN,
        TouchPhase::Moved => codes::FINGER_MOTION,
        TouchPhase::Ended | TouchPhase::Cancelled => codes::FINGER_UP,
    };
    Event::new(code)
        .with("finger_id", i64::try_from(finger).unwrap_or(i64::MAX))
        .with("x", x)
        .with("y", y)
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit ModifiersState to engine Modifiers.
///
/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Converts Winit physical key codes to engine key codes.
///
/// Unmapped keys (F13-F24, numpad, media keys) return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            W::Digit0 => KeyCode::Digit0,
            W::Digit1 => KeyCode::Digit1,
            W::Digit2 => KeyCode::Digit2,
            W::Digit3 => KeyCode::Digit3,
            W::Digit4 => KeyCode::Digit4,
            W::Digit5 => KeyCode::Digit5,
            W::Digit6 => KeyCode::Digit6,
            W::Digit7 => KeyCode::Digit7,
            W::Digit8 => KeyCode::Digit8,
            W::Digit9 => KeyCode::Digit9,

            W::KeyA => KeyCode::KeyA,
            W::KeyB => KeyCode::KeyB,
            W::KeyC => KeyCode::KeyC,
            W::KeyD => KeyCode::KeyD,
            W::KeyE => KeyCode::KeyE,
            W::KeyF => KeyCode::KeyF,
            W::KeyG => KeyCode::KeyG,
            W::KeyH => KeyCode::KeyH,
            W::KeyI => KeyCode::KeyI,
            W::KeyJ => KeyCode::KeyJ,
            W::KeyK => KeyCode::KeyK,
            W::KeyL => KeyCode::KeyL,
            W::KeyM => KeyCode::KeyM,
            W::KeyN => KeyCode::KeyN,
            W::KeyO => KeyCode::KeyO,
            W::KeyP => KeyCode::KeyP,
            W::KeyQ => KeyCode::KeyQ,
            W::KeyR => KeyCode::KeyR,
            W::KeyS => KeyCode::KeyS,
            W::KeyT => KeyCode::KeyT,
            W::KeyU => KeyCode::KeyU,
            W::KeyV => KeyCode::KeyV,
            W::KeyW => KeyCode::KeyW,
            W::KeyX => KeyCode::KeyX,
            W::KeyY => KeyCode::KeyY,
            W::KeyZ => KeyCode::KeyZ,

            W::ArrowUp => KeyCode::ArrowUp,
            W::ArrowDown => KeyCode::ArrowDown,
            W::ArrowLeft => KeyCode::ArrowLeft,
            W::ArrowRight => KeyCode::ArrowRight,

            W::F1 => KeyCode::F1,
            W::F2 => KeyCode::F2,
            W::F3 => KeyCode::F3,
            W::F4 => KeyCode::F4,
            W::F5 => KeyCode::F5,
            W::F6 => KeyCode::F6,
            W::F7 => KeyCode::F7,
            W::F8 => KeyCode::F8,
            W::F9 => KeyCode::F9,
            W::F10 => KeyCode::F10,
            W::F11 => KeyCode::F11,
            W::F12 => KeyCode::F12,

            W::ShiftLeft => KeyCode::ShiftLeft,
            W::ShiftRight => KeyCode::ShiftRight,
            W::ControlLeft => KeyCode::ControlLeft,
            W::ControlRight => KeyCode::ControlRight,
            W::AltLeft => KeyCode::AltLeft,
            W::AltRight => KeyCode::AltRight,

            W::Space => KeyCode::Space,
            W::Enter => KeyCode::Enter,
            W::Escape => KeyCode::Escape,
            W::Tab => KeyCode::Tab,
            W::Backspace => KeyCode::Backspace,
            W::Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts Winit mouse buttons to engine buttons.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            WinitMouseButton::Back => MouseButton::Back,
            WinitMouseButton::Forward => MouseButton::Forward,
            WinitMouseButton::Other(n) => MouseButton::Other(n),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift { state.insert(ModifiersState::SHIFT); }
        if ctrl { state.insert(ModifiersState::CONTROL); }
        if alt { state.insert(ModifiersState::ALT); }
        state
    }

    #[test]
    fn starts_with_no_modifiers() {
        let translator = Translator::new();
        assert!(translator.modifiers().is_empty());
        assert_eq!(translator.cursor(), (0, 0));
    }

    #[test]
    fn key_down_carries_cached_modifiers() {
        let mut translator = Translator::new();
        translator.update_modifiers(make_modifiers(false, true, false));

        let event = translator
            .key(PhysicalKey::Code(WinitKeyCode::KeyS), ElementState::Pressed, false)
            .unwrap();

        assert_eq!(event.code(), codes::KEY_DOWN);
        assert_eq!(event.key("key"), Some(KeyCode::KeyS));
        assert_eq!(event.modifiers("modifiers"), Some(Modifiers::CTRL));
        assert_eq!(event.flag("repeat"), Some(false));
    }

    #[test]
    fn key_up_uses_key_up_code() {
        let translator = Translator::new();
        let event = translator
            .key(PhysicalKey::Code(WinitKeyCode::Space), ElementState::Released, false)
            .unwrap();
        assert_eq!(event.code(), codes::KEY_UP);
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        let translator = Translator::new();
        assert!(translator
            .key(PhysicalKey::Code(WinitKeyCode::F13), ElementState::Pressed, false)
            .is_none());
    }

    #[test]
    fn cursor_motion_reports_relative_movement() {
        let mut translator = Translator::new();
        translator.cursor_moved(10.0, 20.0);
        let event = translator.cursor_moved(15.4, 18.6);

        assert_eq!(event.code(), codes::MOUSE_MOTION);
        assert_eq!(event.pair("pos"), Some((15, 19)));
        assert_eq!(event.pair("rel"), Some((5, -1)));
    }

    #[test]
    fn mouse_buttons_use_legacy_indices_and_cursor() {
        let mut translator = Translator::new();
        translator.cursor_moved(3.0, 4.0);

        let down = translator.mouse_button(WinitMouseButton::Right, ElementState::Pressed);
        assert_eq!(down.code(), codes::MOUSE_BUTTON_DOWN);
        assert_eq!(down.int("button"), Some(3));
        assert_eq!(down.pair("pos"), Some((3, 4)));

        let other = translator.mouse_button(WinitMouseButton::Other(2), ElementState::Released);
        assert_eq!(other.code(), codes::MOUSE_BUTTON_UP);
        assert_eq!(other.int("button"), Some(10));
    }

    #[test]
    fn vertical_wheel_emits_wheel_button_pair() {
        let translator = Translator::new();
        let events = translator.wheel(MouseScrollDelta::LineDelta(0.0, -1.0));

        let seen: Vec<u32> = events.iter().map(Event::code).collect();
        assert_eq!(
            seen,
            vec![codes::MOUSE_WHEEL, codes::MOUSE_BUTTON_DOWN, codes::MOUSE_BUTTON_UP]
        );
        assert_eq!(events[0].int("y"), Some(-1));
        assert_eq!(events[1].int("button"), Some(MouseButton::WheelDown.index()));
    }

    #[test]
    fn horizontal_wheel_emits_only_wheel() {
        let translator = Translator::new();
        let events = translator.wheel(MouseScrollDelta::LineDelta(2.0, 0.0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].int("x"), Some(2));
    }

    #[test]
    fn control_text_is_not_text_input() {
        assert!(text_input("\u{8}").is_none());
        assert!(text_input("").is_none());
        assert_eq!(text_input("a").unwrap().text("text"), Some("a"));
    }

    #[test]
    fn touch_phases_map_to_finger_codes() {
        assert_eq!(touch_event(1, TouchPhase::Started, 0.0, 0.0).code(), codes::FINGER_DOWN);
        assert_eq!(touch_event(1, TouchPhase::Moved, 0.0, 0.0).code(), codes::FINGER_MOTION);
        assert_eq!(touch_event(1, TouchPhase::Cancelled, 0.0, 0.0).code(), codes::FINGER_UP);
    }

    #[test]
    fn close_request_becomes_close_then_quit() {
        let mut translator = Translator::new();
        let events = translator.translate(&WindowEvent::CloseRequested);
        assert_eq!(events[0].code(), codes::WINDOW_CLOSE);
        assert_eq!(events[1].code(), codes::QUIT);
    }

    #[test]
    fn redraw_produces_nothing() {
        let mut translator = Translator::new();
        assert!(translator.translate(&WindowEvent::RedrawRequested).is_empty());
    }

    #[test]
    fn keycode_conversion() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::F5), KeyCode::F5);
        assert_eq!(KeyCode::from(WinitKeyCode::ShiftLeft), KeyCode::ShiftLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadAdd), KeyCode::Unidentified);
    }
}
