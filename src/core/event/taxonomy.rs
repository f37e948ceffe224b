//=========================================================================
// Event Taxonomy
//
// Static classification of raw event codes into categories.
//
// Each category owns a fixed member list. The dispatch table is built by
// walking these lists once; a code that appears in no list is unmapped
// and goes down the unimplemented-event path.
//
// Membership is exclusive: no code belongs to two categories.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::codes::{self, EventCode};

//=== Category ============================================================

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Audio,
    App,
    Window,
    Keyboard,
    Text,
    Mouse,
    Joystick,
    Controller,
    Touch,
    Drop,
    Midi,
    Game,
}

impl Category {
    /// Every category, in table-building order.
    pub const ALL: [Category; 12] = [
        Self::Audio,
        Self::App,
        Self::Window,
        Self::Keyboard,
        Self::Text,
        Self::Mouse,
        Self::Joystick,
        Self::Controller,
        Self::Touch,
        Self::Drop,
        Self::Midi,
        Self::Game,
    ];

    /// Lowercase label used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::App => "app",
            Self::Window => "window",
            Self::Keyboard => "keyboard",
            Self::Text => "text",
            Self::Mouse => "mouse",
            Self::Joystick => "joystick",
            Self::Controller => "controller",
            Self::Touch => "touch",
            Self::Drop => "drop",
            Self::Midi => "midi",
            Self::Game => "game",
        }
    }

    /// Static member codes of this category.
    pub fn members(self) -> &'static [EventCode] {
        match self {
            Self::Audio => AUDIO,
            Self::App => APP,
            Self::Window => WINDOW,
            Self::Keyboard => KEYBOARD,
            Self::Text => TEXT,
            Self::Mouse => MOUSE,
            Self::Joystick => JOYSTICK,
            Self::Controller => CONTROLLER,
            Self::Touch => TOUCH,
            Self::Drop => DROP,
            Self::Midi => MIDI,
            Self::Game => GAME,
        }
    }

    /// Linear lookup of the category owning `code`.
    ///
    /// The dispatch table is the O(1) path; this is for diagnostics.
    pub fn of(code: EventCode) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.members().contains(&code))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=== Member Lists ========================================================

const AUDIO: &[EventCode] = &[codes::AUDIO_DEVICE_ADDED, codes::AUDIO_DEVICE_REMOVED];

const APP: &[EventCode] = &[
    codes::APP_TERMINATING,
    codes::APP_LOW_MEMORY,
    codes::APP_WILL_ENTER_BACKGROUND,
    codes::APP_DID_ENTER_BACKGROUND,
    codes::APP_WILL_ENTER_FOREGROUND,
    codes::APP_DID_ENTER_FOREGROUND,
];

// ICC profile and display changes are classified but have no handler.
const WINDOW: &[EventCode] = &[
    codes::WINDOW_SHOWN,
    codes::WINDOW_HIDDEN,
    codes::WINDOW_EXPOSED,
    codes::WINDOW_MOVED,
    codes::WINDOW_RESIZED,
    codes::WINDOW_SIZE_CHANGED,
    codes::WINDOW_MINIMIZED,
    codes::WINDOW_MAXIMIZED,
    codes::WINDOW_RESTORED,
    codes::WINDOW_ENTER,
    codes::WINDOW_LEAVE,
    codes::WINDOW_FOCUS_GAINED,
    codes::WINDOW_FOCUS_LOST,
    codes::WINDOW_CLOSE,
    codes::WINDOW_TAKE_FOCUS,
    codes::WINDOW_HIT_TEST,
    codes::WINDOW_ICCPROF_CHANGED,
    codes::WINDOW_DISPLAY_CHANGED,
];

const KEYBOARD: &[EventCode] = &[codes::KEY_DOWN, codes::KEY_UP];

const TEXT: &[EventCode] = &[codes::TEXT_EDITING, codes::TEXT_INPUT];

const MOUSE: &[EventCode] = &[
    codes::MOUSE_MOTION,
    codes::MOUSE_BUTTON_DOWN,
    codes::MOUSE_BUTTON_UP,
    codes::MOUSE_WHEEL,
];

const JOYSTICK: &[EventCode] = &[
    codes::JOY_AXIS_MOTION,
    codes::JOY_BALL_MOTION,
    codes::JOY_HAT_MOTION,
    codes::JOY_BUTTON_DOWN,
    codes::JOY_BUTTON_UP,
    codes::JOY_DEVICE_ADDED,
    codes::JOY_DEVICE_REMOVED,
];

const CONTROLLER: &[EventCode] = &[
    codes::CONTROLLER_AXIS_MOTION,
    codes::CONTROLLER_BUTTON_DOWN,
    codes::CONTROLLER_BUTTON_UP,
    codes::CONTROLLER_DEVICE_ADDED,
    codes::CONTROLLER_DEVICE_REMOVED,
    codes::CONTROLLER_DEVICE_REMAPPED,
    codes::CONTROLLER_TOUCHPAD_DOWN,
    codes::CONTROLLER_TOUCHPAD_MOTION,
    codes::CONTROLLER_TOUCHPAD_UP,
];

const TOUCH: &[EventCode] = &[
    codes::FINGER_DOWN,
    codes::FINGER_UP,
    codes::FINGER_MOTION,
    codes::MULTI_GESTURE,
];

const DROP: &[EventCode] = &[
    codes::DROP_BEGIN,
    codes::DROP_COMPLETE,
    codes::DROP_FILE,
    codes::DROP_TEXT,
];

const MIDI: &[EventCode] = &[codes::MIDI_IN, codes::MIDI_OUT];

const GAME: &[EventCode] = &[
    codes::ACTIVE_EVENT,
    codes::FPS_EVENT,
    codes::GAME_EVENT,
    codes::MENU_ITEM,
    codes::SYS_WM_EVENT,
    codes::USER_EVENT,
    codes::VIDEO_EXPOSE,
    codes::VIDEO_RESIZE,
    codes::QUIT,
    codes::RENDER_DEVICE_RESET,
    codes::RENDER_TARGETS_RESET,
    codes::CLIPBOARD_UPDATE,
    codes::LOCALE_CHANGED,
];

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn membership_is_exclusive() {
        let mut seen = HashSet::new();
        for category in Category::ALL {
            for &code in category.members() {
                assert!(
                    seen.insert(code),
                    "{} appears in more than one category",
                    codes::name(code)
                );
            }
        }
    }

    #[test]
    fn of_finds_owning_category() {
        assert_eq!(Category::of(codes::JOY_AXIS_MOTION), Some(Category::Joystick));
        assert_eq!(Category::of(codes::QUIT), Some(Category::Game));
        assert_eq!(Category::of(codes::WINDOW_ICCPROF_CHANGED), Some(Category::Window));
    }

    #[test]
    fn auxiliary_codes_are_unclassified() {
        for code in [
            codes::SENSOR_UPDATE,
            codes::JOY_BATTERY_UPDATED,
            codes::KEYMAP_CHANGED,
            codes::DISPLAY_EVENT,
            codes::DOLLAR_GESTURE,
            codes::CONTROLLER_SENSOR_UPDATE,
        ] {
            assert_eq!(Category::of(code), None, "{} should be unmapped", codes::name(code));
        }
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Category::Controller.to_string(), "controller");
    }
}
