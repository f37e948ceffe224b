//=========================================================================
// Event Codes
//
// Raw numeric type codes carried by every event record.
//
// The numbering follows the native multimedia layer's event space so
// platform adapters can pass codes through untouched. Window sub-events
// are flattened into their own codes, and engine-defined events (FPS,
// game, menu item) live in the user range starting at `USER_EVENT`.
//
// Not every named code belongs to the taxonomy: sensor, battery, keymap
// and display notifications are named for logging but stay unclassified.
//
//=========================================================================

/// Raw event type code.
pub type EventCode = u32;

//=== Code Table ==========================================================

macro_rules! event_codes {
    ($( $name:ident = $value:expr ),* $(,)?) => {
        $( pub const $name: EventCode = $value; )*

        /// Every code with a symbolic name.
        pub const ALL: &[EventCode] = &[$($name),*];

        /// Returns the symbolic name of `code`, or `"UNKNOWN"`.
        pub fn name(code: EventCode) -> &'static str {
            match code {
                $( $name => stringify!($name), )*
                _ => "UNKNOWN",
            }
        }
    };
}

event_codes! {
    //--- Application ------------------------------------------------------
    QUIT = 0x100,
    APP_TERMINATING = 0x101,
    APP_LOW_MEMORY = 0x102,
    APP_WILL_ENTER_BACKGROUND = 0x103,
    APP_DID_ENTER_BACKGROUND = 0x104,
    APP_WILL_ENTER_FOREGROUND = 0x105,
    APP_DID_ENTER_FOREGROUND = 0x106,
    LOCALE_CHANGED = 0x107,
    DISPLAY_EVENT = 0x150,

    //--- Window -----------------------------------------------------------
    SYS_WM_EVENT = 0x201,
    WINDOW_SHOWN = 0x220,
    WINDOW_HIDDEN = 0x221,
    WINDOW_EXPOSED = 0x222,
    WINDOW_MOVED = 0x223,
    WINDOW_RESIZED = 0x224,
    WINDOW_SIZE_CHANGED = 0x225,
    WINDOW_MINIMIZED = 0x226,
    WINDOW_MAXIMIZED = 0x227,
    WINDOW_RESTORED = 0x228,
    WINDOW_ENTER = 0x229,
    WINDOW_LEAVE = 0x22A,
    WINDOW_FOCUS_GAINED = 0x22B,
    WINDOW_FOCUS_LOST = 0x22C,
    WINDOW_CLOSE = 0x22D,
    WINDOW_TAKE_FOCUS = 0x22E,
    WINDOW_HIT_TEST = 0x22F,
    WINDOW_ICCPROF_CHANGED = 0x230,
    WINDOW_DISPLAY_CHANGED = 0x231,

    //--- Keyboard & Text --------------------------------------------------
    KEY_DOWN = 0x300,
    KEY_UP = 0x301,
    TEXT_EDITING = 0x302,
    TEXT_INPUT = 0x303,
    KEYMAP_CHANGED = 0x304,

    //--- Mouse ------------------------------------------------------------
    MOUSE_MOTION = 0x400,
    MOUSE_BUTTON_DOWN = 0x401,
    MOUSE_BUTTON_UP = 0x402,
    MOUSE_WHEEL = 0x403,

    //--- Joystick ---------------------------------------------------------
    JOY_AXIS_MOTION = 0x600,
    JOY_BALL_MOTION = 0x601,
    JOY_HAT_MOTION = 0x602,
    JOY_BUTTON_DOWN = 0x603,
    JOY_BUTTON_UP = 0x604,
    JOY_DEVICE_ADDED = 0x605,
    JOY_DEVICE_REMOVED = 0x606,
    JOY_BATTERY_UPDATED = 0x607,

    //--- Controller -------------------------------------------------------
    CONTROLLER_AXIS_MOTION = 0x650,
    CONTROLLER_BUTTON_DOWN = 0x651,
    CONTROLLER_BUTTON_UP = 0x652,
    CONTROLLER_DEVICE_ADDED = 0x653,
    CONTROLLER_DEVICE_REMOVED = 0x654,
    CONTROLLER_DEVICE_REMAPPED = 0x655,
    CONTROLLER_TOUCHPAD_DOWN = 0x656,
    CONTROLLER_TOUCHPAD_MOTION = 0x657,
    CONTROLLER_TOUCHPAD_UP = 0x658,
    CONTROLLER_SENSOR_UPDATE = 0x659,

    //--- Touch & Gesture --------------------------------------------------
    FINGER_DOWN = 0x700,
    FINGER_UP = 0x701,
    FINGER_MOTION = 0x702,
    DOLLAR_GESTURE = 0x800,
    DOLLAR_RECORD = 0x801,
    MULTI_GESTURE = 0x802,

    //--- Clipboard, Drop, Audio, Sensors ----------------------------------
    CLIPBOARD_UPDATE = 0x900,
    DROP_FILE = 0x1000,
    DROP_TEXT = 0x1001,
    DROP_BEGIN = 0x1002,
    DROP_COMPLETE = 0x1003,
    AUDIO_DEVICE_ADDED = 0x1100,
    AUDIO_DEVICE_REMOVED = 0x1101,
    SENSOR_UPDATE = 0x1200,

    //--- Render -----------------------------------------------------------
    RENDER_TARGETS_RESET = 0x2000,
    RENDER_DEVICE_RESET = 0x2001,

    //--- MIDI & Legacy Display --------------------------------------------
    MIDI_IN = 0x7F00,
    MIDI_OUT = 0x7F01,
    ACTIVE_EVENT = 0x7F10,
    VIDEO_RESIZE = 0x7F11,
    VIDEO_EXPOSE = 0x7F12,

    //--- Engine-defined ---------------------------------------------------
    USER_EVENT = 0x8000,
    FPS_EVENT = 0x8001,
    GAME_EVENT = 0x8002,
    MENU_ITEM = 0x8003,
}

//=========================================================================
// Unit Tests
//=========================================================================
