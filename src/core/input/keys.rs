//=========================================================================
// Key & Button Identifiers
//
// Portable identifiers for keyboard keys, mouse buttons and modifier
// state. Platform adapters convert their native codes into these types
// before events enter the dispatch pipeline.
//
// Event records carry these values in their `key`, `mod` and `button`
// fields, so scenes never see platform-specific codes.
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// Buttons travel through event records as their conventional numeric
/// index (`1` left, `2` middle, `3` right, `4`/`5` wheel up/down). Use
/// [`MouseButton::from_index`] and [`MouseButton::index`] to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Middle button (wheel click).
    Middle,

    /// Secondary button (typically right).
    Right,

    /// Legacy wheel-up pseudo button.
    WheelUp,

    /// Legacy wheel-down pseudo button.
    WheelDown,

    /// Back thumb button.
    Back,

    /// Forward thumb button.
    Forward,

    /// Any other button, by raw index.
    Other(u16),
}

impl MouseButton {
    /// Converts a numeric button index into a button.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            1 => Some(Self::Left),
            2 => Some(Self::Middle),
            3 => Some(Self::Right),
            4 => Some(Self::WheelUp),
            5 => Some(Self::WheelDown),
            6 => Some(Self::Back),
            7 => Some(Self::Forward),
            n if n > 7 && n <= i64::from(u16::MAX) + 8 => Some(Self::Other((n - 8) as u16)),
            _ => None,
        }
    }

    /// Numeric index carried in the `button` field of mouse events.
    pub fn index(self) -> i64 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
            Self::WheelUp => 4,
            Self::WheelDown => 5,
            Self::Back => 6,
            Self::Forward => 7,
            Self::Other(n) => i64::from(n) + 8,
        }
    }

    /// True for the two legacy scroll pseudo buttons.
    pub fn is_wheel(self) -> bool {
        matches!(self, Self::WheelUp | Self::WheelDown)
    }
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// Text entry arrives separately through text-input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Modifier Keys ----------------------------------------------------

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys not explicitly mapped by the platform layer.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// The left and right variants of each modifier are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift key held (either left or right).
    pub shift: bool,

    /// Ctrl key held (either left or right, Command on macOS).
    pub ctrl: bool,

    /// Alt key held (either left or right, Option on macOS).
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };

    /// Shift only.
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };

    /// Ctrl only.
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };

    /// Alt only.
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    /// True when no modifier is held.
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
