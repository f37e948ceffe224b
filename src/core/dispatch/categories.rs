//=========================================================================
// Category Dispatchers
//=========================================================================
//
// Dispatchers for the categories that need no device state: each raw
// code maps straight to one handler. Codes a category owns but has no
// route for report "not handled" and end up on the unimplemented path.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::handlers::HandlerId;
use super::Router;
use crate::core::error::EngineError;
use crate::core::event::{codes, Event, EventCode};
use crate::core::scene::SceneKey;

//=== Routing =============================================================

type Routes = [(EventCode, HandlerId)];

/// Forwards `event` to the handler its code routes to, if any.
fn route<S: SceneKey>(router: &mut Router<'_, S>, event: &Event, routes: &Routes) -> Result<bool, EngineError> {
    match routes.iter().find(|(code, _)| *code == event.code()) {
        Some(&(_, id)) => router.forward(id, event),
        None => Ok(false),
    }
}

//=== Route Tables ========================================================

const AUDIO: &Routes = &[
    (codes::AUDIO_DEVICE_ADDED, HandlerId::AudioDeviceAdded),
    (codes::AUDIO_DEVICE_REMOVED, HandlerId::AudioDeviceRemoved),
];

const APP: &Routes = &[
    (codes::APP_TERMINATING, HandlerId::AppTerminating),
    (codes::APP_LOW_MEMORY, HandlerId::AppLowMemory),
    (codes::APP_WILL_ENTER_BACKGROUND, HandlerId::AppWillEnterBackground),
    (codes::APP_DID_ENTER_BACKGROUND, HandlerId::AppDidEnterBackground),
    (codes::APP_WILL_ENTER_FOREGROUND, HandlerId::AppWillEnterForeground),
    (codes::APP_DID_ENTER_FOREGROUND, HandlerId::AppDidEnterForeground),
];

const WINDOW: &Routes = &[
    (codes::WINDOW_SHOWN, HandlerId::WindowShown),
    (codes::WINDOW_HIDDEN, HandlerId::WindowHidden),
    (codes::WINDOW_EXPOSED, HandlerId::WindowExposed),
    (codes::WINDOW_MOVED, HandlerId::WindowMoved),
    (codes::WINDOW_RESIZED, HandlerId::WindowResized),
    (codes::WINDOW_SIZE_CHANGED, HandlerId::WindowSizeChanged),
    (codes::WINDOW_MINIMIZED, HandlerId::WindowMinimized),
    (codes::WINDOW_MAXIMIZED, HandlerId::WindowMaximized),
    (codes::WINDOW_RESTORED, HandlerId::WindowRestored),
    (codes::WINDOW_ENTER, HandlerId::WindowEnter),
    (codes::WINDOW_LEAVE, HandlerId::WindowLeave),
    (codes::WINDOW_FOCUS_GAINED, HandlerId::WindowFocusGained),
    (codes::WINDOW_FOCUS_LOST, HandlerId::WindowFocusLost),
    (codes::WINDOW_CLOSE, HandlerId::WindowClose),
    (codes::WINDOW_TAKE_FOCUS, HandlerId::WindowTakeFocus),
    (codes::WINDOW_HIT_TEST, HandlerId::WindowHitTest),
];

const TEXT: &Routes = &[
    (codes::TEXT_EDITING, HandlerId::TextEditing),
    (codes::TEXT_INPUT, HandlerId::TextInput),
];

const TOUCH: &Routes = &[
    (codes::FINGER_DOWN, HandlerId::FingerDown),
    (codes::FINGER_UP, HandlerId::FingerUp),
    (codes::FINGER_MOTION, HandlerId::FingerMotion),
    (codes::MULTI_GESTURE, HandlerId::MultiGesture),
];

const DROP: &Routes = &[
    (codes::DROP_BEGIN, HandlerId::DropBegin),
    (codes::DROP_COMPLETE, HandlerId::DropComplete),
    (codes::DROP_FILE, HandlerId::DropFile),
    (codes::DROP_TEXT, HandlerId::DropText),
];

const MIDI: &Routes = &[
    (codes::MIDI_IN, HandlerId::MidiIn),
    (codes::MIDI_OUT, HandlerId::MidiOut),
];

const GAME: &Routes = &[
    (codes::ACTIVE_EVENT, HandlerId::Active),
    (codes::FPS_EVENT, HandlerId::Fps),
    (codes::GAME_EVENT, HandlerId::Game),
    (codes::MENU_ITEM, HandlerId::MenuItem),
    (codes::SYS_WM_EVENT, HandlerId::SysWm),
    (codes::USER_EVENT, HandlerId::User),
    (codes::VIDEO_EXPOSE, HandlerId::VideoExpose),
    (codes::VIDEO_RESIZE, HandlerId::VideoResize),
    (codes::QUIT, HandlerId::Quit),
    (codes::RENDER_DEVICE_RESET, HandlerId::RenderDeviceReset),
    (codes::RENDER_TARGETS_RESET, HandlerId::RenderTargetsReset),
    (codes::CLIPBOARD_UPDATE, HandlerId::ClipboardUpdate),
    (codes::LOCALE_CHANGED, HandlerId::LocaleChanged),
];

//=== Dispatchers =========================================================

pub(crate) fn audio<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    route(router, event, AUDIO)
}

pub(crate) fn app<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    route(router, event, APP)
}

pub(crate) fn window<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    route(router, event, WINDOW)
}

pub(crate) fn text<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    route(router, event, TEXT)
}

pub(crate) fn touch<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    route(router, event, TOUCH)
}

pub(crate) fn drop<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    route(router, event, DROP)
}

pub(crate) fn midi<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    route(router, event, MIDI)
}

pub(crate) fn game<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    route(router, event, GAME)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::Category;

    fn tables() -> [(Category, &'static Routes); 8] {
        [
            (Category::Audio, AUDIO),
            (Category::App, APP),
            (Category::Window, WINDOW),
            (Category::Text, TEXT),
            (Category::Touch, TOUCH),
            (Category::Drop, DROP),
            (Category::Midi, MIDI),
            (Category::Game, GAME),
        ]
    }

    #[test]
    fn routes_stay_within_their_category() {
        for (category, routes) in tables() {
            for &(code, id) in routes {
                assert_eq!(Category::of(code), Some(category), "{}", codes::name(code));
                assert_eq!(id.category(), category, "{}", id.name());
            }
        }
    }

    #[test]
    fn only_display_related_window_codes_lack_routes() {
        let unrouted: Vec<EventCode> = Category::Window
            .members()
            .iter()
            .copied()
            .filter(|code| !WINDOW.iter().any(|(routed, _)| routed == code))
            .collect();

        assert_eq!(
            unrouted.len(),
            2,
            "unexpected unrouted window codes: {:?}",
            unrouted
        );
        assert!(unrouted.contains(&codes::WINDOW_ICCPROF_CHANGED));
        assert!(unrouted.contains(&codes::WINDOW_DISPLAY_CHANGED));
    }

    #[test]
    fn every_other_member_is_routed() {
        for (category, routes) in tables() {
            if category == Category::Window {
                continue;
            }
            for code in category.members() {
                assert!(
                    routes.iter().any(|(routed, _)| routed == code),
                    "{} has no route",
                    codes::name(*code)
                );
            }
        }
    }
}
