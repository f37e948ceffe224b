//=========================================================================
// Event Handlers
//=========================================================================
//
// The capability interface every proxy (scene, manager hook) implements,
// and the handler-id enum that names each of its methods.
//
// Every handler has a default implementation returning
// `Response::Unhandled`, so a scene overrides only what it cares about and
// the proxy chain moves on to the next candidate for everything else.
//
//   HandlerId::JoyAxisMotion ──invoke()──► handlers.on_joy_axis_motion_event()
//
// The table below is the single source for the enum, its names and
// categories, the trait, the `Box` forwarding impl and `invoke`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::SceneError;
use crate::core::event::{Category, Event};
use crate::core::scene::{SceneContext, SceneKey};

//=== Response ============================================================

/// Outcome of one handler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// The proxy implemented the handler; the chain stops here.
    Handled,

    /// The proxy does not implement the handler; try the next one.
    Unhandled,
}

/// Result of an event handler.
pub type HandlerResult = Result<Response, SceneError>;

//=== Handler Table =======================================================

macro_rules! event_handlers {
    ($( $category:ident { $( $variant:ident => $method:ident ),* $(,)? } )*) => {
        /// Names one event handler method.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HandlerId {
            $( $( $variant, )* )*
        }

        impl HandlerId {
            /// Every handler, grouped by category.
            pub const ALL: &'static [HandlerId] = &[$( $( HandlerId::$variant, )* )*];

            /// Method name, e.g. `"on_joy_axis_motion_event"`.
            pub fn name(self) -> &'static str {
                match self {
                    $( $( HandlerId::$variant => stringify!($method), )* )*
                }
            }

            pub fn category(self) -> Category {
                match self {
                    $( $( HandlerId::$variant => Category::$category, )* )*
                }
            }
        }

        /// Event handler capability set.
        ///
        /// Override the handlers a proxy implements and return
        /// `Ok(Response::Handled)` from them. Everything else defaults to
        /// `Ok(Response::Unhandled)` and falls through the proxy chain.
        #[allow(unused_variables)]
        pub trait EventHandlers<S: SceneKey> {
            $( $(
                fn $method(&mut self, event: &Event, ctx: &mut SceneContext<'_, S>) -> HandlerResult {
                    Ok(Response::Unhandled)
                }
            )* )*
        }

        impl<S: SceneKey, H: EventHandlers<S> + ?Sized> EventHandlers<S> for Box<H> {
            $( $(
                fn $method(&mut self, event: &Event, ctx: &mut SceneContext<'_, S>) -> HandlerResult {
                    (**self).$method(event, ctx)
                }
            )* )*
        }

        /// Calls the handler named by `id` on `handlers`.
        pub fn invoke<S: SceneKey>(
            handlers: &mut dyn EventHandlers<S>,
            id: HandlerId,
            event: &Event,
            ctx: &mut SceneContext<'_, S>,
        ) -> HandlerResult {
            match id {
                $( $( HandlerId::$variant => handlers.$method(event, ctx), )* )*
            }
        }
    };
}

event_handlers! {
    Audio {
        AudioDeviceAdded => on_audio_device_added_event,
        AudioDeviceRemoved => on_audio_device_removed_event,
    }
    App {
        AppTerminating => on_app_terminating_event,
        AppLowMemory => on_app_low_memory_event,
        AppWillEnterBackground => on_app_will_enter_background_event,
        AppDidEnterBackground => on_app_did_enter_background_event,
        AppWillEnterForeground => on_app_will_enter_foreground_event,
        AppDidEnterForeground => on_app_did_enter_foreground_event,
    }
    Window {
        WindowShown => on_window_shown_event,
        WindowHidden => on_window_hidden_event,
        WindowExposed => on_window_exposed_event,
        WindowMoved => on_window_moved_event,
        WindowResized => on_window_resized_event,
        WindowSizeChanged => on_window_size_changed_event,
        WindowMinimized => on_window_minimized_event,
        WindowMaximized => on_window_maximized_event,
        WindowRestored => on_window_restored_event,
        WindowEnter => on_window_enter_event,
        WindowLeave => on_window_leave_event,
        WindowFocusGained => on_window_focus_gained_event,
        WindowFocusLost => on_window_focus_lost_event,
        WindowClose => on_window_close_event,
        WindowTakeFocus => on_window_take_focus_event,
        WindowHitTest => on_window_hit_test_event,
    }
    Keyboard {
        KeyDown => on_key_down_event,
        KeyUp => on_key_up_event,
        KeyChordDown => on_key_chord_down_event,
        KeyChordUp => on_key_chord_up_event,
    }
    Text {
        TextEditing => on_text_editing_event,
        TextInput => on_text_input_event,
    }
    Mouse {
        MouseMotion => on_mouse_motion_event,
        MouseDrag => on_mouse_drag_event,
        LeftMouseDrag => on_left_mouse_drag_event,
        MiddleMouseDrag => on_middle_mouse_drag_event,
        RightMouseDrag => on_right_mouse_drag_event,
        MouseDrop => on_mouse_drop_event,
        LeftMouseDrop => on_left_mouse_drop_event,
        MiddleMouseDrop => on_middle_mouse_drop_event,
        RightMouseDrop => on_right_mouse_drop_event,
        MouseButtonDown => on_mouse_button_down_event,
        LeftMouseButtonDown => on_left_mouse_button_down_event,
        MiddleMouseButtonDown => on_middle_mouse_button_down_event,
        RightMouseButtonDown => on_right_mouse_button_down_event,
        MouseButtonUp => on_mouse_button_up_event,
        LeftMouseButtonUp => on_left_mouse_button_up_event,
        MiddleMouseButtonUp => on_middle_mouse_button_up_event,
        RightMouseButtonUp => on_right_mouse_button_up_event,
        MouseScrollUp => on_mouse_scroll_up_event,
        MouseScrollDown => on_mouse_scroll_down_event,
        MouseWheel => on_mouse_wheel_event,
    }
    Joystick {
        JoyAxisMotion => on_joy_axis_motion_event,
        JoyBallMotion => on_joy_ball_motion_event,
        JoyHatMotion => on_joy_hat_motion_event,
        JoyButtonDown => on_joy_button_down_event,
        JoyButtonUp => on_joy_button_up_event,
        JoyDeviceAdded => on_joy_device_added_event,
        JoyDeviceRemoved => on_joy_device_removed_event,
    }
    Controller {
        ControllerAxisMotion => on_controller_axis_motion_event,
        ControllerButtonDown => on_controller_button_down_event,
        ControllerButtonUp => on_controller_button_up_event,
        ControllerDeviceAdded => on_controller_device_added_event,
        ControllerDeviceRemoved => on_controller_device_removed_event,
        ControllerDeviceRemapped => on_controller_device_remapped_event,
        ControllerTouchpadDown => on_controller_touchpad_down_event,
        ControllerTouchpadMotion => on_controller_touchpad_motion_event,
        ControllerTouchpadUp => on_controller_touchpad_up_event,
    }
    Touch {
        FingerDown => on_finger_down_event,
        FingerUp => on_finger_up_event,
        FingerMotion => on_finger_motion_event,
        MultiGesture => on_multi_gesture_event,
    }
    Drop {
        DropBegin => on_drop_begin_event,
        DropComplete => on_drop_complete_event,
        DropFile => on_drop_file_event,
        DropText => on_drop_text_event,
    }
    Midi {
        MidiIn => on_midi_in_event,
        MidiOut => on_midi_out_event,
    }
    Game {
        Active => on_active_event,
        Fps => on_fps_event,
        Game => on_game_event,
        MenuItem => on_menu_item_event,
        SysWm => on_sys_wm_event,
        User => on_user_event,
        VideoExpose => on_video_expose_event,
        VideoResize => on_video_resize_event,
        Quit => on_quit_event,
        RenderDeviceReset => on_render_device_reset_event,
        RenderTargetsReset => on_render_targets_reset_event,
        ClipboardUpdate => on_clipboard_update_event,
        LocaleChanged => on_locale_changed_event,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
