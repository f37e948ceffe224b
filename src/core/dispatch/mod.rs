//=========================================================================
// Event Dispatch
//=========================================================================
//
// Raw event → category → handler → proxy chain → fallback.
//
// Architecture:
//   DispatchTable::dispatch(event)
//     └─ category dispatcher (keyboard, mouse, joystick, window, ...)
//          ├─ updates device state
//          └─ Router::forward(handler id)
//               ├─ SceneManager::handle  → ProxyChain [hooks, active scene]
//               └─ Unhandled → FallbackHandler::unhandled (policy)
//
//   no dispatcher / no branch → FallbackHandler::unimplemented
//
//=========================================================================

//=== Module Declarations =================================================

mod categories;
mod fallback;
mod handlers;
mod proxy;
mod table;

//=== Public API ==========================================================

pub use fallback::{FallbackHandler, UnhandledEventPolicy};
pub use handlers::{invoke, EventHandlers, HandlerId, HandlerResult, Response};
pub use proxy::ProxyChain;
pub use table::{dispatcher_for, DispatchEntry, DispatchTable, Dispatcher};

//=== Internal Dependencies ===============================================

use crate::core::error::EngineError;
use crate::core::event::Event;
use crate::core::input::Devices;
use crate::core::scene::{SceneKey, SceneManager};
use crate::platform::NativeLayer;

//=== Router ==============================================================

/// Everything a category dispatcher touches while routing one event.
pub struct Router<'r, S: SceneKey> {
    pub(crate) devices: &'r mut Devices,
    pub(crate) native: &'r dyn NativeLayer,
    pub(crate) scenes: &'r mut SceneManager<S>,
    pub(crate) fallback: &'r mut FallbackHandler,
}

impl<'r, S: SceneKey> Router<'r, S> {
    pub fn new(
        devices: &'r mut Devices,
        native: &'r dyn NativeLayer,
        scenes: &'r mut SceneManager<S>,
        fallback: &'r mut FallbackHandler,
    ) -> Self {
        Self {
            devices,
            native,
            scenes,
            fallback,
        }
    }

    /// Calls handler `id` through the proxy chain, falling back to the
    /// unhandled-event policy when no proxy handles it.
    ///
    /// Always reports the event as routed; strict mode surfaces as `Err`.
    pub fn forward(&mut self, id: HandlerId, event: &Event) -> Result<bool, EngineError> {
        if self.scenes.handle(id, event, self.devices)? == Response::Unhandled {
            self.fallback.unhandled(id, event)?;
        }
        Ok(true)
    }
}
