//=========================================================================
// Scene Manager Hooks
//=========================================================================
//
// The scene manager's own handlers. They sit first in the proxy chain,
// ahead of the active scene:
//
//   on_quit_event  → request shutdown (Handled)
//   on_game_event  → run the callback registered for the event's
//                    `subtype` (Handled), else fall through to the scene
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{SceneContext, SceneKey};
use crate::core::dispatch::{EventHandlers, HandlerResult, Response};
use crate::core::error::SceneResult;
use crate::core::event::Event;

//=== GameEventCallback ===================================================

/// Callback run for GAME events of one subtype.
pub type GameEventCallback<S> = Box<dyn FnMut(&Event, &mut SceneContext<'_, S>) -> SceneResult>;

//=== ManagerHooks ========================================================

pub(crate) struct ManagerHooks<S: SceneKey> {
    game_callbacks: HashMap<String, GameEventCallback<S>>,
}

impl<S: SceneKey> ManagerHooks<S> {
    pub(crate) fn new() -> Self {
        Self {
            game_callbacks: HashMap::new(),
        }
    }

    /// Registers `callback` for GAME events whose `subtype` matches.
    /// Returns true if an earlier callback was replaced.
    pub(crate) fn register_game_event(&mut self, subtype: String, callback: GameEventCallback<S>) -> bool {
        self.game_callbacks.insert(subtype, callback).is_some()
    }
}

impl<S: SceneKey> EventHandlers<S> for ManagerHooks<S> {
    fn on_quit_event(&mut self, _event: &Event, ctx: &mut SceneContext<'_, S>) -> HandlerResult {
        info!("Quit event received");
        ctx.quit();
        Ok(Response::Handled)
    }

    fn on_game_event(&mut self, event: &Event, ctx: &mut SceneContext<'_, S>) -> HandlerResult {
        let Some(subtype) = event.text("subtype") else {
            return Ok(Response::Unhandled);
        };

        match self.game_callbacks.get_mut(subtype) {
            Some(callback) => {
                callback(event, ctx)?;
                Ok(Response::Handled)
            }
            None => {
                debug!("No game event callback registered for '{}'", subtype);
                Ok(Response::Unhandled)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
