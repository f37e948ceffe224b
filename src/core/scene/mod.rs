//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle, transitions and the built-in overlay scenes.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene<S>>>
//     ├─ active / previous / resume target
//     └─ transitions: TransitionQueue<S>  ◄── SceneContext (from hooks)
//
// Lifecycle:
//   created ──switch──► active ──pause──► paused ──resume──► active
//                          └──────── terminate ──────► terminated
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::dispatch::EventHandlers;
use crate::core::error::SceneResult;
use crate::core::surface::{Rgba, Surface};

//=== Module Declarations =================================================

mod builtin;
mod context;
mod hooks;
mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use builtin::{GameOverScene, PauseScene, PAUSE_DIM};
pub use context::SceneContext;
pub use hooks::GameEventCallback;
pub use scene_manager::SceneManager;
pub use transition_queue::{SceneTransition, TransitionQueue};

#[cfg(test)]
pub(crate) use context::ContextFixture;

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Scene keys uniquely identify scenes in the SceneManager's HashMap.
/// Typically implemented by game-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== Scene Trait =========================================================

/// A screen of the game: lifecycle hooks, per-frame update and render,
/// plus the event handlers inherited from [`EventHandlers`].
///
/// Only `update()` is required. Handlers the scene does not override
/// fall through to the fallback handler.
///
/// ```rust
/// # use proxima_engine::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { Main }
/// # impl SceneKey for GameScene {}
/// struct MainScene;
///
/// impl EventHandlers<GameScene> for MainScene {}
///
/// impl Scene<GameScene> for MainScene {
///     fn update(&mut self, _ctx: &mut SceneContext<'_, GameScene>) -> SceneResult {
///         Ok(())
///     }
/// }
/// ```
pub trait Scene<S: SceneKey>: EventHandlers<S> {
    /// Name used in logs and error reports.
    ///
    /// Defaults to the unqualified type name.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Color the screen is cleared to before [`render`](Self::render).
    fn background_color(&self) -> Rgba {
        Rgba::BLACK
    }

    /// Called when the scene becomes active.
    fn setup(&mut self, _ctx: &mut SceneContext<'_, S>) -> SceneResult {
        Ok(())
    }

    /// Called when the scene stops being active (not when it is only
    /// suspended behind the pause overlay).
    fn cleanup(&mut self, _ctx: &mut SceneContext<'_, S>) -> SceneResult {
        Ok(())
    }

    /// Called once per frame while active.
    fn update(&mut self, ctx: &mut SceneContext<'_, S>) -> SceneResult;

    /// Draws the scene onto the cleared screen.
    fn render(&mut self, _screen: &mut Surface) -> SceneResult {
        Ok(())
    }

    /// Scene to switch to after this frame's render; `None` stays.
    fn next_scene(&self) -> Option<S> {
        None
    }
}
