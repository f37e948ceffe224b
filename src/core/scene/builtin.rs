//=========================================================================
// Built-in Scenes
//=========================================================================
//
// Overlay scenes every game gets for free.
//
//   PauseScene     ─ dimmed screenshot of the paused scene with a label
//                    plate. Space resumes, Escape quits. Both act on key
//                    release after a press seen by this scene, so the key
//                    that opened the overlay does not immediately close it.
//   GameOverScene  ─ Space returns to the previous scene, Escape quits.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneContext, SceneKey};
use crate::core::dispatch::{EventHandlers, HandlerResult, Response};
use crate::core::error::SceneResult;
use crate::core::event::Event;
use crate::core::input::KeyCode;
use crate::core::surface::{Rgba, Surface};

/// Overlay blended over the paused scene's screenshot (50% black).
pub const PAUSE_DIM: Rgba = Rgba::new(0, 0, 0, 128);

const PLATE_COLOR: Rgba = Rgba::rgb(40, 40, 40);
const PLATE_HEIGHT: u32 = 24;
const GLYPH_WIDTH: u32 = 8;

/// Draws a centered plate sized for `label`.
fn draw_plate(surface: &mut Surface, label: &str, color: Rgba) {
    let (width, height) = surface.size();
    let text_width = u32::try_from(label.chars().count()).unwrap_or(u32::MAX);
    let plate_width = text_width.saturating_mul(GLYPH_WIDTH).saturating_add(16).min(width);
    let plate_height = PLATE_HEIGHT.min(height);
    surface.fill_rect(
        (width - plate_width) / 2,
        (height - plate_height) / 2,
        plate_width,
        plate_height,
        color,
    );
}

//=== PauseScene ==========================================================

pub struct PauseScene {
    label: String,
    backdrop: Option<Surface>,
    armed: Option<KeyCode>,
}

impl PauseScene {
    pub fn new() -> Self {
        Self::with_label("PAUSED")
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            backdrop: None,
            armed: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The composited overlay, while the scene is active.
    pub fn backdrop(&self) -> Option<&Surface> {
        self.backdrop.as_ref()
    }
}

impl Default for PauseScene {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SceneKey> EventHandlers<S> for PauseScene {
    fn on_key_down_event(&mut self, event: &Event, _ctx: &mut SceneContext<'_, S>) -> HandlerResult {
        match event.key("key") {
            Some(key @ (KeyCode::Space | KeyCode::Escape)) => {
                self.armed = Some(key);
                Ok(Response::Handled)
            }
            _ => Ok(Response::Unhandled),
        }
    }

    fn on_key_up_event(&mut self, event: &Event, ctx: &mut SceneContext<'_, S>) -> HandlerResult {
        let key = event.key("key");
        if key.is_none() || key != self.armed {
            return Ok(Response::Unhandled);
        }
        self.armed = None;

        match key {
            Some(KeyCode::Space) => ctx.resume(),
            Some(KeyCode::Escape) => {
                ctx.quit_game();
            }
            _ => {}
        }
        Ok(Response::Handled)
    }
}

impl<S: SceneKey> Scene<S> for PauseScene {
    fn setup(&mut self, ctx: &mut SceneContext<'_, S>) -> SceneResult {
        let mut backdrop = match ctx.previous_screenshot() {
            Some(shot) => shot.clone(),
            None => {
                warn!("No screenshot of the paused scene; pausing over black");
                let (width, height) = ctx.screen_size();
                Surface::new(width, height)
            }
        };

        backdrop.blend(PAUSE_DIM);
        draw_plate(&mut backdrop, &self.label, PLATE_COLOR);
        self.backdrop = Some(backdrop);
        self.armed = None;

        info!("{}", self.label);
        Ok(())
    }

    fn cleanup(&mut self, _ctx: &mut SceneContext<'_, S>) -> SceneResult {
        self.backdrop = None;
        self.armed = None;
        Ok(())
    }

    fn update(&mut self, _ctx: &mut SceneContext<'_, S>) -> SceneResult {
        Ok(())
    }

    fn render(&mut self, screen: &mut Surface) -> SceneResult {
        if let Some(backdrop) = &self.backdrop {
            screen.blit(backdrop);
        }
        Ok(())
    }
}

//=== GameOverScene =======================================================

pub struct GameOverScene {
    label: String,
}

impl GameOverScene {
    pub fn new() -> Self {
        Self {
            label: "GAME OVER".to_string(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for GameOverScene {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SceneKey> EventHandlers<S> for GameOverScene {
    fn on_key_down_event(&mut self, event: &Event, ctx: &mut SceneContext<'_, S>) -> HandlerResult {
        match event.key("key") {
            Some(KeyCode::Space) => {
                match ctx.previous() {
                    Some(previous) => ctx.switch_to_scene(previous),
                    None => warn!("Game over with no previous scene to return to"),
                }
                Ok(Response::Handled)
            }
            Some(KeyCode::Escape) => {
                ctx.quit_game();
                Ok(Response::Handled)
            }
            _ => Ok(Response::Unhandled),
        }
    }
}

impl<S: SceneKey> Scene<S> for GameOverScene {
    fn background_color(&self) -> Rgba {
        Rgba::rgb(64, 0, 0)
    }

    fn update(&mut self, _ctx: &mut SceneContext<'_, S>) -> SceneResult {
        Ok(())
    }

    fn render(&mut self, screen: &mut Surface) -> SceneResult {
        draw_plate(screen, &self.label, PLATE_COLOR);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
