//=========================================================================
// Pause Demo
//=========================================================================
//
// A bouncing block in a window, wired through the full event pipeline.
//
//   P       pause (Space resumes, Escape quits from the overlay)
//   G       game over (Space returns, Escape quits)
//   Escape  quit
//   Mouse   drag with the left button to move the block
//
// Run with:
//   cargo run --example pause_demo -- --windowed --debug-events
//
//=========================================================================

use clap::Parser;
use log::info;

use proxima_engine::prelude::*;

//=== Command Line ========================================================

#[derive(Parser)]
#[command(about = "Bouncing block with pause and game over overlays")]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,
}

//=== Scenes ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DemoScene {
    Play,
    Paused,
    GameOver,
}

impl SceneKey for DemoScene {}

const BLOCK: u32 = 32;
const BLOCK_COLOR: Rgba = Rgba::rgb(230, 180, 40);

struct PlayScene {
    pos: (i32, i32),
    velocity: (i32, i32),
    bounds: (u32, u32),
    bounces: u32,
}

impl PlayScene {
    fn new() -> Self {
        Self {
            pos: (0, 0),
            velocity: (3, 2),
            bounds: (0, 0),
            bounces: 0,
        }
    }

    fn clamp(&mut self) {
        let max_x = self.bounds.0.saturating_sub(BLOCK) as i32;
        let max_y = self.bounds.1.saturating_sub(BLOCK) as i32;
        self.pos = (self.pos.0.clamp(0, max_x), self.pos.1.clamp(0, max_y));
    }
}

impl EventHandlers<DemoScene> for PlayScene {
    fn on_key_down_event(&mut self, event: &Event, ctx: &mut SceneContext<'_, DemoScene>) -> HandlerResult {
        match event.key("key") {
            Some(KeyCode::KeyP) => ctx.pause(),
            Some(KeyCode::KeyG) => ctx.switch_to_scene(DemoScene::GameOver),
            Some(KeyCode::Escape) => ctx.quit(),
            _ => return Ok(Response::Unhandled),
        }
        Ok(Response::Handled)
    }

    fn on_left_mouse_drag_event(&mut self, event: &Event, _ctx: &mut SceneContext<'_, DemoScene>) -> HandlerResult {
        if let Some((dx, dy)) = event.pair("rel") {
            self.pos = (self.pos.0 + dx, self.pos.1 + dy);
            self.clamp();
        }
        Ok(Response::Handled)
    }

    fn on_joy_device_added_event(&mut self, event: &Event, ctx: &mut SceneContext<'_, DemoScene>) -> HandlerResult {
        let id = event.int("instance_id").unwrap_or(-1) as i32;
        if let Some(stick) = ctx.joystick(id) {
            info!("Joystick connected: {} ({} axes)", stick.name(), stick.axes().len());
        }
        Ok(Response::Handled)
    }

    fn on_fps_event(&mut self, event: &Event, _ctx: &mut SceneContext<'_, DemoScene>) -> HandlerResult {
        info!("{:.1} fps, {} bounces", event.float("fps").unwrap_or(0.0), self.bounces);
        Ok(Response::Handled)
    }

    fn on_game_event(&mut self, event: &Event, _ctx: &mut SceneContext<'_, DemoScene>) -> HandlerResult {
        info!("Game event: {}", event);
        Ok(Response::Handled)
    }
}

impl Scene<DemoScene> for PlayScene {
    fn background_color(&self) -> Rgba {
        Rgba::rgb(20, 30, 60)
    }

    fn setup(&mut self, ctx: &mut SceneContext<'_, DemoScene>) -> SceneResult {
        self.bounds = ctx.screen_size();
        self.clamp();
        info!("Play scene ready at {}x{}", self.bounds.0, self.bounds.1);
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_, DemoScene>) -> SceneResult {
        self.bounds = ctx.screen_size();
        let max_x = self.bounds.0.saturating_sub(BLOCK) as i32;
        let max_y = self.bounds.1.saturating_sub(BLOCK) as i32;

        let (mut x, mut y) = (self.pos.0 + self.velocity.0, self.pos.1 + self.velocity.1);
        let mut bounced = false;
        if x <= 0 || x >= max_x {
            self.velocity.0 = -self.velocity.0;
            x = x.clamp(0, max_x);
            bounced = true;
        }
        if y <= 0 || y >= max_y {
            self.velocity.1 = -self.velocity.1;
            y = y.clamp(0, max_y);
            bounced = true;
        }
        self.pos = (x, y);

        if bounced {
            self.bounces += 1;
            if self.bounces % 10 == 0 {
                ctx.post_game_event("milestone", [("bounces", self.bounces)]);
            }
        }
        Ok(())
    }

    fn render(&mut self, screen: &mut Surface) -> SceneResult {
        screen.fill_rect(self.pos.0.max(0) as u32, self.pos.1.max(0) as u32, BLOCK, BLOCK, BLOCK_COLOR);
        Ok(())
    }
}

//=== Main ================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    EngineBuilder::new()
        .with_options(cli.engine.into_options())
        .with_scene(DemoScene::Play, PlayScene::new())
        .with_pause_scene(DemoScene::Paused, PauseScene::new())
        .with_scene(DemoScene::GameOver, GameOverScene::new())
        .with_initial_scene(DemoScene::Play)
        .build()?
        .run_windowed()?;

    Ok(())
}
