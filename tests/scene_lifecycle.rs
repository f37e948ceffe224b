//=========================================================================
// Scene Lifecycle Tests
//=========================================================================
//
// Switch, pause, resume and quit through a running engine, checking the
// hooks each scene sees and the frames the backend receives.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;

use proxima_engine::core::scene::PAUSE_DIM;
use proxima_engine::prelude::*;

//=== Fixtures ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TestScene {
    Game,
    Paused,
    Over,
    Missing,
}

impl SceneKey for TestScene {}

type Log = Rc<RefCell<Vec<String>>>;

const GAME_BLUE: Rgba = Rgba::rgb(0, 0, 255);

/// Logs its lifecycle; `P` pauses, `G` ends the game.
struct Recorder {
    name: &'static str,
    log: Log,
    quit_after: Option<u32>,
    updates: u32,
}

impl Recorder {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            quit_after: None,
            updates: 0,
        }
    }

    fn note(&self, what: &str) {
        self.log.borrow_mut().push(format!("{} {}", self.name, what));
    }
}

impl EventHandlers<TestScene> for Recorder {
    fn on_key_down_event(&mut self, event: &Event, ctx: &mut SceneContext<'_, TestScene>) -> HandlerResult {
        match event.key("key") {
            Some(KeyCode::KeyP) => ctx.pause(),
            Some(KeyCode::KeyG) => ctx.switch_to_scene(TestScene::Over),
            _ => return Ok(Response::Unhandled),
        }
        Ok(Response::Handled)
    }
}

impl Scene<TestScene> for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn background_color(&self) -> Rgba {
        GAME_BLUE
    }

    fn setup(&mut self, _ctx: &mut SceneContext<'_, TestScene>) -> SceneResult {
        self.note("setup");
        Ok(())
    }

    fn cleanup(&mut self, _ctx: &mut SceneContext<'_, TestScene>) -> SceneResult {
        self.note("cleanup");
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_, TestScene>) -> SceneResult {
        self.updates += 1;
        if Some(self.updates) == self.quit_after {
            ctx.quit();
        }
        Ok(())
    }
}

fn key(code: u32, key: KeyCode) -> Event {
    Event::new(code).with("key", key)
}

fn tap(handle: &QueueHandle, key_code: KeyCode) {
    handle.post(key(codes::KEY_DOWN, key_code));
    handle.post(key(codes::KEY_UP, key_code));
}

fn engine(log: &Log) -> (Engine<TestScene>, QueueHandle) {
    let backend = QueueBackend::new().with_frame_recording();
    let handle = backend.handle();
    let engine = EngineBuilder::new()
        .with_options(EngineOptions { target_fps: 0.0, ..Default::default() })
        .with_resolution(64, 48)
        .with_backend(backend)
        .with_scene(TestScene::Game, Recorder::new("game", log))
        .with_pause_scene(TestScene::Paused, PauseScene::new())
        .with_scene(TestScene::Over, GameOverScene::new())
        .with_initial_scene(TestScene::Game)
        .build()
        .unwrap();
    (engine, handle)
}

//=========================================================================
// Tests
//=========================================================================

#[test]
fn pause_overlay_shows_dimmed_screenshot() {
    let log: Log = Rc::default();
    let (mut engine, handle) = engine(&log);
    engine.run_frame().unwrap();

    tap(&handle, KeyCode::KeyP);
    engine.run_frame().unwrap();

    assert_eq!(engine.scenes().active(), Some(TestScene::Paused));
    assert_eq!(engine.scenes().resume_target(), Some(TestScene::Game));
    assert!(engine.scenes().is_paused());

    let frame = handle.last_frame().unwrap();
    assert_eq!(frame.pixel(0, 0), Some(PAUSE_DIM.over(GAME_BLUE)));
    assert_eq!(
        engine.scenes().screenshot().and_then(|shot| shot.pixel(0, 0)),
        Some(GAME_BLUE)
    );
}

#[test]
fn resume_continues_without_setup_or_cleanup() {
    let log: Log = Rc::default();
    let (mut engine, handle) = engine(&log);
    engine.run_frame().unwrap();

    tap(&handle, KeyCode::KeyP);
    engine.run_frame().unwrap();
    tap(&handle, KeyCode::Space);
    engine.run_frame().unwrap();

    assert_eq!(engine.scenes().active(), Some(TestScene::Game));
    assert!(!engine.scenes().is_paused());
    assert_eq!(*log.borrow(), vec!["game setup".to_string()]);
}

#[test]
fn escape_in_pause_quits_and_terminate_cleans_up_both() {
    let log: Log = Rc::default();
    let (mut engine, handle) = engine(&log);
    engine.run_frame().unwrap();

    tap(&handle, KeyCode::KeyP);
    engine.run_frame().unwrap();
    tap(&handle, KeyCode::Escape);
    assert_eq!(engine.run_frame().unwrap(), FrameStatus::Continue);

    // QUIT posted by the overlay is dispatched on the following frame.
    assert_eq!(engine.run_frame().unwrap(), FrameStatus::Exit);
    assert!(engine.scenes().quit_requested());

    engine.terminate().unwrap();
    assert_eq!(engine.scenes().active(), None);
    assert!(!engine.scenes().is_paused());
    assert_eq!(*log.borrow(), vec!["game setup".to_string(), "game cleanup".to_string()]);
}

#[test]
fn game_over_returns_to_previous_scene() {
    let log: Log = Rc::default();
    let (mut engine, handle) = engine(&log);
    engine.run_frame().unwrap();

    tap(&handle, KeyCode::KeyG);
    engine.run_frame().unwrap();
    assert_eq!(engine.scenes().active(), Some(TestScene::Over));
    assert_eq!(engine.scenes().previous(), Some(TestScene::Game));

    tap(&handle, KeyCode::Space);
    engine.run_frame().unwrap();

    assert_eq!(engine.scenes().active(), Some(TestScene::Game));
    assert_eq!(engine.scenes().previous(), Some(TestScene::Over));
    assert_eq!(
        *log.borrow(),
        vec!["game setup".to_string(), "game cleanup".to_string(), "game setup".to_string()]
    );
}

#[test]
fn switching_to_unregistered_scene_is_ignored() {
    let log: Log = Rc::default();
    let (mut engine, _handle) = engine(&log);
    engine.run_frame().unwrap();

    engine.switch_to_scene(TestScene::Missing).unwrap();

    assert_eq!(engine.scenes().active(), Some(TestScene::Game));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn pause_without_overlay_is_ignored() {
    let log: Log = Rc::default();
    let mut engine = EngineBuilder::new()
        .with_scene(TestScene::Game, Recorder::new("game", &log))
        .with_initial_scene(TestScene::Game)
        .build()
        .unwrap();
    engine.run_frame().unwrap();

    engine.pause().unwrap();

    assert_eq!(engine.scenes().active(), Some(TestScene::Game));
    assert!(!engine.scenes().is_paused());
}

#[test]
fn run_loop_stops_after_scene_quits() {
    let log: Log = Rc::default();
    let mut scene = Recorder::new("game", &log);
    scene.quit_after = Some(3);

    let backend = QueueBackend::new();
    let handle = backend.handle();
    let engine = EngineBuilder::new()
        .with_options(EngineOptions { target_fps: 0.0, ..Default::default() })
        .with_backend(backend)
        .with_scene(TestScene::Game, scene)
        .with_initial_scene(TestScene::Game)
        .build()
        .unwrap();

    engine.run().unwrap();

    assert_eq!(handle.frames_presented(), 3);
    assert_eq!(*log.borrow(), vec!["game setup".to_string(), "game cleanup".to_string()]);
}
