//=========================================================================
// Proxima Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──────────> [frame loop]
//         │                          │  └─run_windowed()───> [winit loop]
//         ├─ with_options()          │
//         ├─ with_scene()            └─ run_frame():
//         ├─ with_initial_scene()       pump → dispatch → reconcile
//         ├─ with_pause_scene()         → update → render → present
//         └─ with_backend()             → next scene → FPS → quit?
// ```
//
// The frame loop is single-threaded. Scenes post events through the
// engine's queue; they are dispatched on the following frame, after the
// events pumped from the native layer.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use crate::core::dispatch::{DispatchTable, FallbackHandler, Router};
use crate::core::error::{ConfigError, EngineError, SceneResult};
use crate::core::event::{codes, Event, EventPoster, EventQueue};
use crate::core::frame::{FrameClock, FrameStatus};
use crate::core::input::Devices;
use crate::core::options::{EngineOptions, Resolution};
use crate::core::scene::{Scene, SceneContext, SceneKey, SceneManager};
use crate::platform::{self, NativeLayer, QueueBackend};

/// Deferred registration applied to the scene manager at build time.
type Registration<S> = Box<dyn FnOnce(&mut SceneManager<S>)>;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Options**: [`EngineOptions::default()`]
/// - **Backend**: a headless [`QueueBackend`]
/// - **Initial scene**: none (the screen stays black until a switch)
///
/// # Examples
///
/// ```no_run
/// use proxima_engine::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameScene { Main, Paused }
/// impl SceneKey for GameScene {}
///
/// struct MainScene;
/// impl EventHandlers<GameScene> for MainScene {}
/// impl Scene<GameScene> for MainScene {
///     fn update(&mut self, _ctx: &mut SceneContext<'_, GameScene>) -> SceneResult {
///         Ok(())
///     }
/// }
///
/// let engine = EngineBuilder::new()
///     .with_scene(GameScene::Main, MainScene)
///     .with_pause_scene(GameScene::Paused, PauseScene::new())
///     .with_initial_scene(GameScene::Main)
///     .build()?;
///
/// engine.run()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct EngineBuilder<S: SceneKey> {
    options: EngineOptions,
    registrations: Vec<Registration<S>>,
    registered: HashSet<S>,
    initial_scene: Option<S>,
    backend: Option<Box<dyn NativeLayer>>,
}

impl<S: SceneKey> EngineBuilder<S> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            options: EngineOptions::default(),
            registrations: Vec::new(),
            registered: HashSet::new(),
            initial_scene: None,
            backend: None,
        }
    }

    /// Replaces all options, e.g. with ones parsed from the command line.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.options.resolution = Resolution::new(width, height);
        self
    }

    /// Registers a scene under `key`.
    pub fn with_scene<T>(mut self, key: S, scene: T) -> Self
    where
        T: Scene<S> + 'static,
    {
        self.registered.insert(key);
        self.registrations
            .push(Box::new(move |scenes: &mut SceneManager<S>| scenes.register_scene(key, scene)));
        self
    }

    /// Registers the scene shown by `pause()`.
    pub fn with_pause_scene<T>(mut self, key: S, scene: T) -> Self
    where
        T: Scene<S> + 'static,
    {
        self.registered.insert(key);
        self.registrations
            .push(Box::new(move |scenes: &mut SceneManager<S>| scenes.register_pause_scene(key, scene)));
        self
    }

    /// Scene switched to at the start of the first frame.
    pub fn with_initial_scene(mut self, key: S) -> Self {
        self.initial_scene = Some(key);
        self
    }

    /// Native layer to run on. Defaults to a headless [`QueueBackend`].
    pub fn with_backend<B>(mut self, backend: B) -> Self
    where
        B: NativeLayer + 'static,
    {
        self.backend = Some(Box::new(backend));
        self
    }

    /// Registers a callback for GAME events with the given subtype.
    pub fn register_game_event<F>(mut self, subtype: impl Into<String>, callback: F) -> Self
    where
        F: FnMut(&Event, &mut SceneContext<'_, S>) -> SceneResult + 'static,
    {
        let subtype = subtype.into();
        self.registrations
            .push(Box::new(move |scenes: &mut SceneManager<S>| scenes.register_game_event(subtype, callback)));
        self
    }

    /// Validates the configuration and builds the engine.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if the options are invalid or the initial scene was
    /// never registered.
    pub fn build(self) -> Result<Engine<S>, ConfigError> {
        self.options.validate()?;
        if let Some(initial) = self.initial_scene {
            if !self.registered.contains(&initial) {
                return Err(ConfigError::UnknownScene(format!("{:?}", initial)));
            }
        }

        let options = self.options;
        let queue = EventQueue::new();
        let mut scenes = SceneManager::new(
            queue.poster(),
            (options.resolution.width, options.resolution.height),
            options.update_type,
        );
        for register in self.registrations {
            register(&mut scenes);
        }

        info!(
            "Building engine ({}, {} fps target, {} update, {} scenes)",
            options.resolution,
            options.target_fps,
            options.update_type,
            self.registered.len()
        );

        Ok(Engine {
            clock: FrameClock::new(options.target_fps, options.fps_refresh_rate_ms, Instant::now()),
            fallback: FallbackHandler::new(options.event_policy()),
            table: DispatchTable::new(),
            devices: Devices::new(),
            backend: self.backend.unwrap_or_else(|| Box::new(QueueBackend::new())),
            initial_scene: self.initial_scene,
            started: false,
            terminated: false,
            frames: 0,
            options,
            scenes,
            queue,
        })
    }
}

impl<S: SceneKey> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Proxima Engine runtime.
///
/// Owns the scene manager, the device registries, the dispatch table and
/// the native layer, and drives them one frame at a time.
///
/// # Frame
///
/// ```text
/// 1. pump native events, then events posted since the last frame
/// 2. dispatch each through the category table
/// 3. reconcile device registries against the native layer
/// 4. update + render the active scene, present the screen
/// 5. follow the active scene's next_scene()
/// 6. post an FPS event once per refresh interval
/// ```
pub struct Engine<S: SceneKey> {
    options: EngineOptions,
    scenes: SceneManager<S>,
    devices: Devices,
    fallback: FallbackHandler,
    table: DispatchTable<S>,
    backend: Box<dyn NativeLayer>,
    queue: EventQueue,
    clock: FrameClock,
    initial_scene: Option<S>,
    started: bool,
    terminated: bool,
    frames: u64,
}

impl<S: SceneKey> Engine<S> {
    //--- Accessors --------------------------------------------------------

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Handle for posting events into the next frame.
    pub fn poster(&self) -> EventPoster {
        self.queue.poster()
    }

    pub fn scenes(&self) -> &SceneManager<S> {
        &self.scenes
    }

    /// Mutable access for registering scenes after build.
    pub fn scenes_mut(&mut self) -> &mut SceneManager<S> {
        &mut self.scenes
    }

    pub fn devices(&self) -> &Devices {
        &self.devices
    }

    pub fn fallback(&self) -> &FallbackHandler {
        &self.fallback
    }

    /// Frames completed so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Target frame duration, `None` when uncapped.
    pub fn frame_period(&self) -> Option<Duration> {
        self.clock.period()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    //--- Scene Control ----------------------------------------------------

    pub fn switch_to_scene(&mut self, key: S) -> Result<(), EngineError> {
        self.scenes.switch_to_scene(key, &self.devices)
    }

    pub fn pause(&mut self) -> Result<(), EngineError> {
        self.scenes.pause(&self.devices)
    }

    pub fn resume(&mut self) -> Result<(), EngineError> {
        self.scenes.resume(&self.devices)
    }

    pub fn quit(&mut self) {
        self.scenes.quit();
    }

    /// Resizes the render target (window resize).
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("Render target resized to {}x{}", width, height);
        self.scenes.resize(width, height);
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one frame. Errors are returned as-is; see [`step`](Self::step)
    /// for the panic-safe variant the loops use.
    pub fn run_frame(&mut self) -> Result<FrameStatus, EngineError> {
        if self.terminated {
            return Ok(FrameStatus::Exit);
        }
        self.start()?;

        //--- Step 1: Gather events ----------------------------------------
        let mut events = self.backend.pump_events();
        events.extend(self.queue.drain());

        //--- Step 2: Dispatch ---------------------------------------------
        for event in &events {
            let mut router = Router::new(
                &mut self.devices,
                &*self.backend,
                &mut self.scenes,
                &mut self.fallback,
            );
            self.table.dispatch(&mut router, event)?;
        }

        //--- Step 3: Reconcile devices ------------------------------------
        self.devices.reconcile(&*self.backend);

        //--- Step 4: Update, render, present ------------------------------
        self.scenes.update(&self.devices)?;
        self.scenes.render()?;
        self.backend
            .present(self.scenes.screen(), self.scenes.update_type())?;
        self.frames += 1;

        //--- Step 5: Next scene -------------------------------------------
        self.scenes.follow_next_scene(&self.devices)?;

        //--- Step 6: FPS --------------------------------------------------
        if let Some(fps) = self.clock.tick(Instant::now()) {
            self.queue.poster().post(Event::new(codes::FPS_EVENT).with("fps", fps));
        }

        if self.scenes.quit_requested() {
            info!("Quit observed after frame {}", self.frames);
            return Ok(FrameStatus::Exit);
        }
        Ok(FrameStatus::Continue)
    }

    /// Runs one frame, turning a panic in scene code into
    /// [`EngineError::ScenePanic`]. Failures are logged with the scene
    /// that was active.
    pub fn step(&mut self) -> Result<FrameStatus, EngineError> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.run_frame()))
            .unwrap_or_else(|payload| {
                Err(EngineError::ScenePanic {
                    scene: self.scenes.scene_label(),
                    message: panic_message(&*payload),
                })
            });

        if let Err(e) = &result {
            error!("Frame failed in scene '{}': {}", self.scenes.scene_label(), e);
        }
        result
    }

    /// Runs the frame loop until quit or a fatal error, then tears down.
    ///
    /// # Lifecycle
    ///
    /// 1. Switches to the initial scene (first frame)
    /// 2. Runs frames, sleeping to hold the target FPS
    /// 3. On quit or error: terminates the active scene, shuts the
    ///    backend down, returns the frame error if there was one
    pub fn run(mut self) -> Result<(), EngineError> {
        info!("Starting frame loop ({} fps target)", self.options.target_fps);

        let outcome = loop {
            let frame_start = Instant::now();
            match self.step() {
                Ok(FrameStatus::Continue) => {}
                Ok(FrameStatus::Exit) => break Ok(()),
                Err(e) => break Err(e),
            }

            //--- Maintain pacing ------------------------------------------
            if let Some(pause) = self.clock.remaining(frame_start, Instant::now()) {
                thread::sleep(pause);
            }
        };

        let teardown = self.terminate();
        match (outcome, teardown) {
            (Err(e), Err(teardown)) => {
                error!("Teardown after a failed frame also failed: {}", teardown);
                Err(e)
            }
            (outcome, teardown) => outcome.and(teardown),
        }
    }

    /// Runs the engine in a native window.
    pub fn run_windowed(self) -> Result<(), EngineError> {
        platform::run_windowed(self)
    }

    /// Switches to "no scene" (cleaning up the active scene) and shuts the
    /// backend down. Only the first call has an effect.
    pub fn terminate(&mut self) -> Result<(), EngineError> {
        if self.terminated {
            return Ok(());
        }
        self.terminated = true;

        let result = self.scenes.terminate(&self.devices);
        self.backend.shutdown();
        info!("Engine shutdown complete after {} frames", self.frames);
        result
    }

    //--- Internal Helpers -------------------------------------------------

    fn start(&mut self) -> Result<(), EngineError> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        match self.initial_scene {
            Some(initial) => self.scenes.switch_to_scene(initial, &self.devices),
            None => Ok(()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::{EventHandlers, HandlerResult, Response};
    use crate::core::surface::Rgba;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
        Other,
    }

    impl SceneKey for TestScene {}

    struct Plain;

    impl EventHandlers<TestScene> for Plain {}

    impl Scene<TestScene> for Plain {
        fn update(&mut self, _ctx: &mut SceneContext<'_, TestScene>) -> SceneResult {
            Ok(())
        }
    }

    struct Panicky;

    impl EventHandlers<TestScene> for Panicky {
        fn on_key_down_event(&mut self, _event: &Event, _ctx: &mut SceneContext<'_, TestScene>) -> HandlerResult {
            Ok(Response::Handled)
        }
    }

    impl Scene<TestScene> for Panicky {
        fn update(&mut self, _ctx: &mut SceneContext<'_, TestScene>) -> SceneResult {
            panic!("update exploded");
        }
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::<TestScene>::new();
        assert_eq!(builder.options, EngineOptions::default());
        assert!(builder.initial_scene.is_none());
        assert!(builder.backend.is_none());
    }

    #[test]
    fn builder_with_resolution() {
        let engine = EngineBuilder::<TestScene>::new()
            .with_resolution(320, 200)
            .build()
            .unwrap();
        assert_eq!(engine.scenes().screen().size(), (320, 200));
    }

    #[test]
    fn build_rejects_unregistered_initial_scene() {
        let result = EngineBuilder::new()
            .with_scene(TestScene::Main, Plain)
            .with_initial_scene(TestScene::Other)
            .build();
        assert!(matches!(result, Err(ConfigError::UnknownScene(name)) if name == "Other"));
    }

    #[test]
    fn build_rejects_invalid_options() {
        let options = EngineOptions { fps_refresh_rate_ms: 0, ..Default::default() };
        let result = EngineBuilder::<TestScene>::new().with_options(options).build();
        assert_eq!(result.err(), Some(ConfigError::ZeroRefreshRate));
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn first_frame_activates_initial_scene() {
        let mut engine = EngineBuilder::new()
            .with_scene(TestScene::Main, Plain)
            .with_initial_scene(TestScene::Main)
            .build()
            .unwrap();

        assert_eq!(engine.scenes().active(), None);
        assert_eq!(engine.run_frame().unwrap(), FrameStatus::Continue);
        assert_eq!(engine.scenes().active(), Some(TestScene::Main));
        assert_eq!(engine.frame_count(), 1);
    }

    #[test]
    fn posted_quit_exits_on_next_frame() {
        let mut engine = EngineBuilder::new()
            .with_scene(TestScene::Main, Plain)
            .with_initial_scene(TestScene::Main)
            .build()
            .unwrap();

        engine.run_frame().unwrap();
        engine.poster().post(Event::new(codes::QUIT));
        assert_eq!(engine.run_frame().unwrap(), FrameStatus::Exit);
    }

    #[test]
    fn panic_in_scene_becomes_scene_panic_error() {
        let mut engine = EngineBuilder::new()
            .with_scene(TestScene::Main, Panicky)
            .with_initial_scene(TestScene::Main)
            .build()
            .unwrap();

        match engine.step() {
            Err(EngineError::ScenePanic { scene, message }) => {
                assert_eq!(scene, "Panicky");
                assert_eq!(message, "update exploded");
            }
            other => panic!("expected ScenePanic, got {:?}", other),
        }
    }

    #[test]
    fn terminate_cleans_up_once() {
        let mut engine = EngineBuilder::new()
            .with_scene(TestScene::Main, Plain)
            .with_initial_scene(TestScene::Main)
            .build()
            .unwrap();
        engine.run_frame().unwrap();

        engine.terminate().unwrap();
        assert!(engine.is_terminated());
        assert_eq!(engine.scenes().active(), None);
        assert_eq!(engine.scenes().previous(), Some(TestScene::Main));

        engine.terminate().unwrap();
        assert_eq!(engine.run_frame().unwrap(), FrameStatus::Exit);
    }

    #[test]
    fn empty_engine_renders_black() {
        let mut engine = EngineBuilder::<TestScene>::new()
            .with_resolution(4, 4)
            .build()
            .unwrap();
        engine.run_frame().unwrap();
        assert_eq!(engine.scenes().screen().pixel(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn panic_message_reads_both_payload_kinds() {
        let borrowed: Box<dyn Any + Send> = Box::new("static");
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let other: Box<dyn Any + Send> = Box::new(7_u8);

        assert_eq!(panic_message(&*borrowed), "static");
        assert_eq!(panic_message(&*owned), "owned");
        assert_eq!(panic_message(&*other), "unknown panic payload");
    }
}
