//=========================================================================
// Window Runner
//=========================================================================
//
// Runs an engine inside a Winit event loop.
//
// Architecture:
// ```text
//  ┌─ Main Thread ───────────────────────────────────────────┐
//  │  WindowEvent ─► Translator ─► EventPoster ─► engine queue │
//  │                                                          │
//  │  RedrawRequested ─► Engine::step()                       │
//  │     Continue → schedule next redraw (target FPS)         │
//  │     Exit / Err → event_loop.exit()                       │
//  │                                                          │
//  │  loop exited ─► Engine::terminate()                      │
//  └──────────────────────────────────────────────────────────┘
// ```
//
// Translated events are queued and dispatched by the next frame, in the
// order Winit delivered them. The engine's native layer still supplies
// device tables and receives presented frames.
//
//=========================================================================

//=== External Crates =====================================================

use std::time::Instant;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use super::{PlatformError, Translator};
use crate::core::error::EngineError;
use crate::core::event::{codes, Event, EventPoster};
use crate::core::frame::FrameStatus;
use crate::core::scene::SceneKey;
use crate::engine::Engine;

//=== run_windowed ========================================================

/// Opens a window and runs `engine` until quit, close or a fatal error.
///
/// The engine is always terminated before returning. A frame error takes
/// precedence over a teardown error.
///
/// # Errors
///
/// [`PlatformError`] if the event loop or window cannot be created, or the
/// first fatal frame error.
///
/// # Panics
///
/// Winit panics if called off the main thread on macOS/iOS.
pub fn run_windowed<S: SceneKey>(engine: Engine<S>) -> Result<(), EngineError> {
    debug!(target: "platform", "Starting Winit event loop");

    let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
    let mut app = WindowApp::new(engine);

    let run = event_loop
        .run_app(&mut app)
        .map_err(PlatformError::EventLoopExecution);

    let outcome = app.finish();
    run?;
    outcome
}

//=== WindowApp ===========================================================

struct WindowApp<S: SceneKey> {
    engine: Engine<S>,
    poster: EventPoster,
    translator: Translator,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Earliest time the next frame may run.
    next_frame: Instant,

    /// First fatal error; ends the loop.
    error: Option<EngineError>,
}

impl<S: SceneKey> WindowApp<S> {
    fn new(engine: Engine<S>) -> Self {
        info!(target: "platform", "Window runner initialized");
        Self {
            poster: engine.poster(),
            translator: Translator::new(),
            window: None,
            next_frame: Instant::now(),
            error: None,
            engine,
        }
    }

    fn post_all(&self, events: Vec<Event>) {
        for event in events {
            self.poster.post(event);
        }
    }

    /// Runs one engine frame and schedules the next.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let frame_start = Instant::now();

        match self.engine.step() {
            Ok(FrameStatus::Continue) => {
                self.next_frame = match self.engine.frame_period() {
                    Some(period) => frame_start + period,
                    None => frame_start,
                };
            }
            Ok(FrameStatus::Exit) => {
                info!(target: "platform", "Engine quit, closing window");
                event_loop.exit();
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    /// Terminates the engine and returns the outcome of the run.
    fn finish(mut self) -> Result<(), EngineError> {
        let teardown = self.engine.terminate();
        self.window = None;
        match (self.error.take(), teardown) {
            (Some(e), Err(teardown)) => {
                error!(target: "platform", "Teardown after a failed frame also failed: {}", teardown);
                Err(e)
            }
            (Some(e), Ok(())) => Err(e),
            (None, teardown) => teardown,
        }
    }
}

//=== Winit Integration ===================================================

impl<S: SceneKey> ApplicationHandler for WindowApp<S> {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            self.poster.post(Event::new(codes::APP_DID_ENTER_FOREGROUND));
            window.request_redraw();
            return;
        }

        let options = self.engine.options();
        let mut attrs = WindowAttributes::default()
            .with_title("Proxima Engine")
            .with_inner_size(PhysicalSize::new(options.resolution.width, options.resolution.height));
        if !options.windowed {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.engine.resize(size.width, size.height);
                self.poster.post(Event::new(codes::WINDOW_SHOWN));
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.error = Some(PlatformError::Window(e.to_string()).into());
                event_loop.exit();
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.poster.post(Event::new(codes::APP_DID_ENTER_BACKGROUND));
    }

    fn memory_warning(&mut self, _event_loop: &ActiveEventLoop) {
        warn!(target: "platform", "Low memory warning");
        self.poster.post(Event::new(codes::APP_LOW_MEMORY));
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                return;
            }
            WindowEvent::Resized(size) => {
                self.engine.resize(size.width, size.height);
            }
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
            }
            _ => {}
        }

        let events = self.translator.translate(&event);
        self.post_all(events);
    }

    /// Requests the next redraw once the frame period has passed.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };

        if Instant::now() >= self.next_frame {
            window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Poll);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
        }
    }
}
