//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns the registered scenes and drives the active one.
//
// Scenes are stored in a HashMap by key and referenced by key, so a
// scene keeps its state between activations.
//
// State:
//   active         ─ the one scene receiving update/render/events
//   previous       ─ the scene `active` replaced on the last transition
//   resume_target  ─ the scene suspended behind the pause overlay
//   screenshot     ─ what `previous` rendered right before it was replaced
//
// Transitions requested through a SceneContext are applied as soon as the
// hook or handler that requested them returns, so a switch from inside an
// event handler is visible to the same frame's render.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::hooks::ManagerHooks;
use super::{Scene, SceneContext, SceneKey, SceneTransition, TransitionQueue};
use crate::core::dispatch::{HandlerId, ProxyChain, Response};
use crate::core::error::{EngineError, ScenePhase, SceneResult};
use crate::core::event::{Event, EventPoster};
use crate::core::input::Devices;
use crate::core::options::UpdateType;
use crate::core::surface::{Rgba, Surface};

/// Upper bound on transition batches applied after one hook. Scenes that
/// keep requesting transitions from their own setup would otherwise loop.
const MAX_TRANSITION_ROUNDS: usize = 32;

//=== Handoff =============================================================

/// Which lifecycle hooks run when the active scene changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handoff {
    /// Clean up the outgoing scene, set up the incoming one.
    Switch,

    /// Keep the outgoing scene alive behind the pause overlay.
    Suspend,

    /// Clean up the overlay and continue the suspended scene as it was.
    Resume,
}

impl Handoff {
    fn cleans_up_outgoing(self) -> bool {
        self != Handoff::Suspend
    }

    fn sets_up_incoming(self) -> bool {
        self != Handoff::Resume
    }
}

//=== SceneManager ========================================================

pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    hooks: ManagerHooks<S>,
    active: Option<S>,
    previous: Option<S>,
    resume_target: Option<S>,
    pause_scene: Option<S>,
    quit_requested: bool,
    update_type: UpdateType,
    screen: Surface,
    screenshot: Option<Surface>,
    transitions: TransitionQueue<S>,
    poster: EventPoster,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with no scenes. `poster` is handed to scenes for
    /// posting events; `screen_size` sizes the render target.
    pub fn new(poster: EventPoster, screen_size: (u32, u32), update_type: UpdateType) -> Self {
        Self {
            scenes: HashMap::new(),
            hooks: ManagerHooks::new(),
            active: None,
            previous: None,
            resume_target: None,
            pause_scene: None,
            quit_requested: false,
            update_type,
            screen: Surface::new(screen_size.0, screen_size.1),
            screenshot: None,
            transitions: TransitionQueue::new(),
            poster,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene under `key`, replacing any earlier one.
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!("Scene {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers the scene `pause()` switches to.
    pub fn register_pause_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        self.register_scene(key, scene);
        self.pause_scene = Some(key);
    }

    /// Registers `callback` for GAME events whose `subtype` field matches.
    pub fn register_game_event<F>(&mut self, subtype: impl Into<String>, callback: F)
    where
        F: FnMut(&Event, &mut SceneContext<'_, S>) -> SceneResult + 'static,
    {
        let subtype = subtype.into();
        if self.hooks.register_game_event(subtype.clone(), Box::new(callback)) {
            warn!("Game event callback for '{}' was replaced", subtype);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn active(&self) -> Option<S> {
        self.active
    }

    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    /// Scene that `resume()` returns to, while paused.
    pub fn resume_target(&self) -> Option<S> {
        self.resume_target
    }

    pub fn pause_scene(&self) -> Option<S> {
        self.pause_scene
    }

    pub fn is_paused(&self) -> bool {
        self.resume_target.is_some()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn update_type(&self) -> UpdateType {
        self.update_type
    }

    pub fn contains(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    pub fn scene(&self, key: S) -> Option<&dyn Scene<S>> {
        self.scenes.get(&key).map(|scene| &**scene)
    }

    /// The last rendered frame.
    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    /// Render of the previous scene captured right before it was replaced.
    pub fn screenshot(&self) -> Option<&Surface> {
        self.screenshot.as_ref()
    }

    /// Name for diagnostics: the active scene, else the previous one, else
    /// `"none"`.
    pub fn scene_label(&self) -> String {
        match self.active.or(self.previous) {
            Some(key) => self.label_of(key),
            None => "none".to_string(),
        }
    }

    fn label_of(&self, key: S) -> String {
        match self.scenes.get(&key) {
            Some(scene) => scene.name().to_string(),
            None => format!("{:?}", key),
        }
    }

    //--- Lifecycle Operations ---------------------------------------------

    /// Makes `target` the active scene: `previous` becomes the outgoing
    /// scene, then `target` is set up.
    ///
    /// While paused, switching to the suspended scene resumes it; switching
    /// anywhere else cleans the suspended scene up first.
    pub fn switch_to_scene(&mut self, target: S, devices: &Devices) -> Result<(), EngineError> {
        self.switch_inner(target, devices)?;
        self.apply_transitions(devices)
    }

    /// Suspends the active scene behind the pause scene.
    pub fn pause(&mut self, devices: &Devices) -> Result<(), EngineError> {
        self.pause_inner(devices)?;
        self.apply_transitions(devices)
    }

    /// Returns to the scene suspended by `pause()`.
    pub fn resume(&mut self, devices: &Devices) -> Result<(), EngineError> {
        self.resume_inner(devices)?;
        self.apply_transitions(devices)
    }

    /// Asks the frame loop to stop after the current frame.
    pub fn quit(&mut self) {
        if !self.quit_requested {
            info!("Quit requested (scene: {})", self.scene_label());
        }
        self.quit_requested = true;
    }

    fn switch_inner(&mut self, target: S, devices: &Devices) -> Result<(), EngineError> {
        if !self.scenes.contains_key(&target) {
            warn!("Cannot switch to unregistered scene {:?}", target);
            return Ok(());
        }
        if self.active == Some(target) {
            debug!("Scene {:?} is already active", target);
            return Ok(());
        }

        if let Some(suspended) = self.resume_target {
            if suspended == target {
                return self.resume_inner(devices);
            }
            self.resume_target = None;
            self.run_hook(suspended, devices, ScenePhase::Cleanup, |scene, ctx| scene.cleanup(ctx))?;
        }

        self.transition(target, devices, Handoff::Switch)
    }

    fn pause_inner(&mut self, devices: &Devices) -> Result<(), EngineError> {
        let Some(pause) = self.pause_scene else {
            warn!("pause() called but no pause scene is registered");
            return Ok(());
        };
        if self.is_paused() || self.active == Some(pause) {
            debug!("Already paused");
            return Ok(());
        }
        let Some(current) = self.active else {
            warn!("pause() called with no active scene");
            return Ok(());
        };

        self.transition(pause, devices, Handoff::Suspend)?;
        self.resume_target = Some(current);
        Ok(())
    }

    fn resume_inner(&mut self, devices: &Devices) -> Result<(), EngineError> {
        let Some(target) = self.resume_target.take() else {
            warn!("resume() called while not paused");
            return Ok(());
        };
        self.transition(target, devices, Handoff::Resume)
    }

    /// Replaces the active scene with `target`.
    fn transition(&mut self, target: S, devices: &Devices, handoff: Handoff) -> Result<(), EngineError> {
        if !self.scenes.contains_key(&target) || self.active == Some(target) {
            return Ok(());
        }

        let outgoing = self.active;
        if let Some(key) = outgoing {
            self.capture_screenshot(key)?;
            if handoff.cleans_up_outgoing() {
                self.run_hook(key, devices, ScenePhase::Cleanup, |scene, ctx| scene.cleanup(ctx))?;
            }
        }

        self.previous = outgoing;
        self.active = Some(target);
        info!(
            "Scene switched: {} -> {}",
            outgoing.map_or_else(|| "none".to_string(), |key| self.label_of(key)),
            self.label_of(target)
        );

        if handoff.sets_up_incoming() {
            self.run_hook(target, devices, ScenePhase::Setup, |scene, ctx| scene.setup(ctx))?;
        }
        Ok(())
    }

    /// Renders `key` into a fresh surface and keeps it as the screenshot.
    fn capture_screenshot(&mut self, key: S) -> Result<(), EngineError> {
        let Some(scene) = self.scenes.get_mut(&key) else {
            return Ok(());
        };
        let (width, height) = self.screen.size();
        let mut shot = Surface::filled(width, height, scene.background_color());
        scene.render(&mut shot).map_err(|source| EngineError::Scene {
            scene: scene.name().to_string(),
            phase: ScenePhase::Render,
            source,
        })?;
        self.screenshot = Some(shot);
        Ok(())
    }

    /// Applies transitions queued by hooks, including any queued while
    /// applying them.
    fn apply_transitions(&mut self, devices: &Devices) -> Result<(), EngineError> {
        for _ in 0..MAX_TRANSITION_ROUNDS {
            let batch = self.transitions.take();
            if batch.is_empty() {
                return Ok(());
            }
            for transition in batch {
                match transition {
                    SceneTransition::Switch(target) => self.switch_inner(target, devices)?,
                    SceneTransition::Pause => self.pause_inner(devices)?,
                    SceneTransition::Resume => self.resume_inner(devices)?,
                    SceneTransition::Quit => self.quit(),
                }
            }
        }

        warn!(
            "Scene transitions still pending after {} rounds; dropping {}",
            MAX_TRANSITION_ROUNDS,
            self.transitions.len()
        );
        self.transitions.clear();
        Ok(())
    }

    //--- Frame Operations -------------------------------------------------

    /// Routes handler `id` through the manager hooks, then the active scene.
    pub fn handle(&mut self, id: HandlerId, event: &Event, devices: &Devices) -> Result<Response, EngineError> {
        let result = {
            let Self {
                scenes,
                hooks,
                active,
                previous,
                screen,
                screenshot,
                transitions,
                poster,
                ..
            } = self;

            let mut ctx = SceneContext::new(
                transitions,
                devices,
                poster,
                screenshot.as_ref(),
                *active,
                *previous,
                screen.size(),
            );

            let mut chain = ProxyChain::<S>::new();
            chain.push(hooks);
            if let Some(key) = *active {
                if let Some(scene) = scenes.get_mut(&key) {
                    chain.push(scene);
                }
            }
            chain.call(id, event, &mut ctx)
        };

        let response = result.map_err(|source| EngineError::Scene {
            scene: self.scene_label(),
            phase: ScenePhase::Handler(id.name()),
            source,
        })?;
        self.apply_transitions(devices)?;
        Ok(response)
    }

    /// Runs the active scene's update.
    pub fn update(&mut self, devices: &Devices) -> Result<(), EngineError> {
        if let Some(key) = self.active {
            self.run_hook(key, devices, ScenePhase::Update, |scene, ctx| scene.update(ctx))?;
            self.apply_transitions(devices)?;
        }
        Ok(())
    }

    /// Clears the screen to the active scene's background and renders it.
    pub fn render(&mut self) -> Result<(), EngineError> {
        let Self { scenes, screen, active, .. } = self;
        let scene = match *active {
            Some(key) => scenes.get_mut(&key),
            None => None,
        };
        let Some(scene) = scene else {
            screen.fill(Rgba::BLACK);
            return Ok(());
        };

        screen.fill(scene.background_color());
        scene.render(screen).map_err(|source| EngineError::Scene {
            scene: scene.name().to_string(),
            phase: ScenePhase::Render,
            source,
        })
    }

    /// Switches to the active scene's `next_scene()` if it names another
    /// scene.
    pub fn follow_next_scene(&mut self, devices: &Devices) -> Result<(), EngineError> {
        let next = self
            .active
            .and_then(|key| self.scenes.get(&key))
            .and_then(|scene| scene.next_scene());

        match next {
            Some(next) if Some(next) != self.active => self.switch_to_scene(next, devices),
            _ => Ok(()),
        }
    }

    /// Resizes the render target. Takes effect on the next render.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.screen.size() != (width, height) {
            self.screen = Surface::new(width, height);
        }
    }

    /// Cleans up the suspended and active scenes. The active scene becomes
    /// `previous` so diagnostics can still name it. Pending transitions are
    /// dropped.
    pub fn terminate(&mut self, devices: &Devices) -> Result<(), EngineError> {
        self.transitions.clear();
        let mut result = Ok(());

        if let Some(suspended) = self.resume_target.take() {
            result = self.run_hook(suspended, devices, ScenePhase::Cleanup, |scene, ctx| scene.cleanup(ctx));
        }

        if let Some(key) = self.active {
            let cleaned = self.run_hook(key, devices, ScenePhase::Cleanup, |scene, ctx| scene.cleanup(ctx));
            if result.is_ok() {
                result = cleaned;
            }
            self.previous = Some(key);
            self.active = None;
            info!("Scene {} terminated", self.label_of(key));
        }

        self.transitions.clear();
        result
    }

    //--- Internal Helpers -------------------------------------------------

    /// Runs one lifecycle hook of scene `key` with a fresh context.
    /// Queued transitions are left for the caller to apply.
    fn run_hook<F>(&mut self, key: S, devices: &Devices, phase: ScenePhase, hook: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut dyn Scene<S>, &mut SceneContext<'_, S>) -> SceneResult,
    {
        let Self {
            scenes,
            active,
            previous,
            screen,
            screenshot,
            transitions,
            poster,
            ..
        } = self;

        let Some(scene) = scenes.get_mut(&key) else {
            return Ok(());
        };

        let mut ctx = SceneContext::new(
            transitions,
            devices,
            poster,
            screenshot.as_ref(),
            *active,
            *previous,
            screen.size(),
        );

        hook(&mut **scene, &mut ctx).map_err(|source| EngineError::Scene {
            scene: scene.name().to_string(),
            phase,
            source,
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::{EventHandlers, HandlerResult};
    use crate::core::event::{codes, EventQueue};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        A,
        B,
        C,
        Paused,
    }

    impl SceneKey for TestScene {}

    type Log = Rc<RefCell<Vec<String>>>;

    //--- Test Scene -------------------------------------------------------

    struct Recorder {
        name: &'static str,
        log: Log,
        color: Rgba,
        on_setup: Option<SceneTransition<TestScene>>,
        next: Option<TestScene>,
        fail_update: bool,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                color: Rgba::rgb(10, 20, 30),
                on_setup: None,
                next: None,
                fail_update: false,
            }
        }

        fn record(&self, what: &str) {
            self.log.borrow_mut().push(format!("{} {}", what, self.name));
        }
    }

    impl EventHandlers<TestScene> for Recorder {
        fn on_key_down_event(
            &mut self,
            _event: &Event,
            ctx: &mut SceneContext<'_, TestScene>,
        ) -> HandlerResult {
            self.record("key");
            ctx.switch_to_scene(TestScene::C);
            Ok(Response::Handled)
        }

        fn on_key_up_event(
            &mut self,
            _event: &Event,
            _ctx: &mut SceneContext<'_, TestScene>,
        ) -> HandlerResult {
            Err("key up exploded".into())
        }
    }

    impl Scene<TestScene> for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn background_color(&self) -> Rgba {
            self.color
        }

        fn setup(&mut self, ctx: &mut SceneContext<'_, TestScene>) -> SceneResult {
            self.record("setup");
            match self.on_setup.take() {
                Some(SceneTransition::Switch(key)) => ctx.switch_to_scene(key),
                Some(SceneTransition::Pause) => ctx.pause(),
                Some(SceneTransition::Resume) => ctx.resume(),
                Some(SceneTransition::Quit) => ctx.quit(),
                None => {}
            }
            Ok(())
        }

        fn cleanup(&mut self, _ctx: &mut SceneContext<'_, TestScene>) -> SceneResult {
            self.record("cleanup");
            Ok(())
        }

        fn update(&mut self, _ctx: &mut SceneContext<'_, TestScene>) -> SceneResult {
            if self.fail_update {
                return Err("update exploded".into());
            }
            self.record("update");
            Ok(())
        }

        fn render(&mut self, screen: &mut Surface) -> SceneResult {
            screen.fill_rect(0, 0, 2, 2, Rgba::WHITE);
            Ok(())
        }

        fn next_scene(&self) -> Option<TestScene> {
            self.next
        }
    }

    //--- Helpers ----------------------------------------------------------

    struct Fixture {
        manager: SceneManager<TestScene>,
        devices: Devices,
        log: Log,
        _queue: EventQueue,
    }

    fn fixture() -> Fixture {
        let queue = EventQueue::new();
        let log: Log = Rc::default();
        let mut manager = SceneManager::new(queue.poster(), (8, 6), UpdateType::Update);
        manager.register_scene(TestScene::A, Recorder::new("A", &log));
        manager.register_scene(TestScene::B, Recorder::new("B", &log));
        manager.register_scene(TestScene::C, Recorder::new("C", &log));
        manager.register_pause_scene(TestScene::Paused, Recorder::new("Paused", &log));
        Fixture {
            manager,
            devices: Devices::new(),
            log,
            _queue: queue,
        }
    }

    impl Fixture {
        fn take_log(&self) -> Vec<String> {
            std::mem::take(&mut *self.log.borrow_mut())
        }
    }

    //--- Switching --------------------------------------------------------

    #[test]
    fn switch_tracks_previous_scene() {
        let mut f = fixture();

        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        assert_eq!(f.manager.active(), Some(TestScene::A));
        assert_eq!(f.manager.previous(), None);

        f.manager.switch_to_scene(TestScene::B, &f.devices).unwrap();
        assert_eq!(f.manager.active(), Some(TestScene::B));
        assert_eq!(f.manager.previous(), Some(TestScene::A));

        f.manager.switch_to_scene(TestScene::C, &f.devices).unwrap();
        assert_eq!(f.manager.previous(), Some(TestScene::B));

        assert_eq!(
            f.take_log(),
            vec!["setup A", "cleanup A", "setup B", "cleanup B", "setup C"]
        );
    }

    #[test]
    fn switching_to_active_or_unregistered_scene_is_ignored() {
        let mut f = fixture();
        let mut manager = SceneManager::<TestScene>::new(EventQueue::new().poster(), (1, 1), UpdateType::Flip);
        manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        assert_eq!(manager.active(), None);

        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        assert_eq!(f.manager.previous(), None);
        assert_eq!(f.take_log(), vec!["setup A"]);
    }

    #[test]
    fn transition_requested_in_setup_applies_immediately() {
        let mut f = fixture();
        let mut a = Recorder::new("A", &f.log);
        a.on_setup = Some(SceneTransition::Switch(TestScene::B));
        f.manager.register_scene(TestScene::A, a);

        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();

        assert_eq!(f.manager.active(), Some(TestScene::B));
        assert_eq!(f.manager.previous(), Some(TestScene::A));
    }

    #[test]
    fn switch_captures_render_of_outgoing_scene() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        f.manager.switch_to_scene(TestScene::B, &f.devices).unwrap();

        let mut expected = Surface::filled(8, 6, Rgba::rgb(10, 20, 30));
        expected.fill_rect(0, 0, 2, 2, Rgba::WHITE);
        assert_eq!(f.manager.screenshot(), Some(&expected));
    }

    //--- Pause / Resume ---------------------------------------------------

    #[test]
    fn pause_then_resume_restores_scene_without_lifecycle_calls() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        f.take_log();

        f.manager.pause(&f.devices).unwrap();
        assert!(f.manager.is_paused());
        assert_eq!(f.manager.active(), Some(TestScene::Paused));
        assert_eq!(f.manager.previous(), Some(TestScene::A));

        f.manager.resume(&f.devices).unwrap();
        assert!(!f.manager.is_paused());
        assert_eq!(f.manager.active(), Some(TestScene::A));
        assert_eq!(f.take_log(), vec!["setup Paused", "cleanup Paused"]);
    }

    #[test]
    fn pause_twice_is_ignored() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        f.manager.pause(&f.devices).unwrap();
        f.manager.pause(&f.devices).unwrap();

        assert_eq!(f.manager.resume_target(), Some(TestScene::A));
        assert_eq!(f.manager.previous(), Some(TestScene::A));
    }

    #[test]
    fn pause_without_overlay_is_ignored() {
        let log: Log = Rc::default();
        let devices = Devices::new();
        let mut manager = SceneManager::new(EventQueue::new().poster(), (4, 4), UpdateType::Update);
        manager.register_scene(TestScene::A, Recorder::new("A", &log));
        manager.switch_to_scene(TestScene::A, &devices).unwrap();

        manager.pause(&devices).unwrap();
        assert_eq!(manager.active(), Some(TestScene::A));
        assert!(!manager.is_paused());
    }

    #[test]
    fn resume_while_not_paused_is_ignored() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        f.manager.resume(&f.devices).unwrap();
        assert_eq!(f.manager.active(), Some(TestScene::A));
    }

    #[test]
    fn switching_away_from_pause_cleans_up_suspended_scene() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        f.manager.pause(&f.devices).unwrap();
        f.take_log();

        f.manager.switch_to_scene(TestScene::B, &f.devices).unwrap();

        assert!(!f.manager.is_paused());
        assert_eq!(f.manager.active(), Some(TestScene::B));
        assert_eq!(f.take_log(), vec!["cleanup A", "cleanup Paused", "setup B"]);
    }

    #[test]
    fn switching_to_suspended_scene_resumes() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        f.manager.pause(&f.devices).unwrap();
        f.take_log();

        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();

        assert!(!f.manager.is_paused());
        assert_eq!(f.take_log(), vec!["cleanup Paused"]);
    }

    //--- Events -----------------------------------------------------------

    #[test]
    fn handler_transition_lands_before_render() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();

        let response = f
            .manager
            .handle(HandlerId::KeyDown, &Event::new(codes::KEY_DOWN), &f.devices)
            .unwrap();

        assert_eq!(response, Response::Handled);
        assert_eq!(f.manager.active(), Some(TestScene::C));
    }

    #[test]
    fn quit_event_is_handled_by_manager() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();

        let response = f
            .manager
            .handle(HandlerId::Quit, &Event::new(codes::QUIT), &f.devices)
            .unwrap();

        assert_eq!(response, Response::Handled);
        assert!(f.manager.quit_requested());
    }

    #[test]
    fn unimplemented_handler_is_unhandled() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();

        let response = f
            .manager
            .handle(HandlerId::WindowMoved, &Event::new(codes::WINDOW_MOVED), &f.devices)
            .unwrap();
        assert_eq!(response, Response::Unhandled);
    }

    #[test]
    fn handler_errors_name_scene_and_handler() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::B, &f.devices).unwrap();

        let err = f
            .manager
            .handle(HandlerId::KeyUp, &Event::new(codes::KEY_UP), &f.devices)
            .unwrap_err();

        match err {
            EngineError::Scene { scene, phase, .. } => {
                assert_eq!(scene, "B");
                assert_eq!(phase, ScenePhase::Handler("on_key_up_event"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    //--- Frame ------------------------------------------------------------

    #[test]
    fn render_clears_to_background_then_draws() {
        let mut f = fixture();
        f.manager.render().unwrap();
        assert_eq!(f.manager.screen().pixel(0, 0), Some(Rgba::BLACK));

        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        f.manager.render().unwrap();
        assert_eq!(f.manager.screen().pixel(0, 0), Some(Rgba::WHITE));
        assert_eq!(f.manager.screen().pixel(5, 5), Some(Rgba::rgb(10, 20, 30)));
    }

    #[test]
    fn update_errors_carry_phase() {
        let mut f = fixture();
        let mut a = Recorder::new("A", &f.log);
        a.fail_update = true;
        f.manager.register_scene(TestScene::A, a);
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();

        let err = f.manager.update(&f.devices).unwrap_err();
        assert_eq!(err.to_string(), "scene 'A' failed during update: update exploded");
    }

    #[test]
    fn next_scene_is_followed() {
        let mut f = fixture();
        let mut a = Recorder::new("A", &f.log);
        a.next = Some(TestScene::B);
        f.manager.register_scene(TestScene::A, a);
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();

        f.manager.follow_next_scene(&f.devices).unwrap();
        assert_eq!(f.manager.active(), Some(TestScene::B));
    }

    #[test]
    fn terminate_cleans_up_and_keeps_label() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        f.manager.pause(&f.devices).unwrap();
        f.take_log();

        f.manager.terminate(&f.devices).unwrap();

        assert_eq!(f.manager.active(), None);
        assert_eq!(f.manager.scene_label(), "Paused");
        assert_eq!(f.take_log(), vec!["cleanup A", "cleanup Paused"]);
    }

    #[test]
    fn label_defaults_to_none() {
        let f = fixture();
        assert_eq!(f.manager.scene_label(), "none");
    }

    #[test]
    fn game_event_callbacks_run_through_handle() {
        let mut f = fixture();
        f.manager.switch_to_scene(TestScene::A, &f.devices).unwrap();
        f.manager.register_game_event("advance", |_event, ctx| {
            ctx.switch_to_scene(TestScene::B);
            Ok(())
        });

        f.manager
            .handle(HandlerId::Game, &Event::game("advance"), &f.devices)
            .unwrap();
        assert_eq!(f.manager.active(), Some(TestScene::B));
    }
}
