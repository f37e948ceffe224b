//=========================================================================
// Scene Context
//=========================================================================
//
// The view a scene gets of the engine while one of its hooks or handlers
// runs. Scenes never own or borrow the scene manager; they request
// transitions through this context and the manager applies them as soon
// as the hook returns.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{SceneKey, SceneTransition, TransitionQueue};
use crate::core::event::{codes, Event, EventPoster, Value};
use crate::core::input::{DeviceProxy, Devices, KeyboardState, MouseState};
use crate::core::surface::Surface;

//=== SceneContext ========================================================

/// Per-call access to transitions, device state and event posting.
pub struct SceneContext<'c, S: SceneKey> {
    transitions: &'c mut TransitionQueue<S>,
    devices: &'c Devices,
    poster: &'c EventPoster,
    screenshot: Option<&'c Surface>,
    active: Option<S>,
    previous: Option<S>,
    screen_size: (u32, u32),
}

impl<'c, S: SceneKey> SceneContext<'c, S> {
    pub(crate) fn new(
        transitions: &'c mut TransitionQueue<S>,
        devices: &'c Devices,
        poster: &'c EventPoster,
        screenshot: Option<&'c Surface>,
        active: Option<S>,
        previous: Option<S>,
        screen_size: (u32, u32),
    ) -> Self {
        Self {
            transitions,
            devices,
            poster,
            screenshot,
            active,
            previous,
            screen_size,
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Requests a switch to `scene` once the current hook returns.
    pub fn switch_to_scene(&mut self, scene: S) {
        self.transitions.push(SceneTransition::Switch(scene));
    }

    /// Requests the pause overlay.
    pub fn pause(&mut self) {
        self.transitions.push(SceneTransition::Pause);
    }

    /// Requests a return to the scene that was active before pausing.
    pub fn resume(&mut self) {
        self.transitions.push(SceneTransition::Resume);
    }

    /// Requests engine shutdown at the end of the current frame.
    pub fn quit(&mut self) {
        self.transitions.push(SceneTransition::Quit);
    }

    //--- Event Posting ----------------------------------------------------

    /// Posts an event for dispatch on the next frame.
    pub fn post(&self, event: Event) -> bool {
        self.poster.post(event)
    }

    /// Posts a QUIT event. The scene manager's quit hook consumes it on the
    /// next frame, so scene `on_quit_event` handlers never see it.
    pub fn quit_game(&self) -> bool {
        self.post(Event::new(codes::QUIT))
    }

    /// Posts a GAME event for the callback registered under `subtype`,
    /// carrying `fields` as its payload.
    pub fn post_game_event<I, K, V>(&self, subtype: &str, fields: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut event = Event::game(subtype);
        for (name, value) in fields {
            event.insert(name, value);
        }
        self.post(event)
    }

    //--- Scene State ------------------------------------------------------

    pub fn active(&self) -> Option<S> {
        self.active
    }

    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    /// What the previous scene rendered right before it was replaced.
    pub fn previous_screenshot(&self) -> Option<&Surface> {
        self.screenshot
    }

    pub fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    //--- Device State -----------------------------------------------------

    pub fn devices(&self) -> &Devices {
        self.devices
    }

    pub fn keyboard(&self) -> &KeyboardState {
        self.devices.keyboard()
    }

    pub fn mouse(&self) -> &MouseState {
        self.devices.mouse()
    }

    pub fn joystick(&self, instance_id: i32) -> Option<&DeviceProxy> {
        self.devices.joysticks().get(instance_id)
    }

    pub fn controller(&self, instance_id: i32) -> Option<&DeviceProxy> {
        self.devices.controllers().get(instance_id)
    }
}

//=== Test Fixture ========================================================

/// Owns everything a [`SceneContext`] borrows, for handler unit tests.
#[cfg(test)]
pub(crate) struct ContextFixture<S: SceneKey> {
    pub transitions: TransitionQueue<S>,
    pub devices: Devices,
    pub queue: crate::core::event::EventQueue,
    pub screenshot: Option<Surface>,
    pub active: Option<S>,
    pub previous: Option<S>,
    poster: EventPoster,
}

#[cfg(test)]
impl<S: SceneKey> ContextFixture<S> {
    pub fn new() -> Self {
        let queue = crate::core::event::EventQueue::new();
        let poster = queue.poster();
        Self {
            transitions: TransitionQueue::new(),
            devices: Devices::new(),
            queue,
            screenshot: None,
            active: None,
            previous: None,
            poster,
        }
    }

    pub fn context(&mut self) -> SceneContext<'_, S> {
        SceneContext::new(
            &mut self.transitions,
            &self.devices,
            &self.poster,
            self.screenshot.as_ref(),
            self.active,
            self.previous,
            (64, 48),
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        A,
        B,
    }

    impl SceneKey for TestScene {}

    #[test]
    fn transition_requests_are_queued_in_order() {
        let mut fixture = ContextFixture::<TestScene>::new();
        {
            let mut ctx = fixture.context();
            ctx.switch_to_scene(TestScene::B);
            ctx.pause();
            ctx.resume();
            ctx.quit();
        }

        let queued = fixture.transitions.take();
        assert_eq!(
            queued,
            vec![
                SceneTransition::Switch(TestScene::B),
                SceneTransition::Pause,
                SceneTransition::Resume,
                SceneTransition::Quit,
            ]
        );
    }

    #[test]
    fn quit_game_posts_quit_event() {
        let mut fixture = ContextFixture::<TestScene>::new();
        assert!(fixture.context().quit_game());

        let posted = fixture.queue.drain();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].code(), codes::QUIT);
    }

    #[test]
    fn exposes_scene_state() {
        let mut fixture = ContextFixture::<TestScene>::new();
        fixture.active = Some(TestScene::B);
        fixture.previous = Some(TestScene::A);
        fixture.screenshot = Some(Surface::new(2, 2));

        let ctx = fixture.context();
        assert_eq!(ctx.active(), Some(TestScene::B));
        assert_eq!(ctx.previous(), Some(TestScene::A));
        assert_eq!(ctx.previous_screenshot().map(Surface::size), Some((2, 2)));
        assert!(ctx.joystick(0).is_none());
    }
}
