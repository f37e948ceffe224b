//=========================================================================
// Queue Backend
//=========================================================================
//
// Headless native layer. Events come from a channel instead of an OS
// event loop, and joysticks / controllers are simulated in a device table
// that behaves like a native one:
//
//   attach_*()  → slot appended, ADDED(device_index) posted
//   detach()    → device disconnected, REMOVED(instance_id) posted;
//                 the slot is compacted away one pump later, so an ADDED
//                 event pumped together with its REMOVED can still open it
//   unplug_silently() → slot dropped with no event (lost notification)
//
// Slots marked stale by a pump are also dropped by the next attach before
// it picks its slot, so the index in its ADDED event stays valid until
// that event is dispatched.
//
// Input helpers update the simulated device state as well as posting the
// event, so a device opened later sees what is currently held.
//
// A `QueueHandle` is cheap to clone and can be moved to other threads.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{DeviceInfo, NativeLayer, PlatformError};
use crate::core::event::{codes, Event, EventPoster, EventQueue};
use crate::core::input::{DeviceClass, CONTROLLER_AXES, CONTROLLER_BUTTONS};
use crate::core::options::UpdateType;
use crate::core::surface::Surface;

//=== Simulated Devices ===================================================

#[derive(Debug, Clone)]
struct SimDevice {
    info: DeviceInfo,
    connected: bool,
    stale: bool,
}

#[derive(Debug, Default)]
struct SimState {
    joysticks: Vec<SimDevice>,
    controllers: Vec<SimDevice>,
    next_instance_id: i32,
    frames_presented: u64,
    record_frames: bool,
    last_frame: Option<Surface>,
}

impl SimState {
    fn table(&self, class: DeviceClass) -> &Vec<SimDevice> {
        match class {
            DeviceClass::Joystick => &self.joysticks,
            DeviceClass::Controller => &self.controllers,
        }
    }

    fn table_mut(&mut self, class: DeviceClass) -> &mut Vec<SimDevice> {
        match class {
            DeviceClass::Joystick => &mut self.joysticks,
            DeviceClass::Controller => &mut self.controllers,
        }
    }

    fn device_mut(&mut self, class: DeviceClass, instance_id: i32) -> Option<&mut SimDevice> {
        self.table_mut(class)
            .iter_mut()
            .find(|device| device.info.instance_id == instance_id)
    }

    fn find(&self, instance_id: i32) -> Option<(DeviceClass, usize)> {
        [DeviceClass::Joystick, DeviceClass::Controller]
            .into_iter()
            .find_map(|class| {
                self.table(class)
                    .iter()
                    .position(|device| device.info.instance_id == instance_id)
                    .map(|index| (class, index))
            })
    }

    /// Drops slots of `class` that were already disconnected at the last
    /// pump.
    fn drop_stale(&mut self, class: DeviceClass) {
        self.table_mut(class).retain(|device| device.connected || !device.stale);
    }

    /// Drops slots disconnected before the previous pump, then marks the
    /// newly disconnected ones for the next.
    fn compact(&mut self) {
        for class in [DeviceClass::Joystick, DeviceClass::Controller] {
            self.drop_stale(class);
            for device in self.table_mut(class).iter_mut().filter(|device| !device.connected) {
                device.stale = true;
            }
        }
    }
}

/// Writes `value` into slot `index`, growing `values` with `fill`.
fn store<T: Clone>(values: &mut Vec<T>, index: usize, fill: T, value: T) {
    if index >= values.len() {
        values.resize(index + 1, fill);
    }
    values[index] = value;
}

fn lock(state: &Mutex<SimState>) -> MutexGuard<'_, SimState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn added_code(class: DeviceClass) -> u32 {
    match class {
        DeviceClass::Joystick => codes::JOY_DEVICE_ADDED,
        DeviceClass::Controller => codes::CONTROLLER_DEVICE_ADDED,
    }
}

fn removed_code(class: DeviceClass) -> u32 {
    match class {
        DeviceClass::Joystick => codes::JOY_DEVICE_REMOVED,
        DeviceClass::Controller => codes::CONTROLLER_DEVICE_REMOVED,
    }
}

//=== QueueBackend ========================================================

pub struct QueueBackend {
    queue: EventQueue,
    state: Arc<Mutex<SimState>>,
}

impl QueueBackend {
    pub fn new() -> Self {
        Self {
            queue: EventQueue::new(),
            state: Arc::new(Mutex::new(SimState::default())),
        }
    }

    /// Keeps a copy of every presented frame (see [`QueueHandle::last_frame`]).
    pub fn with_frame_recording(self) -> Self {
        lock(&self.state).record_frames = true;
        self
    }

    /// Handle for posting events and driving simulated devices.
    pub fn handle(&self) -> QueueHandle {
        QueueHandle {
            poster: self.queue.poster(),
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for QueueBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeLayer for QueueBackend {
    fn pump_events(&mut self) -> Vec<Event> {
        lock(&self.state).compact();
        let events = self.queue.drain();
        if !events.is_empty() {
            trace!(target: "platform::queue", "Pumped {} events", events.len());
        }
        events
    }

    fn device_count(&self, class: DeviceClass) -> usize {
        lock(&self.state).table(class).len()
    }

    fn open_device(&self, class: DeviceClass, index: usize) -> Option<DeviceInfo> {
        lock(&self.state).table(class).get(index).map(|device| device.info.clone())
    }

    fn device_name(&self, class: DeviceClass, instance_id: i32) -> Option<String> {
        lock(&self.state)
            .table(class)
            .iter()
            .find(|device| device.connected && device.info.instance_id == instance_id)
            .map(|device| device.info.name.clone())
    }

    fn device_index(&self, class: DeviceClass, instance_id: i32) -> Option<usize> {
        lock(&self.state)
            .table(class)
            .iter()
            .position(|device| device.info.instance_id == instance_id)
    }

    fn present(&mut self, frame: &Surface, _update_type: UpdateType) -> Result<(), PlatformError> {
        let mut state = lock(&self.state);
        state.frames_presented += 1;
        if state.record_frames {
            state.last_frame = Some(frame.clone());
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        let state = lock(&self.state);
        debug!(
            target: "platform::queue",
            "Queue backend shut down after {} frames",
            state.frames_presented
        );
    }
}

//=== QueueHandle =========================================================

#[derive(Clone)]
pub struct QueueHandle {
    poster: EventPoster,
    state: Arc<Mutex<SimState>>,
}

impl QueueHandle {
    /// Posts a raw event for the next pump.
    pub fn post(&self, event: Event) -> bool {
        self.poster.post(event)
    }

    //--- Hotplug ----------------------------------------------------------

    /// Plugs in a joystick and posts its ADDED event. Returns the instance id.
    pub fn attach_joystick(&self, name: &str, axes: usize, buttons: usize) -> i32 {
        self.attach(DeviceClass::Joystick, name, axes, buttons)
    }

    /// Plugs in a controller with the standard layout.
    pub fn attach_controller(&self, name: &str) -> i32 {
        self.attach(DeviceClass::Controller, name, CONTROLLER_AXES, CONTROLLER_BUTTONS)
    }

    fn attach(&self, class: DeviceClass, name: &str, axes: usize, buttons: usize) -> i32 {
        let (instance_id, index) = {
            let mut state = lock(&self.state);
            let instance_id = state.next_instance_id;
            state.next_instance_id += 1;
            state.drop_stale(class);

            let table = state.table_mut(class);
            table.push(SimDevice {
                info: DeviceInfo::neutral(instance_id, name, axes, buttons, 1),
                connected: true,
                stale: false,
            });
            (instance_id, table.len() - 1)
        };

        self.post(Event::new(added_code(class)).with("device_index", index));
        instance_id
    }

    /// Unplugs a device and posts its REMOVED event.
    pub fn detach(&self, instance_id: i32) -> bool {
        let class = {
            let mut state = lock(&self.state);
            let Some((class, index)) = state.find(instance_id) else {
                return false;
            };
            state.table_mut(class)[index].connected = false;
            class
        };

        self.post(Event::new(removed_code(class)).with("instance_id", instance_id))
    }

    /// Unplugs a device without telling anyone.
    pub fn unplug_silently(&self, instance_id: i32) -> bool {
        let mut state = lock(&self.state);
        let Some((class, index)) = state.find(instance_id) else {
            return false;
        };
        state.table_mut(class).remove(index);
        true
    }

    //--- Device Input -----------------------------------------------------

    pub fn move_axis(&self, class: DeviceClass, instance_id: i32, axis: usize, value: f64) -> bool {
        let code = match class {
            DeviceClass::Joystick => codes::JOY_AXIS_MOTION,
            DeviceClass::Controller => codes::CONTROLLER_AXIS_MOTION,
        };
        if let Some(device) = lock(&self.state).device_mut(class, instance_id) {
            store(&mut device.info.axes, axis, 0.0, value as f32);
        }
        self.post(
            Event::new(code)
                .with("instance_id", instance_id)
                .with("axis", axis)
                .with("value", value),
        )
    }

    pub fn press_button(&self, class: DeviceClass, instance_id: i32, button: usize) -> bool {
        let code = match class {
            DeviceClass::Joystick => codes::JOY_BUTTON_DOWN,
            DeviceClass::Controller => codes::CONTROLLER_BUTTON_DOWN,
        };
        self.hold(class, instance_id, button, true);
        self.post(Event::new(code).with("instance_id", instance_id).with("button", button))
    }

    pub fn release_button(&self, class: DeviceClass, instance_id: i32, button: usize) -> bool {
        let code = match class {
            DeviceClass::Joystick => codes::JOY_BUTTON_UP,
            DeviceClass::Controller => codes::CONTROLLER_BUTTON_UP,
        };
        self.hold(class, instance_id, button, false);
        self.post(Event::new(code).with("instance_id", instance_id).with("button", button))
    }

    fn hold(&self, class: DeviceClass, instance_id: i32, button: usize, down: bool) {
        if let Some(device) = lock(&self.state).device_mut(class, instance_id) {
            store(&mut device.info.buttons, button, false, down);
        }
    }

    pub fn move_hat(&self, instance_id: i32, hat: usize, value: (i32, i32)) -> bool {
        if let Some(device) = lock(&self.state).device_mut(DeviceClass::Joystick, instance_id) {
            store(&mut device.info.hats, hat, (0, 0), value);
        }
        self.post(
            Event::new(codes::JOY_HAT_MOTION)
                .with("instance_id", instance_id)
                .with("hat", hat)
                .with("value", value),
        )
    }

    //--- Display ----------------------------------------------------------

    pub fn frames_presented(&self) -> u64 {
        lock(&self.state).frames_presented
    }

    /// Last presented frame, when recording was enabled.
    pub fn last_frame(&self) -> Option<Surface> {
        lock(&self.state).last_frame.clone()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
