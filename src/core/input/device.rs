//=========================================================================
// Device Registry
//=========================================================================
//
// Hotplug registry for joysticks and game controllers.
//
// Architecture:
//   ADDED(device_index) ──open──► DeviceProxy ──insert──► registry[instance_id]
//   AXIS/BUTTON/HAT(instance_id) ──resolve──► mutate proxy ──► forward
//   REMOVED(instance_id) ──forward──► remove
//
// The instance id is the only long-lived key. The slot index a device was
// opened at is refreshed by reconciliation and used only to resolve older
// event shapes that carry a `joy` slot instead of an instance id.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::dispatch::{HandlerId, Router};
use crate::core::error::EngineError;
use crate::core::event::Event;
use crate::core::scene::SceneKey;
use crate::platform::{DeviceInfo, NativeLayer};

//=== DeviceClass =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Joystick,
    Controller,
}

impl DeviceClass {
    pub fn name(self) -> &'static str {
        match self {
            Self::Joystick => "joystick",
            Self::Controller => "controller",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=== DeviceProxy =========================================================

/// Last known state of one attached device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProxy {
    class: DeviceClass,
    device_index: usize,
    instance_id: i32,
    name: String,
    axes: Vec<f32>,
    buttons: Vec<bool>,
    hats: Vec<(i32, i32)>,
    balls: Vec<(i32, i32)>,
}

impl DeviceProxy {
    /// Snapshots a freshly opened device, seeded with the state the native
    /// layer read at open. Controllers always expose the standard layout
    /// regardless of what the native layer reports.
    pub fn open(class: DeviceClass, device_index: usize, info: DeviceInfo) -> Self {
        let DeviceInfo {
            instance_id,
            name,
            mut axes,
            mut buttons,
            hats,
            balls,
        } = info;

        if class == DeviceClass::Controller {
            axes.resize(super::controller::CONTROLLER_AXES, 0.0);
            buttons.resize(super::controller::CONTROLLER_BUTTONS, false);
        }

        Self {
            class,
            device_index,
            instance_id,
            name,
            axes,
            buttons,
            hats,
            balls: vec![(0, 0); balls],
        }
    }

    //--- Identity ---------------------------------------------------------

    pub fn class(&self) -> DeviceClass {
        self.class
    }

    pub fn instance_id(&self) -> i32 {
        self.instance_id
    }

    /// Slot index as of the last reconciliation. Not a stable key.
    pub fn device_index(&self) -> usize {
        self.device_index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    //--- State Queries ----------------------------------------------------

    pub fn axis(&self, axis: usize) -> Option<f32> {
        self.axes.get(axis).copied()
    }

    pub fn axes(&self) -> &[f32] {
        &self.axes
    }

    pub fn is_button_down(&self, button: usize) -> bool {
        self.buttons.get(button).copied().unwrap_or(false)
    }

    pub fn buttons(&self) -> &[bool] {
        &self.buttons
    }

    pub fn hat(&self, hat: usize) -> Option<(i32, i32)> {
        self.hats.get(hat).copied()
    }

    /// Relative motion of the last ball event for `ball`.
    pub fn ball(&self, ball: usize) -> Option<(i32, i32)> {
        self.balls.get(ball).copied()
    }

    //--- State Updates ----------------------------------------------------

    pub(crate) fn set_axis(&mut self, axis: i64, value: f32) {
        if let Some(slot) = grow_slot(&mut self.axes, axis, 0.0) {
            *slot = value;
        }
    }

    pub(crate) fn set_button(&mut self, button: i64, down: bool) {
        if let Some(slot) = grow_slot(&mut self.buttons, button, false) {
            *slot = down;
        }
    }

    pub(crate) fn set_hat(&mut self, hat: i64, value: (i32, i32)) {
        if let Some(slot) = grow_slot(&mut self.hats, hat, (0, 0)) {
            *slot = value;
        }
    }

    pub(crate) fn set_ball(&mut self, ball: i64, rel: (i32, i32)) {
        if let Some(slot) = grow_slot(&mut self.balls, ball, (0, 0)) {
            *slot = rel;
        }
    }
}

/// Slot `index` of `values`, growing the vec with `fill` if needed.
/// Negative indices have no slot.
fn grow_slot<T: Clone>(values: &mut Vec<T>, index: i64, fill: T) -> Option<&mut T> {
    let index = usize::try_from(index).ok()?;
    if index >= values.len() {
        values.resize(index + 1, fill);
    }
    values.get_mut(index)
}

//=== DeviceRegistry ======================================================

/// Attached devices of one class, keyed by instance id.
#[derive(Debug)]
pub struct DeviceRegistry {
    class: DeviceClass,
    devices: HashMap<i32, DeviceProxy>,
}

impl DeviceRegistry {
    pub fn new(class: DeviceClass) -> Self {
        Self {
            class,
            devices: HashMap::new(),
        }
    }

    pub fn class(&self) -> DeviceClass {
        self.class
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn contains(&self, instance_id: i32) -> bool {
        self.devices.contains_key(&instance_id)
    }

    pub fn get(&self, instance_id: i32) -> Option<&DeviceProxy> {
        self.devices.get(&instance_id)
    }

    /// Attached instance ids in ascending order.
    pub fn instance_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.devices.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceProxy> {
        self.devices.values()
    }

    //--- Mutation (dispatch only) -----------------------------------------

    /// Inserts `proxy` unless its instance id is already attached.
    pub(crate) fn insert(&mut self, proxy: DeviceProxy) -> bool {
        if self.devices.contains_key(&proxy.instance_id) {
            return false;
        }
        self.devices.insert(proxy.instance_id, proxy);
        true
    }

    pub(crate) fn remove(&mut self, instance_id: i32) -> Option<DeviceProxy> {
        self.devices.remove(&instance_id)
    }

    /// Proxy an input event refers to: by `instance_id`, or by the `joy`
    /// slot index for events that predate instance ids.
    pub(crate) fn resolve_mut(&mut self, event: &Event) -> Option<&mut DeviceProxy> {
        if let Some(id) = event.int("instance_id") {
            let id = i32::try_from(id).ok()?;
            return self.devices.get_mut(&id);
        }

        let slot = usize::try_from(event.int("joy")?).ok()?;
        self.devices.values_mut().find(|proxy| proxy.device_index == slot)
    }

    //--- Reconciliation ---------------------------------------------------

    /// Purges entries the native layer no longer validates and refreshes
    /// the slot index of the rest. Returns the purged instance ids.
    ///
    /// An entry is stale when the device cannot report a name or its slot
    /// lies outside the current device count. No handlers are notified.
    pub fn reconcile(&mut self, native: &dyn NativeLayer) -> Vec<i32> {
        let class = self.class;
        let count = native.device_count(class);
        let mut stale = Vec::new();

        for (&id, proxy) in self.devices.iter_mut() {
            let named = native.device_name(class, id).is_some();
            match native.device_index(class, id) {
                Some(index) if named && index < count => proxy.device_index = index,
                _ => stale.push(id),
            }
        }

        stale.sort_unstable();
        for id in &stale {
            self.devices.remove(id);
            info!("Purged stale {} {}", class, id);
        }
        stale
    }
}

//=== Shared Device Dispatch ==============================================

/// Opens the device named by `device_index`, registers it and forwards the
/// added event (with `instance_id` filled in) once the registry holds it.
pub(crate) fn device_added<S: SceneKey>(
    router: &mut Router<'_, S>,
    class: DeviceClass,
    id: HandlerId,
    event: &Event,
) -> Result<bool, EngineError> {
    let Some(index) = event.int("device_index").and_then(|i| usize::try_from(i).ok()) else {
        warn!("{} added event without a device index: {}", class, event);
        return Ok(true);
    };

    let Some(info) = router.native.open_device(class, index) else {
        warn!("Could not open {} at slot {}", class, index);
        return Ok(true);
    };

    let instance_id = info.instance_id;
    let registry = router.devices.registry_mut(class);
    if !registry.insert(DeviceProxy::open(class, index, info)) {
        debug!("{} {} already attached; ignoring duplicate add", class, instance_id);
        return Ok(true);
    }

    if let Some(proxy) = registry.get(instance_id) {
        info!("{} {} attached: '{}' (slot {})", class, instance_id, proxy.name(), index);
    }

    let mut notice = event.clone();
    notice.insert("instance_id", instance_id);
    router.forward(id, &notice)
}

/// Forwards the removed event while the proxy is still queryable, then
/// drops it from the registry even if a handler failed.
pub(crate) fn device_removed<S: SceneKey>(
    router: &mut Router<'_, S>,
    class: DeviceClass,
    id: HandlerId,
    event: &Event,
) -> Result<bool, EngineError> {
    let Some(instance_id) = event.int("instance_id").and_then(|i| i32::try_from(i).ok()) else {
        warn!("{} removed event without an instance id: {}", class, event);
        return Ok(true);
    };

    if !router.devices.registry(class).contains(instance_id) {
        debug!("{} {} removed but was never attached", class, instance_id);
        return Ok(true);
    }

    let forwarded = router.forward(id, event);
    router.devices.registry_mut(class).remove(instance_id);
    info!("{} {} detached", class, instance_id);
    forwarded
}

/// Applies `update` to the proxy `event` refers to and forwards the event.
/// Events for devices that are gone are dropped.
pub(crate) fn device_input<S: SceneKey>(
    router: &mut Router<'_, S>,
    class: DeviceClass,
    id: HandlerId,
    event: &Event,
    update: impl FnOnce(&mut DeviceProxy, &Event),
) -> Result<bool, EngineError> {
    match router.devices.registry_mut(class).resolve_mut(event) {
        Some(proxy) => update(proxy, event),
        None => {
            debug!("Dropping {} for unknown {}: {}", id.name(), class, event);
            return Ok(true);
        }
    }
    router.forward(id, event)
}

//=========================================================================
// Unit Tests
//=========================================================================
