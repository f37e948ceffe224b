//=========================================================================
// Keyboard
//=========================================================================
//
// Held-key tracking and keyboard dispatch.
//
//   KEY_DOWN → press   → on_key_down_event → on_key_chord_down_event
//   KEY_UP   → release → on_key_up_event   → on_key_chord_up_event
//
// Chord events carry the held keys in a `keys_down` field. For key-up this
// is the set held *before* the release, so the chord still includes the
// released key.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeSet;

//=== Internal Dependencies ===============================================

use super::keys::{KeyCode, Modifiers};
use crate::core::dispatch::{HandlerId, Router};
use crate::core::error::EngineError;
use crate::core::event::{codes, Event};
use crate::core::scene::SceneKey;

//=== KeyboardState =======================================================

#[derive(Debug, Default)]
pub struct KeyboardState {
    held: BTreeSet<KeyCode>,
    modifiers: Modifiers,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Held keys in a stable order.
    pub fn held_keys(&self) -> Vec<KeyCode> {
        self.held.iter().copied().collect()
    }

    /// Modifiers reported by the most recent key event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //--- Updates ----------------------------------------------------------

    fn press(&mut self, key: KeyCode) -> bool {
        self.held.insert(key)
    }

    fn release(&mut self, key: KeyCode) -> bool {
        self.held.remove(&key)
    }

    fn track_modifiers(&mut self, event: &Event) {
        if let Some(modifiers) = event.modifiers("modifiers") {
            self.modifiers = modifiers;
        }
    }
}

//=== Dispatcher ==========================================================

pub(crate) fn dispatch<S: SceneKey>(router: &mut Router<'_, S>, event: &Event) -> Result<bool, EngineError> {
    match event.code() {
        codes::KEY_DOWN => {
            let keyboard = &mut router.devices.keyboard;
            keyboard.track_modifiers(event);
            if let Some(key) = event.key("key") {
                keyboard.press(key);
            }
            let chord = event.clone().with("keys_down", keyboard.held_keys());

            router.forward(HandlerId::KeyDown, event)?;
            router.forward(HandlerId::KeyChordDown, &chord)
        }
        codes::KEY_UP => {
            let keyboard = &mut router.devices.keyboard;
            keyboard.track_modifiers(event);
            let chord = event.clone().with("keys_down", keyboard.held_keys());
            if let Some(key) = event.key("key") {
                keyboard.release(key);
            }

            router.forward(HandlerId::KeyUp, event)?;
            router.forward(HandlerId::KeyChordUp, &chord)
        }
        _ => Ok(false),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_track_held_keys() {
        let mut keyboard = KeyboardState::new();

        assert!(keyboard.press(KeyCode::KeyW));
        assert!(!keyboard.press(KeyCode::KeyW));
        keyboard.press(KeyCode::KeyA);

        assert_eq!(keyboard.held_keys(), vec![KeyCode::KeyA, KeyCode::KeyW]);
        assert!(keyboard.release(KeyCode::KeyW));
        assert!(!keyboard.is_pressed(KeyCode::KeyW));
        assert!(!keyboard.release(KeyCode::KeyW));
    }

    #[test]
    fn modifiers_follow_latest_event() {
        let mut keyboard = KeyboardState::new();
        keyboard.track_modifiers(&Event::new(codes::KEY_DOWN).with("modifiers", Modifiers::SHIFT));
        assert_eq!(keyboard.modifiers(), Modifiers::SHIFT);

        keyboard.track_modifiers(&Event::new(codes::KEY_DOWN));
        assert_eq!(keyboard.modifiers(), Modifiers::SHIFT);
    }
}
