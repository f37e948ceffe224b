//=========================================================================
// Dispatch Table
//=========================================================================
//
// Raw code → category dispatcher map, built once from the taxonomy and
// read-only afterwards.
//
//   for category in Category::ALL:
//       for code in category.members():
//           table[code] = dispatcher_for(category)
//
// Classification is a single hash lookup. Codes outside the taxonomy stay
// unmapped and go to the unimplemented path.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{categories, Router};
use crate::core::error::EngineError;
use crate::core::event::{Category, Event, EventCode};
use crate::core::input::{controller, joystick, keyboard, mouse};
use crate::core::scene::SceneKey;

//=== Dispatcher ==========================================================

/// A category dispatcher. Returns `Ok(false)` when the category has no
/// branch for the event's code.
pub type Dispatcher<S> = fn(&mut Router<'_, S>, &Event) -> Result<bool, EngineError>;

/// Dispatcher bound to `category`.
pub fn dispatcher_for<S: SceneKey>(category: Category) -> Dispatcher<S> {
    match category {
        Category::Audio => categories::audio::<S>,
        Category::App => categories::app::<S>,
        Category::Window => categories::window::<S>,
        Category::Keyboard => keyboard::dispatch::<S>,
        Category::Text => categories::text::<S>,
        Category::Mouse => mouse::dispatch::<S>,
        Category::Joystick => joystick::dispatch::<S>,
        Category::Controller => controller::dispatch::<S>,
        Category::Touch => categories::touch::<S>,
        Category::Drop => categories::drop::<S>,
        Category::Midi => categories::midi::<S>,
        Category::Game => categories::game::<S>,
    }
}

//=== DispatchEntry =======================================================

pub struct DispatchEntry<S: SceneKey> {
    pub category: Category,
    pub dispatcher: Dispatcher<S>,
}

impl<S: SceneKey> Clone for DispatchEntry<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: SceneKey> Copy for DispatchEntry<S> {}

impl<S: SceneKey> fmt::Debug for DispatchEntry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchEntry")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

//=== DispatchTable =======================================================

pub struct DispatchTable<S: SceneKey> {
    entries: HashMap<EventCode, DispatchEntry<S>>,
}

impl<S: SceneKey> DispatchTable<S> {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        for category in Category::ALL {
            let dispatcher = dispatcher_for::<S>(category);
            for &code in category.members() {
                entries.insert(code, DispatchEntry { category, dispatcher });
            }
        }
        debug!("Dispatch table built with {} codes", entries.len());
        Self { entries }
    }

    /// Dispatcher entry for `code`, or `None` if the code is unclassified.
    pub fn classify(&self, code: EventCode) -> Option<&DispatchEntry<S>> {
        self.entries.get(&code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Routes one event. Unclassified codes, and classified codes their
    /// dispatcher has no branch for, are reported as unimplemented.
    pub fn dispatch(&self, router: &mut Router<'_, S>, event: &Event) -> Result<(), EngineError> {
        let handled = match self.classify(event.code()) {
            Some(entry) => (entry.dispatcher)(router, event)?,
            None => false,
        };

        if !handled {
            router.fallback.unimplemented(event);
        }
        Ok(())
    }
}

impl<S: SceneKey> Default for DispatchTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::codes;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    #[test]
    fn every_taxonomy_code_classifies_to_its_category() {
        let table = DispatchTable::<TestScene>::new();
        for category in Category::ALL {
            for &code in category.members() {
                let entry = table.classify(code).expect("taxonomy code must classify");
                assert_eq!(entry.category, category, "{}", codes::name(code));
            }
        }
    }

    #[test]
    fn codes_outside_the_taxonomy_are_not_found() {
        let table = DispatchTable::<TestScene>::new();
        for &code in codes::ALL {
            if Category::of(code).is_none() {
                assert!(table.classify(code).is_none(), "{}", codes::name(code));
            }
        }
        assert!(table.classify(0xFFFF).is_none());
        assert!(table.classify(codes::SENSOR_UPDATE).is_none());
    }

    #[test]
    fn table_size_matches_taxonomy() {
        let table = DispatchTable::<TestScene>::new();
        let members: usize = Category::ALL.iter().map(|c| c.members().len()).sum();
        assert_eq!(table.len(), members);
    }
}
