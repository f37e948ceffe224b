//=========================================================================
// Event System
//=========================================================================
//
// Event records, raw codes, the static taxonomy and the posted-event
// queue.
//
// Flow:
//   NativeLayer::pump_events() ┐
//                              ├→ Event → DispatchTable::classify() → ...
//   EventQueue::drain()       ┘
//
//=========================================================================

//=== Module Declarations =================================================

pub mod codes;
mod queue;
mod record;
mod taxonomy;

//=== Public API ==========================================================

pub use codes::EventCode;
pub use queue::{EventPoster, EventQueue, MAX_EVENTS_PER_PUMP};
pub use record::{Event, Value};
pub use taxonomy::Category;
