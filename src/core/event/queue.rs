//=========================================================================
// Event Queue
//=========================================================================
//
// Posted-event channel shared between the engine, scenes and backends.
//
// Architecture:
//   EventPoster (Sender<Event>, cloneable) → EventQueue::drain() → frame
//
// Events posted during a frame are pumped at the start of the next one,
// after the native layer's own events. Draining is bounded per pump so a
// handler that keeps posting cannot starve the frame; the remainder stays
// queued for the following frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::Event;

/// Maximum events taken from the queue in one pump.
pub const MAX_EVENTS_PER_PUMP: usize = 4096;

//=== EventPoster =========================================================

/// Cloneable handle that posts events into an [`EventQueue`].
#[derive(Debug, Clone)]
pub struct EventPoster {
    sender: Sender<Event>,
}

impl EventPoster {
    /// Posts an event. Returns false if the queue has been dropped.
    pub fn post(&self, event: Event) -> bool {
        let name = event.code_name();
        if self.sender.send(event).is_err() {
            warn!("Event queue disconnected, dropping {}", name);
            return false;
        }
        true
    }
}

//=== EventQueue ==========================================================

/// Unbounded FIFO of posted events.
#[derive(Debug)]
pub struct EventQueue {
    sender: Sender<Event>,
    receiver: Receiver<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Returns a new poster feeding this queue.
    pub fn poster(&self) -> EventPoster {
        EventPoster {
            sender: self.sender.clone(),
        }
    }

    /// Number of events waiting.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Takes pending events in posting order (bounded per call).
    pub fn drain(&self) -> Vec<Event> {
        let mut events = Vec::new();

        while events.len() < MAX_EVENTS_PER_PUMP {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if events.len() >= MAX_EVENTS_PER_PUMP {
            warn!(
                "Event queue backlog: drained {} events, {} left for next frame",
                events.len(),
                self.receiver.len()
            );
        }

        events
    }
}

impl Default for EventQueue {
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

    #[test]
    fn drain_handles_empty_queue() {
        let queue = EventQueue::new();
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn drain_preserves_posting_order() {
        let queue = EventQueue::new();
        let poster = queue.poster();

        poster.post(Event::new(codes::KEY_DOWN));
        poster.post(Event::new(codes::MOUSE_MOTION));
        poster.post(Event::new(codes::QUIT));

        let drained: Vec<_> = queue.drain().iter().map(Event::code).collect();
        assert_eq!(drained, vec![codes::KEY_DOWN, codes::MOUSE_MOTION, codes::QUIT]);
        assert!(queue.is_empty());
    }

    #[test]
    fn drain_is_bounded() {
        let queue = EventQueue::new();
        let poster = queue.poster();
        for _ in 0..MAX_EVENTS_PER_PUMP + 10 {
            poster.post(Event::new(codes::USER_EVENT));
        }

        assert_eq!(queue.drain().len(), MAX_EVENTS_PER_PUMP);
        assert_eq!(queue.len(), 10, "Remainder stays queued");
        assert_eq!(queue.drain().len(), 10);
    }

    #[test]
    fn post_fails_after_queue_dropped() {
        let queue = EventQueue::new();
        let poster = queue.poster();
        drop(queue);

        assert!(!poster.post(Event::new(codes::QUIT)));
    }

    #[test]
    fn posters_from_clones_share_queue() {
        let queue = EventQueue::new();
        let a = queue.poster();
        let b = a.clone();

        a.post(Event::new(codes::USER_EVENT));
        b.post(Event::new(codes::USER_EVENT));

        assert_eq!(queue.len(), 2);
    }
}
