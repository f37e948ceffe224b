//=========================================================================
// Transition Queue
//=========================================================================
//
// Queue of scene transitions requested through a `SceneContext`.
//
// Scenes push here from inside a hook or handler. The scene manager
// drains the queue immediately after that call returns, so a transition
// takes effect before the next event is dispatched and before render.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneKey;

//=== Scene Transition ====================================================

/// A lifecycle operation requested by a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition<K: SceneKey> {
    /// Replace the active scene.
    Switch(K),

    /// Suspend the active scene behind the pause overlay.
    Pause,

    /// Return from the pause overlay to the suspended scene.
    Resume,

    /// Stop the frame loop after the current frame.
    Quit,
}

//=== Transition Queue ====================================================

/// FIFO of pending scene transitions.
pub struct TransitionQueue<S: SceneKey> {
    queue: Vec<SceneTransition<S>>,
}

impl<S: SceneKey> TransitionQueue<S> {
    /// Creates a new empty transition queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a transition.
    pub fn push(&mut self, transition: SceneTransition<S>) {
        self.queue.push(transition);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drops all queued transitions.
    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all transitions from the queue, leaving it empty.
    ///
    /// Transitions pushed while the taken batch is being applied land in
    /// the now-empty queue and form the next batch.
    pub fn take(&mut self) -> Vec<SceneTransition<S>> {
        std::mem::take(&mut self.queue)
    }
}

impl<S: SceneKey> Default for TransitionQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
