//! The per-session poll-event queue, per §4.6.
//!
//! The queue is single-producer (the server, as session state changes) / single-consumer (the
//! client's poll call). Mutex-guarded rather than lock-free: event volume is low (state changes,
//! interaction-profile changes) and callers must see strict FIFO order.

use {crate::session::SessionState, std::collections::VecDeque};

#[cfg(feature = "parking_lot")]
use parking_lot::Mutex;

#[cfg(not(feature = "parking_lot"))]
use std::sync::Mutex;

/// An event queued for a single session's next `poll_event` call.
#[derive(Clone, Debug, PartialEq)]
pub enum CompositorEvent {
    /// The session's state machine transitioned.
    StateChanged {
        old_state: SessionState,
        new_state: SessionState,
    },

    /// The active interaction profile for one or more top-level paths changed.
    ///
    /// Binding resolution itself is out of scope (§1); the core only relays that a change
    /// happened so the client knows to re-query action state.
    InteractionProfileChanged,

    /// The primary session's visibility changed, as observed by a secondary session.
    MainSessionVisibilityChanged { visible: bool },
}

/// A single session's outgoing event queue.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Mutex<VecDeque<CompositorEvent>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event, called by the server as session state changes.
    pub fn push(&self, event: CompositorEvent) {
        #[cfg(feature = "parking_lot")]
        self.events.lock().push_back(event);

        #[cfg(not(feature = "parking_lot"))]
        self.events.lock().unwrap().push_back(event);
    }

    /// Pops the oldest pending event, if any. This is the implementation of the client-facing
    /// `poll_event` call.
    pub fn poll(&self) -> Option<CompositorEvent> {
        #[cfg(feature = "parking_lot")]
        return self.events.lock().pop_front();

        #[cfg(not(feature = "parking_lot"))]
        return self.events.lock().unwrap().pop_front();
    }

    /// Discards all pending events. Called when the owning session is destroyed so that no
    /// stale events can be delivered after the session handle is gone.
    pub fn clear(&self) {
        #[cfg(feature = "parking_lot")]
        self.events.lock().clear();

        #[cfg(not(feature = "parking_lot"))]
        self.events.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_drain_in_fifo_order() {
        let queue = EventQueue::new();
        queue.push(CompositorEvent::StateChanged {
            old_state: SessionState::Ready,
            new_state: SessionState::Synchronized,
        });
        queue.push(CompositorEvent::InteractionProfileChanged);

        assert_eq!(
            queue.poll(),
            Some(CompositorEvent::StateChanged {
                old_state: SessionState::Ready,
                new_state: SessionState::Synchronized,
            })
        );
        assert_eq!(queue.poll(), Some(CompositorEvent::InteractionProfileChanged));
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn clear_removes_pending_events() {
        let queue = EventQueue::new();
        queue.push(CompositorEvent::InteractionProfileChanged);
        queue.clear();
        assert_eq!(queue.poll(), None);
    }
}
