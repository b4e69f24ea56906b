//! Per-session state machine, per §4.6 and the `Session` entity in §3.

use crate::event::{CompositorEvent, EventQueue};

/// The lifecycle state of a connected client, matching the OpenXR session-state graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    Ready,
    Synchronized,
    Visible,
    Focused,
    Stopping,
    LossPending,
    Exiting,
}

impl SessionState {
    /// `true` once the session has begun and not yet stopped or lost the device, i.e. the
    /// states in which frame-loop calls (`wait_frame`, `layer_commit`, ...) are legal.
    pub fn is_running(self) -> bool {
        matches!(
            self,
            Self::Synchronized | Self::Visible | Self::Focused
        )
    }
}

/// A transition the session's state machine rejects given its current state.
#[derive(Debug)]
pub struct IllegalTransition {
    pub from: SessionState,
    pub attempted: &'static str,
}

/// A single connected client, per the `Session` entity in §3.
///
/// Owns its state and its event queue; the swapchains and layer slot it also owns live in
/// [`crate::swapchain::Swapchain`] and [`crate::layer::LayerSlot`] respectively and are threaded
/// in by the top-level [`crate::compositor::Compositor`], which also owns the single
/// [`crate::scheduler::FrameScheduler`] frame ids are allocated from.
#[derive(Debug)]
pub struct Session {
    id: u64,
    state: SessionState,
    events: EventQueue,
    focused: bool,
}

impl Session {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            state: SessionState::Idle,
            events: EventQueue::new(),
            focused: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Moves from `IDLE` to `READY`, the point at which the client may call `begin`.
    pub fn ready_to_begin(&mut self) -> Result<(), IllegalTransition> {
        self.transition(SessionState::Idle, SessionState::Ready, "ready_to_begin")
    }

    /// Moves from `READY` to `SYNCHRONIZED` after the client's first successful `layer_commit`.
    pub fn client_begin(&mut self) -> Result<(), IllegalTransition> {
        self.transition(
            SessionState::Ready,
            SessionState::Synchronized,
            "client_begin",
        )
    }

    /// Moves from `SYNCHRONIZED` to `VISIBLE`.
    pub fn become_visible(&mut self) -> Result<(), IllegalTransition> {
        self.transition(
            SessionState::Synchronized,
            SessionState::Visible,
            "become_visible",
        )
    }

    /// Moves from `VISIBLE` to `FOCUSED`.
    pub fn become_focused(&mut self) -> Result<(), IllegalTransition> {
        self.transition(SessionState::Visible, SessionState::Focused, "become_focused")?;
        self.focused = true;
        Ok(())
    }

    /// Moves from `FOCUSED` back to `VISIBLE`.
    pub fn lose_focus(&mut self) -> Result<(), IllegalTransition> {
        self.transition(SessionState::Focused, SessionState::Visible, "lose_focus")?;
        self.focused = false;
        Ok(())
    }

    /// Moves from `VISIBLE` (or `FOCUSED`, implicitly losing focus first) back to `SYNCHRONIZED`.
    pub fn hide(&mut self) -> Result<(), IllegalTransition> {
        if self.state == SessionState::Focused {
            self.lose_focus()?;
        }
        self.transition(SessionState::Visible, SessionState::Synchronized, "hide")
    }

    /// Moves from `SYNCHRONIZED` to `STOPPING`, then immediately to `IDLE`: the client has
    /// called `end`.
    pub fn client_end(&mut self) -> Result<(), IllegalTransition> {
        self.transition(SessionState::Synchronized, SessionState::Stopping, "client_end")?;
        self.set_state(SessionState::Idle);
        Ok(())
    }

    /// Any state may transition to `LOSS_PENDING`; device loss is unconditional.
    pub fn device_lost(&mut self) {
        self.set_state(SessionState::LossPending);
    }

    /// Any state may transition to `EXITING`.
    pub fn request_exit(&mut self) {
        self.set_state(SessionState::Exiting);
    }

    /// Whether this session currently holds the single focused slot.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Clears all pending events, per the "destroying a session removes its pending events"
    /// requirement (§4.6, §8 scenario 6).
    pub fn destroy(&mut self) {
        self.events.clear();
    }

    fn transition(
        &mut self,
        expected: SessionState,
        next: SessionState,
        attempted: &'static str,
    ) -> Result<(), IllegalTransition> {
        if self.state != expected {
            return Err(IllegalTransition {
                from: self.state,
                attempted,
            });
        }

        self.set_state(next);
        Ok(())
    }

    fn set_state(&mut self, next: SessionState) {
        let old_state = self.state;
        self.state = next;
        self.events.push(CompositorEvent::StateChanged {
            old_state,
            new_state: next,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_lifecycle_emits_ordered_state_changes() {
        let mut session = Session::new(1);
        session.ready_to_begin().unwrap();
        session.client_begin().unwrap();
        session.become_visible().unwrap();
        session.become_focused().unwrap();

        assert_eq!(session.state(), SessionState::Focused);
        assert!(session.is_focused());

        let mut states = Vec::new();
        while let Some(CompositorEvent::StateChanged { new_state, .. }) = session.events().poll() {
            states.push(new_state);
        }

        assert_eq!(
            states,
            vec![
                SessionState::Ready,
                SessionState::Synchronized,
                SessionState::Visible,
                SessionState::Focused,
            ]
        );
    }

    #[test]
    fn illegal_transition_is_rejected() {
        let mut session = Session::new(1);
        let err = session.become_visible().unwrap_err();
        assert_eq!(err.from, SessionState::Idle);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn destroy_drops_pending_events() {
        let mut session = Session::new(1);
        session.ready_to_begin().unwrap();
        session.destroy();
        assert_eq!(session.events().poll(), None);
    }

    #[test]
    fn hide_from_focused_clears_focus_first() {
        let mut session = Session::new(1);
        session.ready_to_begin().unwrap();
        session.client_begin().unwrap();
        session.become_visible().unwrap();
        session.become_focused().unwrap();

        session.hide().unwrap();
        assert_eq!(session.state(), SessionState::Synchronized);
        assert!(!session.is_focused());
    }
}
