//! Cancellation tokens shared between a fade task and whoever started it
//!
//! The token itself is moved into exactly one [`InterpolationTask`], which
//! is the only code allowed to move it into a terminal state. Everyone else
//! holds a [`CancelHandle`] and can only *request* cancellation; the task
//! observes the request at its next tick boundary.
//!
//! [`InterpolationTask`]: crate::InterpolationTask

use std::cell::Cell;
use std::rc::Rc;

/// Lifecycle of a cancellation token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Created, task not started yet
    Created,

    /// Task is running
    Running,

    /// Task stopped early after a cancellation request
    Cancelled,

    /// Task ran to completion
    Finished,
}

impl TokenState {
    /// Check if the state can no longer change
    pub fn is_terminal(self) -> bool {
        matches!(self, TokenState::Cancelled | TokenState::Finished)
    }
}

#[derive(Debug)]
struct TokenCell {
    state: Cell<TokenState>,
    cancel_requested: Cell<bool>,
}

/// Token owned by a single interpolation task
#[derive(Debug)]
pub struct CancellationToken {
    inner: Rc<TokenCell>,
}

impl CancellationToken {
    /// Create a new token in the `Created` state
    pub fn new() -> Self {
        Self {
            inner: Rc::new(TokenCell {
                state: Cell::new(TokenState::Created),
                cancel_requested: Cell::new(false),
            }),
        }
    }

    /// Handle for observing the token and requesting cancellation
    pub fn handle(&self) -> CancelHandle {
        CancelHandle {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Current state
    pub fn state(&self) -> TokenState {
        self.inner.state.get()
    }

    /// Check if someone asked for cancellation
    pub fn is_cancel_requested(&self) -> bool {
        self.inner.cancel_requested.get()
    }

    /// `Created → Running`
    pub(crate) fn start(&self) {
        if self.state() == TokenState::Created {
            self.inner.state.set(TokenState::Running);
        }
    }

    /// `Running → Cancelled`
    pub(crate) fn mark_cancelled(&self) {
        if self.state() == TokenState::Running {
            self.inner.state.set(TokenState::Cancelled);
        }
    }

    /// `Running → Finished`
    pub(crate) fn mark_finished(&self) {
        if self.state() == TokenState::Running {
            self.inner.state.set(TokenState::Finished);
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared view of a [`CancellationToken`]
///
/// Cloning a handle is cheap. Handles never change the token's state
/// directly.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    inner: Rc<TokenCell>,
}

impl CancelHandle {
    /// Ask the owning task to stop at its next tick boundary
    ///
    /// Has no effect once the token is terminal.
    pub fn request_cancel(&self) {
        if !self.state().is_terminal() {
            self.inner.cancel_requested.set(true);
        }
    }

    /// Current state
    pub fn state(&self) -> TokenState {
        self.inner.state.get()
    }

    /// Check if the task was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.state() == TokenState::Cancelled
    }

    /// Check if the task completed normally
    pub fn is_finished(&self) -> bool {
        self.state() == TokenState::Finished
    }

    /// Check if the task has stopped, either way
    pub fn is_done(&self) -> bool {
        self.state().is_terminal()
    }
}
