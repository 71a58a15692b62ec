//! Frame scheduling
//!
//! The engine asks for one frame at a time and holds the returned token. Pause
//! and stop cancel the pending token; a frame delivered with any other token is
//! ignored, so no tick can run after a state transition.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle for one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Host-side frame source (display refresh in the browser)
pub trait FrameScheduler {
    /// Request one frame; the host later calls `Engine::frame` with the token
    fn request_frame(&mut self) -> FrameToken;
    /// Withdraw a pending request
    fn cancel_frame(&mut self, token: FrameToken);
}

#[derive(Debug, Default)]
struct QueueInner {
    next: u64,
    pending: Vec<FrameToken>,
    cancelled: usize,
}

/// Manually drained frame queue for headless hosts and tests
///
/// Clones share the same queue: hand one to the engine, keep one to drain.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest pending frame, if any
    pub fn pop(&self) -> Option<FrameToken> {
        let mut inner = self.inner.borrow_mut();
        if inner.pending.is_empty() {
            None
        } else {
            Some(inner.pending.remove(0))
        }
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Total cancellations seen
    pub fn cancelled(&self) -> usize {
        self.inner.borrow().cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameToken {
        let mut inner = self.inner.borrow_mut();
        inner.next += 1;
        let token = FrameToken(inner.next);
        inner.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let mut inner = self.inner.borrow_mut();
        let before = inner.pending.len();
        inner.pending.retain(|t| *t != token);
        if inner.pending.len() != before {
            inner.cancelled += 1;
        }
    }
}
