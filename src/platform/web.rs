//! Browser frame scheduling via `requestAnimationFrame`

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::scheduler::{FrameScheduler, FrameToken};

/// Callback invoked with the token of each delivered frame
pub type FrameHandler = Rc<dyn Fn(FrameToken)>;

/// Shared slot for the frame handler, filled in once the engine exists
#[derive(Clone, Default)]
pub struct HandlerSlot(Rc<RefCell<Option<FrameHandler>>>);

impl HandlerSlot {
    pub fn set(&self, handler: FrameHandler) {
        *self.0.borrow_mut() = Some(handler);
    }

    fn get(&self) -> Option<FrameHandler> {
        self.0.borrow().clone()
    }
}

/// One `requestAnimationFrame` per requested frame
#[derive(Default)]
pub struct AnimationFrameScheduler {
    handler: HandlerSlot,
    next: u64,
    /// Token and browser request id of the outstanding frame
    pending: Option<(FrameToken, i32)>,
}

impl AnimationFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for installing the frame handler after construction
    pub fn handler_slot(&self) -> HandlerSlot {
        self.handler.clone()
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.next += 1;
        let token = FrameToken(self.next);

        let Some(window) = web_sys::window() else {
            log::error!("No window; frame {:?} will never arrive", token);
            return token;
        };

        let slot = self.handler.clone();
        let callback = Closure::once_into_js(move |_time: f64| {
            // Look the handler up at delivery time; it is installed after the engine
            if let Some(handler) = slot.get() {
                handler(token);
            }
        });

        match window.request_animation_frame(callback.unchecked_ref()) {
            Ok(id) => self.pending = Some((token, id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Some((pending, id)) = self.pending {
            if pending == token {
                self.pending = None;
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
    }
}
