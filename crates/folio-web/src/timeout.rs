//! `setTimeout` chains owned by Rust values.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Slot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Re-arming browser timeout.
///
/// The step returns the delay before it should run again, or `None` to stop.
/// Dropping the `Ticker` clears the pending timeout and frees the closure.
pub struct Ticker {
    closure: Slot,
    pending: Rc<Cell<Option<i32>>>,
}

impl Ticker {
    pub fn start(first: Duration, mut step: impl FnMut() -> Option<Duration> + 'static) -> Self {
        let closure: Slot = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let slot = Rc::downgrade(&closure);
        let pending_tick = pending.clone();
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            let Some(delay) = step() else {
                return;
            };
            if let Some(slot) = slot.upgrade() {
                if let Some(cb) = slot.borrow().as_ref() {
                    pending_tick.set(arm(cb, delay));
                }
            }
        }) as Box<dyn FnMut()>));
        if let Some(cb) = closure.borrow().as_ref() {
            pending.set(arm(cb, first));
        }
        Self { closure, pending }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            w.clear_timeout_with_handle(id);
        }
        self.closure.borrow_mut().take();
    }
}

fn arm(cb: &Closure<dyn FnMut()>, delay: Duration) -> Option<i32> {
    let window = web::window()?;
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        delay.as_millis().min(i32::MAX as u128) as i32,
    ) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("[timeout] setTimeout failed: {e:?}");
            None
        }
    }
}
