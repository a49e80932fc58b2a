//! Cooperative single-threaded timers.
//!
//! The queue keeps its own virtual clock which only moves when the owner calls
//! [`TimerQueue::advance`] (once per frame in the native viewer, by arbitrary
//! steps in tests). Callbacks run synchronously inside `advance`, in deadline
//! order, and may schedule or cancel other timers.
//!
//! Every scheduled timer is owned by a [`TimerHandle`]; dropping the handle
//! cancels the timer, so a torn-down view cannot leave a callback behind.

use crate::playback::TypewriterPlayback;
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Runs when the timer is due. `Some(delay)` re-arms it, `None` retires it.
pub type TimerCallback = Box<dyn FnMut() -> Option<Duration>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

// Guard against callbacks that keep re-arming with a zero delay.
const MAX_FIRES_PER_ADVANCE: usize = 100_000;

#[derive(Default)]
struct Inner {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    order: BTreeMap<(Duration, u64), TimerId>,
    keys: FnvHashMap<TimerId, (Duration, u64)>,
    callbacks: FnvHashMap<TimerId, TimerCallback>,
    running: Option<TimerId>,
    cancel_running: bool,
}

impl Inner {
    fn insert(&mut self, id: TimerId, delay: Duration, cb: TimerCallback) {
        let key = (self.now + delay, self.next_seq);
        self.next_seq += 1;
        self.order.insert(key, id);
        self.keys.insert(id, key);
        self.callbacks.insert(id, cb);
    }

    /// Returns the removed callback so the caller can drop it after the
    /// borrow ends (it may own handles that cancel on drop).
    fn cancel(&mut self, id: TimerId) -> Option<TimerCallback> {
        if let Some(key) = self.keys.remove(&id) {
            self.order.remove(&key);
            self.callbacks.remove(&id)
        } else {
            if self.running == Some(id) {
                self.cancel_running = true;
            }
            None
        }
    }

    fn pop_due(&mut self, target: Duration) -> Option<(TimerId, TimerCallback)> {
        let (&key, &id) = self.order.iter().next()?;
        if key.0 > target {
            return None;
        }
        self.order.remove(&key);
        self.keys.remove(&id);
        self.now = self.now.max(key.0);
        let cb = self.callbacks.remove(&id)?;
        self.running = Some(id);
        self.cancel_running = false;
        Some((id, cb))
    }
}

#[derive(Clone, Default)]
pub struct TimerQueue {
    inner: Rc<RefCell<Inner>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time of the queue.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.inner.borrow().order.len()
    }

    /// Arm `callback` to run `delay` from now.
    pub fn schedule<F>(&self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnMut() -> Option<Duration> + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_id);
        inner.next_id += 1;
        inner.insert(id, delay, Box::new(callback));
        TimerHandle {
            queue: Rc::downgrade(&self.inner),
            id,
            armed: true,
        }
    }

    /// One-shot convenience around [`schedule`](Self::schedule).
    pub fn after<F>(&self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce() + 'static,
    {
        let mut callback = Some(callback);
        self.schedule(delay, move || {
            if let Some(f) = callback.take() {
                f();
            }
            None
        })
    }

    /// Move the clock forward by `dt`, firing every timer that falls due.
    ///
    /// Returns the number of callbacks that ran.
    pub fn advance(&self, dt: Duration) -> usize {
        let target = self.now() + dt;
        let mut fired = 0usize;
        loop {
            if fired >= MAX_FIRES_PER_ADVANCE {
                log::warn!("[timers] fire limit reached; deferring remaining timers");
                break;
            }
            let popped = self.inner.borrow_mut().pop_due(target);
            let Some((id, mut cb)) = popped else {
                break;
            };
            // no borrow is held while user code runs
            let next = cb();
            fired += 1;
            let mut inner = self.inner.borrow_mut();
            let cancelled = inner.cancel_running;
            inner.running = None;
            inner.cancel_running = false;
            match next {
                Some(delay) if !cancelled => inner.insert(id, delay, cb),
                _ => {
                    drop(inner);
                    drop(cb);
                }
            }
        }
        let mut inner = self.inner.borrow_mut();
        inner.now = inner.now.max(target);
        fired
    }
}

/// Owning reference to a scheduled timer; cancels it on drop.
pub struct TimerHandle {
    queue: Weak<RefCell<Inner>>,
    id: TimerId,
    armed: bool,
}

impl TimerHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        if !self.armed {
            return false;
        }
        match self.queue.upgrade() {
            Some(inner) => {
                let inner = inner.borrow();
                inner.keys.contains_key(&self.id)
                    || (inner.running == Some(self.id) && !inner.cancel_running)
            }
            None => false,
        }
    }

    pub fn cancel(mut self) {
        self.release();
    }

    /// Let the timer run to completion without an owner.
    pub fn detach(mut self) {
        self.armed = false;
    }

    fn release(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        if let Some(inner) = self.queue.upgrade() {
            let removed = inner.borrow_mut().cancel(self.id);
            drop(removed);
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Every timer started on behalf of one animated view.
///
/// `stop` cancels them all; dropping the handle does the same, which ties the
/// timers' lifetime to the scope that owns the view.
#[derive(Default)]
pub struct AnimationHandle {
    timers: Vec<TimerHandle>,
}

impl AnimationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timer: TimerHandle) {
        self.timers.push(timer);
    }

    pub fn is_running(&self) -> bool {
        self.timers.iter().any(TimerHandle::is_active)
    }

    pub fn stop(&mut self) {
        for t in self.timers.drain(..) {
            t.cancel();
        }
    }
}

/// Drive `playback` from `queue`.
///
/// The returned handle owns the recurring tick; the shared playback can be
/// read by a renderer between ticks.
pub fn start_playback(
    queue: &TimerQueue,
    playback: TypewriterPlayback,
) -> (AnimationHandle, Rc<RefCell<TypewriterPlayback>>) {
    let first = playback.delay();
    let shared = Rc::new(RefCell::new(playback));
    let ticking = shared.clone();
    let mut handle = AnimationHandle::new();
    handle.push(queue.schedule(first, move || ticking.borrow_mut().tick()));
    (handle, shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn timer_cancelled_inside_its_own_callback_is_not_rearmed() {
        let q = TimerQueue::new();
        let slot: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));
        let (s, h) = (slot.clone(), hits.clone());
        let handle = q.schedule(Duration::from_millis(10), move || {
            h.set(h.get() + 1);
            if let Some(t) = s.borrow_mut().take() {
                t.cancel();
            }
            Some(Duration::from_millis(10))
        });
        *slot.borrow_mut() = Some(handle);
        q.advance(Duration::from_millis(100));
        assert_eq!(hits.get(), 1);
        assert_eq!(q.pending(), 0);
    }
}
