//! Rate limiting for high-frequency events.
//!
//! Both wrappers own their timer state explicitly. Cloning a wrapper shares
//! that state, so every clone belongs to the same burst.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Runs deferred tasks. Dropping a handle cancels its task if it has not run.
pub trait Scheduler: Clone + 'static {
    type Handle: 'static;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

struct DebounceState<A, S: Scheduler> {
    callback: Rc<dyn Fn(A)>,
    wait_ms: u32,
    scheduler: S,
    timer: RefCell<Option<S::Handle>>,
    pending: Rc<Cell<bool>>,
}

/// Coalesces a burst of calls into one, fired `wait_ms` after the last call.
pub struct Debounced<A, S: Scheduler> {
    state: Rc<DebounceState<A, S>>,
}

impl<A, S: Scheduler> Clone for Debounced<A, S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

pub fn debounce<A, S, F>(callback: F, wait_ms: u32, scheduler: S) -> Debounced<A, S>
where
    A: 'static,
    S: Scheduler,
    F: Fn(A) + 'static,
{
    Debounced {
        state: Rc::new(DebounceState {
            callback: Rc::new(callback),
            wait_ms,
            scheduler,
            timer: RefCell::new(None),
            pending: Rc::new(Cell::new(false)),
        }),
    }
}

impl<A: 'static, S: Scheduler> Debounced<A, S> {
    pub fn call(&self, args: A) {
        let callback = Rc::clone(&self.state.callback);
        let pending = Rc::clone(&self.state.pending);
        pending.set(true);

        let timer = self.state.scheduler.schedule(
            self.state.wait_ms,
            Box::new(move || {
                pending.set(false);
                callback(args);
            }),
        );

        // the replaced handle cancels the previous call on drop
        let previous = self.state.timer.replace(Some(timer));
        drop(previous);
    }

    pub fn cancel(&self) {
        let previous = self.state.timer.take();
        self.state.pending.set(false);
        drop(previous);
    }

    pub fn is_pending(&self) -> bool {
        self.state.pending.get()
    }
}

struct ThrottleState<A, S: Scheduler> {
    callback: Box<dyn Fn(A)>,
    limit_ms: u32,
    scheduler: S,
    cooling: Rc<Cell<bool>>,
    cooldown: RefCell<Option<S::Handle>>,
}

/// Fires on the leading edge, then drops calls until `limit_ms` has passed.
pub struct Throttled<A, S: Scheduler> {
    state: Rc<ThrottleState<A, S>>,
}

impl<A, S: Scheduler> Clone for Throttled<A, S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

pub fn throttle<A, S, F>(callback: F, limit_ms: u32, scheduler: S) -> Throttled<A, S>
where
    A: 'static,
    S: Scheduler,
    F: Fn(A) + 'static,
{
    Throttled {
        state: Rc::new(ThrottleState {
            callback: Box::new(callback),
            limit_ms,
            scheduler,
            cooling: Rc::new(Cell::new(false)),
            cooldown: RefCell::new(None),
        }),
    }
}

impl<A: 'static, S: Scheduler> Throttled<A, S> {
    /// Returns `false` when the call was dropped.
    pub fn call(&self, args: A) -> bool {
        if self.state.cooling.get() {
            return false;
        }

        self.state.cooling.set(true);
        let cooling = Rc::clone(&self.state.cooling);
        let timer = self
            .state
            .scheduler
            .schedule(self.state.limit_ms, Box::new(move || cooling.set(false)));
        let previous = self.state.cooldown.replace(Some(timer));
        drop(previous);

        (self.state.callback)(args);
        true
    }

    pub fn is_cooling(&self) -> bool {
        self.state.cooling.get()
    }
}
