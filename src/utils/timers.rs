//! Timer facility and debounced reset timer
//!
//! The copied-flag reset is a debounced action: every successful copy
//! replaces the pending reset instead of stacking a second one.
//!
//! # Example
//! ```ignore
//! let reset = ResetTimer::new(GlooTimers);
//! reset.schedule(4000, move || copied.set(false)); // copy #1
//! reset.schedule(4000, move || copied.set(false)); // copy #2 cancels #1
//! ```

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;

/// Something that can run a callback once after a delay
///
/// Dropping the returned timeout cancels it.
pub trait TimerFacility: Clone + 'static {
    type Timeout: 'static;

    /// Schedule `callback` to run once after `millis` milliseconds
    fn set_timeout(&self, millis: u32, callback: Box<dyn FnOnce()>) -> Self::Timeout;

    /// Cancel a scheduled timeout (no-op if it already fired)
    fn clear_timeout(&self, timeout: Self::Timeout) {
        drop(timeout);
    }
}

/// Browser timers via `setTimeout` / `clearTimeout`
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTimers;

impl TimerFacility for GlooTimers {
    type Timeout = Timeout;

    fn set_timeout(&self, millis: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(millis, callback)
    }
}

/// A single-slot timer: scheduling replaces whatever was pending
pub struct ResetTimer<T: TimerFacility> {
    timers: T,
    pending: Rc<RefCell<Option<T::Timeout>>>,
}

impl<T: TimerFacility> ResetTimer<T> {
    pub fn new(timers: T) -> Self {
        Self {
            timers,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Schedule `callback` after `millis`, cancelling any pending one first
    pub fn schedule<F>(&self, millis: u32, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();

        let timeout = self.timers.set_timeout(millis, Box::new(callback));
        *self.pending.borrow_mut() = Some(timeout);
    }

    /// Cancel the pending callback, if any
    pub fn cancel(&self) {
        let previous = self.pending.borrow_mut().take();
        if let Some(timeout) = previous {
            self.timers.clear_timeout(timeout);
        }
    }
}

impl<T: TimerFacility> Clone for ResetTimer<T> {
    fn clone(&self) -> Self {
        Self {
            timers: self.timers.clone(),
            pending: Rc::clone(&self.pending),
        }
    }
}
