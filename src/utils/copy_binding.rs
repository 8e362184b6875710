//! Copy-on-click binding
//!
//! Owns the click-to-copy attachment on one element and the short-lived
//! "copied" flag shown to the user after a successful copy.
//!
//! Lifecycle:
//! - `bind` tears down whatever was bound before, then attaches to the element
//! - `rebind` does the same against the element already bound
//! - `dispose` (or dropping the binding) tears down without re-attaching
//!
//! At most one clipboard handle and one reset timer are alive at any time.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

use super::clipboard::{
    ClipboardHandle, ClipboardMechanism, ClipboardOptions, CopyError, CopyEvent,
};
use super::copy_source::CopySource;
use super::timers::{ResetTimer, TimerFacility};

/// How long the copied flag stays set after a copy
pub const DEFAULT_RESET_TIMEOUT_MS: u32 = 4000;

/// Settings for a copy-on-click binding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyOnClickConfig {
    /// Milliseconds before the copied flag resets; `0` disables the flag entirely
    pub timeout_ms: u32,
}

impl Default for CopyOnClickConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_RESET_TIMEOUT_MS,
        }
    }
}

impl CopyOnClickConfig {
    pub fn with_timeout(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    pub fn auto_reset(&self) -> bool {
        self.timeout_ms > 0
    }
}

struct ActiveBinding<C: ClipboardMechanism, T: TimerFacility> {
    target: C::Target,
    handle: C::Handle,
    reset: ResetTimer<T>,
}

/// Click-to-copy behavior for a single element
pub struct CopyOnClickBinding<C: ClipboardMechanism, T: TimerFacility> {
    clipboard: C,
    timers: T,
    set_copied: Rc<dyn Fn(bool)>,
    active: Option<ActiveBinding<C, T>>,
}

impl<C: ClipboardMechanism, T: TimerFacility> CopyOnClickBinding<C, T> {
    /// `set_copied` receives every change of the copied flag
    pub fn new(clipboard: C, timers: T, set_copied: Rc<dyn Fn(bool)>) -> Self {
        Self {
            clipboard,
            timers,
            set_copied,
            active: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.active.is_some()
    }

    /// Attach to `target`, replacing any previous attachment
    pub fn bind(&mut self, target: &C::Target, source: CopySource, config: CopyOnClickConfig) {
        self.teardown();

        log::debug!("Binding copy-on-click (timeout: {}ms)", config.timeout_ms);

        let text: Rc<dyn Fn() -> String> = Rc::new(move || source.resolve());
        let mut handle = self.clipboard.create(
            target,
            ClipboardOptions {
                text,
                container: target.clone(),
            },
        );

        let reset = ResetTimer::new(self.timers.clone());

        {
            let reset = reset.clone();
            let set_copied = self.set_copied.clone();

            handle.on_success(Box::new(move |event: &CopyEvent| {
                // Keep focus on the trigger instead of the body
                event.clear_selection();

                if config.auto_reset() {
                    set_copied(true);
                    let set_copied = set_copied.clone();
                    reset.schedule(config.timeout_ms, move || set_copied(false));
                }
            }));
        }

        handle.on_error(Box::new(|event: &CopyEvent, err: &CopyError| {
            log::warn!("Failed to copy {} chars to clipboard: {}", event.text.len(), err);
        }));

        self.active = Some(ActiveBinding {
            target: target.clone(),
            handle,
            reset,
        });
    }

    /// Re-attach to the current target with a new source or config
    ///
    /// Returns `false` if nothing is bound.
    pub fn rebind(&mut self, source: CopySource, config: CopyOnClickConfig) -> bool {
        let target = match self.active.as_ref() {
            Some(active) => active.target.clone(),
            None => return false,
        };

        self.bind(&target, source, config);
        true
    }

    /// Bring the binding in line with the current element
    ///
    /// Same element: rebind with the new source and config. Different element:
    /// bind to it. No element: dispose.
    pub fn sync(
        &mut self,
        target: Option<&C::Target>,
        source: CopySource,
        config: CopyOnClickConfig,
    ) where
        C::Target: PartialEq,
    {
        match target {
            Some(target) if self.is_bound_to(target) => {
                self.rebind(source, config);
            }
            Some(target) => self.bind(target, source, config),
            None => {
                if self.is_bound() {
                    log::debug!("Copy target went away, releasing binding");
                }
                self.dispose();
            }
        }
    }

    fn is_bound_to(&self, target: &C::Target) -> bool
    where
        C::Target: PartialEq,
    {
        self.active.as_ref().is_some_and(|active| active.target == *target)
    }

    /// Detach and cancel any pending reset
    pub fn dispose(&mut self) {
        if self.teardown() {
            log::debug!("Disposed copy-on-click binding");
        }
    }

    fn teardown(&mut self) -> bool {
        match self.active.take() {
            Some(mut active) => {
                active.handle.destroy();
                active.reset.cancel();
                true
            }
            None => false,
        }
    }
}

impl<C: ClipboardMechanism, T: TimerFacility> Drop for CopyOnClickBinding<C, T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
