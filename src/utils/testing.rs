//! In-memory stand-ins for browser timers and the clipboard, for unit tests

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use super::clipboard::{
    ClipboardHandle, ClipboardMechanism, ClipboardOptions, CopyError, CopyEvent, CopyListeners,
    ErrorListener, SuccessListener,
};
use super::timers::TimerFacility;

// =============================================================================
// Timers
// =============================================================================

#[derive(Default)]
struct TimerState {
    now: u64,
    next_id: u64,
    // Keyed by (due, id) so equal deadlines fire in scheduling order
    pending: BTreeMap<(u64, u64), Box<dyn FnOnce()>>,
}

/// Virtual clock; nothing fires until [`ManualTimers::advance`] is called
#[derive(Clone, Default)]
pub struct ManualTimers {
    state: Rc<RefCell<TimerState>>,
}

pub struct ManualTimeout {
    key: (u64, u64),
    state: Weak<RefCell<TimerState>>,
}

impl Drop for ManualTimeout {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            if let Ok(mut state) = state.try_borrow_mut() {
                state.pending.remove(&self.key);
            }
        }
    }
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Move the clock forward, firing due timers in deadline order
    pub fn advance(&self, millis: u64) {
        let target = self.state.borrow().now + millis;

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state.pending.keys().next().copied().filter(|(due, _)| *due <= target);
                match due {
                    Some(key) => {
                        state.now = key.0;
                        state.pending.remove(&key)
                    }
                    None => None,
                }
            };

            match next {
                Some(callback) => callback(),
                None => break,
            }
        }

        self.state.borrow_mut().now = target;
    }
}

impl TimerFacility for ManualTimers {
    type Timeout = ManualTimeout;

    fn set_timeout(&self, millis: u32, callback: Box<dyn FnOnce()>) -> ManualTimeout {
        let mut state = self.state.borrow_mut();
        let key = (state.now + u64::from(millis), state.next_id);
        state.next_id += 1;
        state.pending.insert(key, callback);

        ManualTimeout {
            key,
            state: Rc::downgrade(&self.state),
        }
    }
}

// =============================================================================
// Clipboard
// =============================================================================

struct FakeAttachment {
    trigger: &'static str,
    container: &'static str,
    text: Rc<dyn Fn() -> String>,
    listeners: RefCell<CopyListeners>,
    destroyed: Cell<bool>,
}

#[derive(Default)]
struct ClipboardState {
    attachments: Vec<Rc<FakeAttachment>>,
    attempts: Vec<String>,
    contents: Option<String>,
    selection_clears: usize,
    fail_writes: bool,
    peak_live: usize,
}

impl ClipboardState {
    fn live(&self) -> usize {
        self.attachments.iter().filter(|a| !a.destroyed.get()).count()
    }
}

/// Clipboard whose triggers are plain names and whose clicks are simulated
#[derive(Clone, Default)]
pub struct FakeClipboard {
    state: Rc<RefCell<ClipboardState>>,
}

pub struct FakeHandle {
    attachment: Rc<FakeAttachment>,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a user click on `trigger`
    pub fn click(&self, trigger: &str) {
        let live: Vec<Rc<FakeAttachment>> = self
            .state
            .borrow()
            .attachments
            .iter()
            .filter(|a| a.trigger == trigger && !a.destroyed.get())
            .cloned()
            .collect();

        for attachment in live {
            let text = (attachment.text)();

            let result = {
                let mut state = self.state.borrow_mut();
                state.attempts.push(text.clone());
                if state.fail_writes {
                    Err(CopyError::Rejected("NotAllowedError".to_string()))
                } else {
                    state.contents = Some(text.clone());
                    Ok(())
                }
            };

            let state = self.state.clone();
            let event = CopyEvent::new(text, move || state.borrow_mut().selection_clears += 1);
            attachment.listeners.borrow_mut().emit(&event, &result);
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    /// Every text a click tried to write, in order
    pub fn attempts(&self) -> Vec<String> {
        self.state.borrow().attempts.clone()
    }

    pub fn contents(&self) -> Option<String> {
        self.state.borrow().contents.clone()
    }

    pub fn selection_clears(&self) -> usize {
        self.state.borrow().selection_clears
    }

    pub fn created(&self) -> usize {
        self.state.borrow().attachments.len()
    }

    pub fn live(&self) -> usize {
        self.state.borrow().live()
    }

    /// Highest number of simultaneously live handles ever observed
    pub fn peak_live(&self) -> usize {
        self.state.borrow().peak_live
    }

    /// Container passed with the most recent attachment
    pub fn last_container(&self) -> Option<&'static str> {
        self.state.borrow().attachments.last().map(|a| a.container)
    }

    /// Whether any live handle on `trigger` still has listeners registered
    pub fn has_listeners(&self, trigger: &str) -> bool {
        self.state
            .borrow()
            .attachments
            .iter()
            .any(|a| a.trigger == trigger && !a.listeners.borrow().is_empty())
    }
}

impl ClipboardMechanism for FakeClipboard {
    type Target = &'static str;
    type Handle = FakeHandle;

    fn create(
        &self,
        trigger: &&'static str,
        options: ClipboardOptions<&'static str>,
    ) -> FakeHandle {
        let attachment = Rc::new(FakeAttachment {
            trigger: *trigger,
            container: options.container,
            text: options.text,
            listeners: RefCell::new(CopyListeners::default()),
            destroyed: Cell::new(false),
        });

        let mut state = self.state.borrow_mut();
        state.attachments.push(attachment.clone());
        let live = state.live();
        state.peak_live = state.peak_live.max(live);

        FakeHandle { attachment }
    }
}

impl ClipboardHandle for FakeHandle {
    fn on_success(&mut self, listener: SuccessListener) {
        self.attachment.listeners.borrow_mut().add_success(listener);
    }

    fn on_error(&mut self, listener: ErrorListener) {
        self.attachment.listeners.borrow_mut().add_error(listener);
    }

    fn destroy(&mut self) {
        self.attachment.destroyed.set(true);
        self.attachment.listeners.borrow_mut().clear();
    }
}

/// Copied flag recorder plus the setter to hand to a binding
pub fn copied_flag() -> (Rc<Cell<bool>>, Rc<dyn Fn(bool)>) {
    let flag = Rc::new(Cell::new(false));
    let setter = {
        let flag = flag.clone();
        Rc::new(move |value: bool| flag.set(value)) as Rc<dyn Fn(bool)>
    };
    (flag, setter)
}
