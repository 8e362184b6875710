//! Clipboard utilities for copying text
//!
//! Defines the contract a copy-on-click binding relies on (attach to a
//! trigger element, report success or failure, detach) and provides the
//! browser implementation on top of the Web Clipboard API, with an
//! `execCommand("copy")` fallback for insecure contexts.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Inline style for the off-screen textarea used by the fallback copy path
///
/// `top` is the current scroll offset so selecting the textarea doesn't scroll the page.
fn fallback_textarea_style(top: f64) -> String {
    format!(
        "position: absolute; left: -9999px; top: {}px; font-size: 12pt; border: 0; padding: 0; margin: 0;",
        top.max(0.0).round()
    )
}

/// Errors that can occur while writing to the clipboard
#[derive(Debug, Clone, PartialEq)]
pub enum CopyError {
    /// No `window` (not running in a browser)
    NoWindow,
    /// No `document` on the window
    NoDocument,
    /// The browser rejected the write
    Rejected(String),
    /// `execCommand("copy")` reported failure
    CommandRejected,
    /// Neither copy path is available
    Unsupported,
}

impl CopyError {
    fn from_js(value: JsValue) -> Self {
        Self::Rejected(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "No window"),
            Self::NoDocument => write!(f, "No document"),
            Self::Rejected(reason) => write!(f, "Clipboard write rejected: {}", reason),
            Self::CommandRejected => write!(f, "Copy command was not executed"),
            Self::Unsupported => write!(f, "Clipboard is not supported in this context"),
        }
    }
}

impl std::error::Error for CopyError {}

/// Outcome of a copy attempt, handed to success/error listeners
#[derive(Clone)]
pub struct CopyEvent {
    /// The text that was (or was meant to be) copied
    pub text: String,
    clear_selection: Rc<dyn Fn()>,
}

impl CopyEvent {
    pub fn new<F>(text: String, clear_selection: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self {
            text,
            clear_selection: Rc::new(clear_selection),
        }
    }

    /// Drop the selection made for the copy and give focus back to the trigger
    pub fn clear_selection(&self) {
        (self.clear_selection)();
    }
}

impl fmt::Debug for CopyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyEvent").field("text", &self.text).finish_non_exhaustive()
    }
}

pub type SuccessListener = Box<dyn FnMut(&CopyEvent)>;
pub type ErrorListener = Box<dyn FnMut(&CopyEvent, &CopyError)>;

/// Options for attaching a clipboard handle
pub struct ClipboardOptions<E> {
    /// Called on every click to get the text to copy
    pub text: Rc<dyn Fn() -> String>,
    /// Element hosting temporary selection nodes
    pub container: E,
}

/// A live click-to-copy attachment
pub trait ClipboardHandle {
    fn on_success(&mut self, listener: SuccessListener);

    fn on_error(&mut self, listener: ErrorListener);

    /// Detach from the trigger and release all listeners
    fn destroy(&mut self);
}

/// Something that can turn an element into a click-to-copy trigger
pub trait ClipboardMechanism {
    type Target: Clone + 'static;
    type Handle: ClipboardHandle;

    fn create(
        &self,
        trigger: &Self::Target,
        options: ClipboardOptions<Self::Target>,
    ) -> Self::Handle;
}

/// Registered success/error listeners of one handle
#[derive(Default)]
pub struct CopyListeners {
    success: Vec<SuccessListener>,
    error: Vec<ErrorListener>,
}

impl CopyListeners {
    pub fn add_success(&mut self, listener: SuccessListener) {
        self.success.push(listener);
    }

    pub fn add_error(&mut self, listener: ErrorListener) {
        self.error.push(listener);
    }

    /// Notify listeners in registration order
    pub fn emit(&mut self, event: &CopyEvent, result: &Result<(), CopyError>) {
        match result {
            Ok(()) => {
                for listener in self.success.iter_mut() {
                    listener(event);
                }
            }
            Err(err) => {
                for listener in self.error.iter_mut() {
                    listener(event, err);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.success.clear();
        self.error.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.success.is_empty() && self.error.is_empty()
    }
}

/// Copy text to the system clipboard
///
/// Uses the Web Clipboard API to copy the provided text.
///
/// # Arguments
/// * `text` - The text to copy to the clipboard
///
/// # Returns
/// * `Ok(())` if the text was successfully copied
/// * `Err(CopyError)` if the operation failed
pub async fn copy_to_clipboard(text: &str) -> Result<(), CopyError> {
    let window = web_sys::window().ok_or(CopyError::NoWindow)?;
    let navigator = window.navigator();
    let clipboard = navigator.clipboard();
    wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(CopyError::from_js)
}

/// Copy by selecting a hidden textarea inside `container` and running `execCommand("copy")`
fn copy_with_selection(text: &str, container: &web_sys::Element) -> Result<(), CopyError> {
    let window = web_sys::window().ok_or(CopyError::NoWindow)?;
    let document = window.document().ok_or(CopyError::NoDocument)?;

    let textarea = document
        .create_element("textarea")
        .map_err(CopyError::from_js)?
        .dyn_into::<web_sys::HtmlTextAreaElement>()
        .map_err(|_| CopyError::Unsupported)?;
    textarea.set_value(text);
    textarea.set_attribute("readonly", "").map_err(CopyError::from_js)?;
    let style = fallback_textarea_style(window.scroll_y().unwrap_or(0.0));
    textarea.set_attribute("style", &style).map_err(CopyError::from_js)?;

    container.append_child(&textarea).map_err(CopyError::from_js)?;
    textarea.select();

    let result = match document.dyn_ref::<web_sys::HtmlDocument>() {
        Some(html_document) => match html_document.exec_command("copy") {
            Ok(true) => Ok(()),
            Ok(false) => Err(CopyError::CommandRejected),
            Err(e) => Err(CopyError::from_js(e)),
        },
        None => Err(CopyError::Unsupported),
    };

    textarea.remove();
    result
}

/// Write `text` using the best available path
pub async fn write_text(text: &str, container: &web_sys::Element) -> Result<(), CopyError> {
    let window = web_sys::window().ok_or(CopyError::NoWindow)?;

    if window.is_secure_context() {
        match copy_to_clipboard(text).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                log::debug!("Async clipboard write failed, falling back to execCommand: {}", e)
            }
        }
    }

    copy_with_selection(text, container)
}

/// Focus the trigger and drop any window selection
fn clear_selection(trigger: &web_sys::Element) {
    if let Some(element) = trigger.dyn_ref::<web_sys::HtmlElement>() {
        let _ = element.focus();
    }

    if let Some(selection) = web_sys::window().and_then(|w| w.get_selection().ok().flatten()) {
        let _ = selection.remove_all_ranges();
    }
}

/// Report a finished write unless the handle was destroyed while it ran
///
/// Returns whether listeners were notified.
fn finish_copy(
    destroyed: &Cell<bool>,
    listeners: &RefCell<CopyListeners>,
    event: &CopyEvent,
    result: &Result<(), CopyError>,
) -> bool {
    if destroyed.get() {
        return false;
    }

    listeners.borrow_mut().emit(event, result);
    true
}

/// Browser click-to-copy mechanism
#[derive(Clone, Copy, Debug, Default)]
pub struct DomClipboard;

impl ClipboardMechanism for DomClipboard {
    type Target = web_sys::Element;
    type Handle = DomClipboardHandle;

    fn create(
        &self,
        trigger: &web_sys::Element,
        options: ClipboardOptions<web_sys::Element>,
    ) -> DomClipboardHandle {
        let listeners = Rc::new(RefCell::new(CopyListeners::default()));
        let destroyed = Rc::new(Cell::new(false));

        let on_click = {
            let trigger = trigger.clone();
            let listeners = listeners.clone();
            let destroyed = destroyed.clone();
            let ClipboardOptions { text, container } = options;

            Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                if destroyed.get() {
                    return;
                }

                let text = text();
                let trigger = trigger.clone();
                let container = container.clone();
                let listeners = listeners.clone();
                let destroyed = destroyed.clone();

                wasm_bindgen_futures::spawn_local(async move {
                    let result = write_text(&text, &container).await;
                    let event = CopyEvent::new(text, move || clear_selection(&trigger));
                    finish_copy(&destroyed, &listeners, &event, &result);
                });
            })
        };

        if let Err(e) =
            trigger.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        {
            log::error!("Failed to attach copy click listener: {:?}", e);
        }

        DomClipboardHandle {
            trigger: trigger.clone(),
            on_click: Some(on_click),
            listeners,
            destroyed,
        }
    }
}

/// Click listener attached by [`DomClipboard`]
pub struct DomClipboardHandle {
    trigger: web_sys::Element,
    on_click: Option<Closure<dyn FnMut(web_sys::Event)>>,
    listeners: Rc<RefCell<CopyListeners>>,
    destroyed: Rc<Cell<bool>>,
}

impl ClipboardHandle for DomClipboardHandle {
    fn on_success(&mut self, listener: SuccessListener) {
        self.listeners.borrow_mut().add_success(listener);
    }

    fn on_error(&mut self, listener: ErrorListener) {
        self.listeners.borrow_mut().add_error(listener);
    }

    fn destroy(&mut self) {
        self.destroyed.set(true);

        if let Some(on_click) = self.on_click.take() {
            if let Err(e) = self
                .trigger
                .remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            {
                log::warn!("Failed to detach copy click listener: {:?}", e);
            }
        }

        self.listeners.borrow_mut().clear();
    }
}

impl Drop for DomClipboardHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}
