//! Text source for copy actions
//!
//! A copy source is either a fixed string or a closure that produces the
//! text when a copy is triggered. Closures are never called ahead of time.

use std::fmt;
use std::rc::Rc;

/// What gets written to the clipboard when a copy is triggered
#[derive(Clone)]
pub enum CopySource {
    /// Fixed text
    Text(String),
    /// Text produced at copy time
    Dynamic(Rc<dyn Fn() -> String>),
}

impl CopySource {
    /// Fixed text source
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Source that calls `producer` every time a copy is triggered
    pub fn from_fn<F>(producer: F) -> Self
    where
        F: Fn() -> String + 'static,
    {
        Self::Dynamic(Rc::new(producer))
    }

    /// Get the text to copy right now
    pub fn resolve(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Dynamic(producer) => producer(),
        }
    }
}

impl Default for CopySource {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Texts compare by value, closures by identity
impl PartialEq for CopySource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Dynamic(a), Self::Dynamic(b)) => {
                Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl fmt::Debug for CopySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for CopySource {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for CopySource {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for CopySource {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}
