// Utility functions
// Clipboard, timers and the copy-on-click binding they feed

pub mod clipboard;
pub mod copy_binding;
pub mod copy_source;
pub mod timers;

#[cfg(test)]
pub mod testing;
