pub mod use_copy_on_click;

pub use use_copy_on_click::{mounted_element, use_copy_on_click};
