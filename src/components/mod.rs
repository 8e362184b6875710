// UI Components

pub mod copy_button;
pub mod icons;

pub use copy_button::CopyButton;
