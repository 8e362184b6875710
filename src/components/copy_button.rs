use dioxus::prelude::*;

use crate::components::icons::{CheckIcon, CopyIcon};
use crate::hooks::{mounted_element, use_copy_on_click};
use crate::utils::copy_binding::{CopyOnClickConfig, DEFAULT_RESET_TIMEOUT_MS};
use crate::utils::copy_source::CopySource;

const DEFAULT_BUTTON_CLASS: &str =
    "px-4 py-2 bg-accent hover:bg-accent/80 rounded-lg transition flex items-center justify-center gap-2";

/// A button that copies text to clipboard with visual feedback
#[component]
pub fn CopyButton(
    /// What to copy when clicked
    #[props(into)]
    source: CopySource,
    /// Button label (shown before copy)
    #[props(into, default = "Copy to clipboard".to_string())]
    label: String,
    /// Label shown while the copied flag is set
    #[props(into, default = "Copied!".to_string())]
    copied_label: String,
    /// How long to show `copied_label`; `0` never shows it
    #[props(default = DEFAULT_RESET_TIMEOUT_MS)]
    timeout_ms: u32,
    #[props(default = DEFAULT_BUTTON_CLASS.to_string())]
    class: String,
) -> Element {
    let mut target = use_signal(|| None);
    let copied = use_copy_on_click(target, source, CopyOnClickConfig::with_timeout(timeout_ms));

    rsx! {
        button {
            r#type: "button",
            class: "{class}",
            onmounted: move |evt| target.set(mounted_element(&evt)),
            if *copied.read() {
                CheckIcon { class: "w-4 h-4 text-green-500".to_string() }
                span { "{copied_label}" }
            } else {
                CopyIcon { class: "w-4 h-4".to_string() }
                span { "{label}" }
            }
        }
    }
}
