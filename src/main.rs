#![allow(non_snake_case)]

use dioxus::prelude::*;

// Modules
mod components;
mod hooks;
mod utils;

use components::CopyButton;
use utils::copy_source::CopySource;

fn main() {
    // Initialize panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }

    log::info!("Starting copy-on-click demo");

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let mut draft = use_signal(|| String::from("hello"));

    // Created once so the binding isn't rebuilt on every keystroke
    let draft_source = use_hook(|| CopySource::from_fn(move || draft.peek().to_string()));

    rsx! {
        main {
            class: "max-w-xl mx-auto p-6 flex flex-col gap-6",

            h1 { class: "text-2xl font-bold", "Copy on click" }

            section {
                class: "flex items-center gap-3",
                code { class: "px-2 py-1 rounded bg-muted", "cargo install dioxus-cli" }
                CopyButton {
                    source: CopySource::text("cargo install dioxus-cli"),
                }
            }

            section {
                class: "flex items-center gap-3",
                input {
                    class: "flex-1 px-3 py-2 rounded-lg border border-border bg-background",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                }
                CopyButton {
                    source: draft_source.clone(),
                    label: "Copy text",
                    timeout_ms: 1500,
                }
            }
        }
    }
}
