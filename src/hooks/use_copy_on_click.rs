use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::utils::clipboard::DomClipboard;
use crate::utils::copy_binding::{CopyOnClickBinding, CopyOnClickConfig};
use crate::utils::copy_source::CopySource;
use crate::utils::timers::GlooTimers;

type DomCopyBinding = CopyOnClickBinding<DomClipboard, GlooTimers>;

/// Copy-on-click hook that turns an element into a copy trigger
///
/// Returns a signal that is `true` for `config.timeout_ms` after each successful copy.
/// The binding is recreated whenever `source`, `config` or the target element changes,
/// and torn down when the component unmounts.
///
/// # Arguments
/// * `target` - Element to listen on, usually filled from `onmounted`
/// * `source` - Text to copy; closures are called on every click
/// * `config` - Reset timeout (`0` keeps the flag off)
///
/// # Example
/// ```ignore
/// let mut target = use_signal(|| None);
/// let source = CopySource::text("npub1...");
/// let copied = use_copy_on_click(target, source, CopyOnClickConfig::default());
///
/// // In your rsx:
/// button {
///     onmounted: move |evt| target.set(mounted_element(&evt)),
///     if copied() { "Copied!" } else { "Copy" }
/// }
/// ```
pub fn use_copy_on_click(
    target: Signal<Option<web_sys::Element>>,
    source: CopySource,
    config: CopyOnClickConfig,
) -> Signal<bool> {
    let copied = use_signal(|| false);

    let binding = use_hook(|| {
        let set_copied: Rc<dyn Fn(bool)> = Rc::new(move |value: bool| {
            let mut copied = copied;
            copied.set(value);
        });
        Rc::new(RefCell::new(DomCopyBinding::new(DomClipboard, GlooTimers, set_copied)))
    });

    let binding_for_effect = binding.clone();
    use_effect(use_reactive((&source, &config), move |(source, config)| {
        // Reading the target subscribes the effect to element changes
        let element = target.cloned();
        binding_for_effect.borrow_mut().sync(element.as_ref(), source, config);
    }));

    use_drop(move || {
        binding.borrow_mut().dispose();
    });

    copied
}

/// DOM element behind an `onmounted` event
pub fn mounted_element(evt: &MountedEvent) -> Option<web_sys::Element> {
    let element = evt.data.downcast::<web_sys::Element>().cloned();
    if element.is_none() {
        log::warn!("Mounted node is not a web element, copy-on-click stays unbound");
    }
    element
}
