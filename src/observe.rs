//! One-time intersection subscriptions.
//!
//! Every subscribed element fires its handler at most once: the first time it
//! intersects, it is dropped from the registry and unobserved. When nothing is
//! left pending the observer disconnects itself.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Items still waiting for their one trigger.
#[derive(Debug)]
pub struct OnceRegistry<T> {
    pending: Vec<T>,
}

impl<T: PartialEq> OnceRegistry<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { pending: items }
    }

    /// Returns true exactly once per registered item.
    pub fn fire(&mut self, item: &T) -> bool {
        match self.pending.iter().position(|p| p == item) {
            Some(pos) => {
                self.pending.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self, item: &T) -> bool {
        self.pending.contains(item)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Whether an observer entry should fire its target now. Entries that are
/// not intersecting, or whose target already fired, are skipped.
pub fn admit<T: PartialEq>(registry: &mut OnceRegistry<T>, intersecting: bool, target: &T) -> bool {
    intersecting && registry.fire(target)
}

/// Per-target state kept alongside a subscription.
pub fn state_for<'a, T: PartialEq, S>(states: &'a mut [(T, S)], target: &T) -> Option<&'a mut S> {
    states
        .iter_mut()
        .find(|(item, _)| item == target)
        .map(|(_, state)| state)
}

pub struct TriggerOptions<'a> {
    pub root_margin: &'a str,
    pub threshold: Option<f64>,
}

/// Keeps the observer and its callback alive; dropping it disconnects.
pub struct Subscription {
    observer: IntersectionObserver,
    registry: Rc<RefCell<OnceRegistry<Element>>>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Subscription {
    pub fn pending(&self) -> usize {
        self.registry.borrow().len()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Observes `targets` and calls `on_fire` once for each, on its first
/// intersection. Returns `Ok(None)` when there is nothing to observe.
pub fn subscribe_once<F>(
    targets: Vec<Element>,
    options: &TriggerOptions<'_>,
    mut on_fire: F,
) -> Result<Option<Subscription>, JsValue>
where
    F: FnMut(Element) + 'static,
{
    if targets.is_empty() {
        return Ok(None);
    }

    let registry = Rc::new(RefCell::new(OnceRegistry::new(targets.clone())));
    let callback = {
        let registry = registry.clone();
        Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                if !admit(&mut *registry.borrow_mut(), entry.is_intersecting(), &target) {
                    continue;
                }
                observer.unobserve(&target);
                on_fire(target);
            }
            if registry.borrow().is_empty() {
                observer.disconnect();
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>)
    };

    let init = IntersectionObserverInit::new();
    init.set_root_margin(options.root_margin);
    if let Some(threshold) = options.threshold {
        init.set_threshold(&JsValue::from_f64(threshold));
    }
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for target in &targets {
        observer.observe(target);
    }

    Ok(Some(Subscription {
        observer,
        registry,
        _callback: callback,
    }))
}
