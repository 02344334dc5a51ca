use std::rc::Rc;

use log::debug;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};
use web_sys::{Document, Window};

use crate::config::LandingConfig;
use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cta {
    Hero,
    Final,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GtagParams {
    pub event_category: &'static str,
    pub event_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PixelParams {
    pub value: u32,
    pub currency: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PixelEvent {
    pub name: &'static str,
    pub params: Option<PixelParams>,
}

impl Cta {
    pub fn gtag_params(self) -> GtagParams {
        GtagParams {
            event_category: "CTA",
            event_label: match self {
                Cta::Hero => "Hero Button",
                Cta::Final => "Final Button",
            },
        }
    }

    pub fn pixel_event(self) -> PixelEvent {
        match self {
            Cta::Hero => PixelEvent {
                name: "InitiateCheckout",
                params: None,
            },
            Cta::Final => PixelEvent {
                name: "Purchase",
                params: Some(PixelParams {
                    value: 187,
                    currency: "BRL",
                }),
            },
        }
    }
}

/// Google tag style reporting: `gtag('event', action, params)`.
pub trait GtagSink {
    fn event(&self, action: &str, params: &GtagParams);
}

/// Meta pixel style reporting: `fbq('track', name[, params])`.
pub trait PixelSink {
    fn track(&self, event: &PixelEvent);
}

pub struct Noop;

impl GtagSink for Noop {
    fn event(&self, _action: &str, _params: &GtagParams) {}
}

impl PixelSink for Noop {
    fn track(&self, _event: &PixelEvent) {}
}

/// Looks the global up on every call; tag scripts usually load after us.
fn global_function(window: &Window, name: &str) -> Option<Function> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

pub struct WindowGtag(pub Window);

impl GtagSink for WindowGtag {
    fn event(&self, action: &str, params: &GtagParams) {
        let Some(gtag) = global_function(&self.0, "gtag") else {
            return;
        };
        let Ok(params) = serde_wasm_bindgen::to_value(params) else {
            return;
        };
        let _ = gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(action),
            &params,
        );
    }
}

pub struct WindowPixel(pub Window);

impl PixelSink for WindowPixel {
    fn track(&self, event: &PixelEvent) {
        let Some(fbq) = global_function(&self.0, "fbq") else {
            return;
        };
        let command = JsValue::from_str("track");
        let name = JsValue::from_str(event.name);
        let _ = match &event.params {
            Some(params) => match serde_wasm_bindgen::to_value(params) {
                Ok(params) => fbq.call3(&JsValue::NULL, &command, &name, &params),
                Err(_) => return,
            },
            None => fbq.call2(&JsValue::NULL, &command, &name),
        };
    }
}

#[derive(Clone)]
pub struct Notifier {
    gtag: Rc<dyn GtagSink>,
    pixel: Rc<dyn PixelSink>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self {
            gtag: Rc::new(Noop),
            pixel: Rc::new(Noop),
        }
    }
}

impl Notifier {
    pub fn new(gtag: Rc<dyn GtagSink>, pixel: Rc<dyn PixelSink>) -> Self {
        Self { gtag, pixel }
    }

    pub fn for_window(window: &Window) -> Self {
        Self::new(
            Rc::new(WindowGtag(window.clone())),
            Rc::new(WindowPixel(window.clone())),
        )
    }

    pub fn notify(&self, cta: Cta) {
        self.gtag.event("click", &cta.gtag_params());
        self.pixel.track(&cta.pixel_event());
    }
}

/// Returns how many of the two CTA buttons were found.
pub fn setup(document: &Document, config: &LandingConfig, notifier: Notifier) -> Result<usize, JsValue> {
    let mut wired = 0;
    for (id, cta) in [(config.cta_hero_id, Cta::Hero), (config.cta_final_id, Cta::Final)] {
        let Some(button) = document.get_element_by_id(id) else {
            debug!("CTA #{} not on page", id);
            continue;
        };
        let notifier = notifier.clone();
        dom::listen(&button, "click", move |_| notifier.notify(cta))?;
        wired += 1;
    }
    Ok(wired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorded {
        gtag: RefCell<Vec<(String, GtagParams)>>,
        pixel: RefCell<Vec<PixelEvent>>,
    }

    impl GtagSink for Recorded {
        fn event(&self, action: &str, params: &GtagParams) {
            self.gtag.borrow_mut().push((action.to_string(), params.clone()));
        }
    }

    impl PixelSink for Recorded {
        fn track(&self, event: &PixelEvent) {
            self.pixel.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn hero_click_reports_checkout_start() {
        let recorded = Rc::new(Recorded::default());
        let notifier = Notifier::new(recorded.clone(), recorded.clone());
        notifier.notify(Cta::Hero);

        let gtag = recorded.gtag.borrow();
        assert_eq!(gtag.len(), 1);
        assert_eq!(gtag[0].0, "click");
        assert_eq!(
            serde_json::to_value(&gtag[0].1).unwrap(),
            json!({ "event_category": "CTA", "event_label": "Hero Button" })
        );
        assert_eq!(
            *recorded.pixel.borrow(),
            vec![PixelEvent { name: "InitiateCheckout", params: None }]
        );
    }

    #[test]
    fn final_click_reports_purchase_value() {
        let recorded = Rc::new(Recorded::default());
        let notifier = Notifier::new(recorded.clone(), recorded.clone());
        notifier.notify(Cta::Final);

        assert_eq!(recorded.gtag.borrow()[0].1.event_label, "Final Button");
        let pixel = recorded.pixel.borrow();
        assert_eq!(pixel[0].name, "Purchase");
        assert_eq!(
            serde_json::to_value(pixel[0].params.as_ref().unwrap()).unwrap(),
            json!({ "value": 187, "currency": "BRL" })
        );
    }

    #[test]
    fn providers_are_independent() {
        let recorded = Rc::new(Recorded::default());
        let notifier = Notifier::new(Rc::new(Noop), recorded.clone());
        notifier.notify(Cta::Hero);

        assert!(recorded.gtag.borrow().is_empty());
        assert_eq!(recorded.pixel.borrow().len(), 1);
    }

    #[test]
    fn default_notifier_is_silent() {
        Notifier::default().notify(Cta::Final);
    }
}
