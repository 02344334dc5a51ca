use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::config::LandingConfig;
use crate::dom;

const RIPPLE_STYLE: &str = "position: absolute; \
    background: rgba(255, 255, 255, 0.3); \
    border-radius: 50%; \
    transform: scale(0); \
    animation: ripple 0.6s linear; \
    pointer-events: none;";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Square overlay centred on the pointer, in px relative to the button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    pub fn new(bounds: Bounds, pointer_x: f64, pointer_y: f64) -> Self {
        let size = bounds.width.max(bounds.height);
        Self {
            size,
            left: pointer_x - bounds.left - size / 2.0,
            top: pointer_y - bounds.top - size / 2.0,
        }
    }
}

fn spawn_ripple(document: &Document, button: &Element, event: &MouseEvent, duration_ms: u32) -> Result<(), JsValue> {
    let rect = button.get_bounding_client_rect();
    let geometry = RippleGeometry::new(
        Bounds {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        },
        event.client_x() as f64,
        event.client_y() as f64,
    );

    let ripple: HtmlElement = document.create_element("span")?.dyn_into()?;
    ripple.set_attribute("style", RIPPLE_STYLE)?;
    let style = ripple.style();
    style.set_property("width", &format!("{}px", geometry.size))?;
    style.set_property("height", &format!("{}px", geometry.size))?;
    style.set_property("left", &format!("{}px", geometry.left))?;
    style.set_property("top", &format!("{}px", geometry.top))?;
    button.append_child(&ripple)?;

    Timeout::new(duration_ms, move || ripple.remove()).forget();
    Ok(())
}

pub fn setup(document: &Document, config: &LandingConfig) -> Result<usize, JsValue> {
    let buttons = dom::query_all(document, config.button_selector)?;
    let count = buttons.len();
    let duration_ms = config.ripple_duration_ms;

    for button in buttons {
        let document = document.clone();
        let target = button.clone();
        dom::listen(&button, "click", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let _ = spawn_ripple(&document, &target, event, duration_ms);
            }
        })?;
    }

    debug!("Ripple attached to {} buttons", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sized_by_the_longer_side() {
        let bounds = Bounds { left: 0.0, top: 0.0, width: 240.0, height: 48.0 };
        assert_eq!(RippleGeometry::new(bounds, 0.0, 0.0).size, 240.0);

        let tall = Bounds { left: 0.0, top: 0.0, width: 40.0, height: 90.0 };
        assert_eq!(RippleGeometry::new(tall, 0.0, 0.0).size, 90.0);
    }

    #[test]
    fn centred_on_the_pointer() {
        let bounds = Bounds { left: 100.0, top: 300.0, width: 200.0, height: 50.0 };
        let geometry = RippleGeometry::new(bounds, 150.0, 320.0);
        assert_eq!(geometry.left, 150.0 - 100.0 - 100.0);
        assert_eq!(geometry.top, 320.0 - 300.0 - 100.0);
        // centre of the overlay lands on the click
        assert_eq!(bounds.left + geometry.left + geometry.size / 2.0, 150.0);
        assert_eq!(bounds.top + geometry.top + geometry.size / 2.0, 320.0);
    }
}
