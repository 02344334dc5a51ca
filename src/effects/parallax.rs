use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use crate::config::LandingConfig;
use crate::dom;

/// Only wide (desktop) viewports get the effect.
pub fn enabled_for(viewport_width: f64, min_width: f64) -> bool {
    viewport_width > min_width
}

pub fn offset(scroll_y: f64, rate: f64) -> f64 {
    scroll_y * rate
}

/// Returns whether the effect was installed. Decided once at load; later
/// resizes don't switch it on or off.
pub fn setup(window: &Window, document: &Document, config: &LandingConfig) -> Result<bool, JsValue> {
    let Some(image) = document.query_selector(config.hero_image_selector)? else {
        debug!("No hero image, parallax off");
        return Ok(false);
    };
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    if !enabled_for(width, config.parallax_min_width) {
        debug!("Viewport {}px too narrow for parallax", width);
        return Ok(false);
    }

    let image: HtmlElement = image.dyn_into()?;
    let rate = config.parallax_rate;
    let scroller = window.clone();
    dom::listen_passive(window, "scroll", move || {
        let scrolled = scroller.scroll_y().unwrap_or(0.0);
        let _ = image
            .style()
            .set_property("transform", &format!("translateY({}px)", offset(scrolled, rate)));
    })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_only() {
        assert!(!enabled_for(800.0, 1024.0));
        assert!(!enabled_for(1024.0, 1024.0));
        assert!(enabled_for(1025.0, 1024.0));
    }

    #[test]
    fn moves_a_twentieth_of_the_scroll() {
        assert_eq!(offset(0.0, 0.05), 0.0);
        assert_eq!(offset(1000.0, 0.05), 50.0);
    }
}
