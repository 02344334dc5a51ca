use chrono::{Datelike, Local};
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use crate::config::LandingConfig;
use crate::dom;

/// True when a box spanning `top..bottom` overlaps a viewport of `height`.
pub fn overlaps_viewport(top: f64, bottom: f64, viewport_height: f64) -> bool {
    top < viewport_height && bottom > 0.0
}

pub fn fill_footer_year(document: &Document, config: &LandingConfig) -> bool {
    match document.get_element_by_id(config.footer_year_id) {
        Some(element) => {
            element.set_text_content(Some(Local::now().year().to_string().as_str()));
            true
        }
        None => false,
    }
}

/// Sections start hidden in the stylesheet; any that scroll into view are
/// forced opaque.
pub fn watch_sections(window: &Window, document: &Document, config: &LandingConfig) -> Result<(), JsValue> {
    let selector = config.section_selector;
    let viewport = window.clone();
    let document = document.clone();

    dom::listen_passive(window, "scroll", move || {
        let height = viewport
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let Ok(sections) = dom::query_all(&document, selector) else {
            return;
        };
        for section in sections {
            let rect = section.get_bounding_client_rect();
            if !overlaps_viewport(rect.top(), rect.bottom(), height) {
                continue;
            }
            if let Some(section) = section.dyn_ref::<HtmlElement>() {
                let _ = section.style().set_property("opacity", "1");
            }
        }
    })?;

    debug!("Section visibility follows scroll");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partially_visible_counts() {
        assert!(overlaps_viewport(-200.0, 10.0, 900.0));
        assert!(overlaps_viewport(899.0, 1400.0, 900.0));
    }

    #[test]
    fn above_or_below_does_not() {
        assert!(!overlaps_viewport(-500.0, 0.0, 900.0));
        assert!(!overlaps_viewport(900.0, 1300.0, 900.0));
    }
}
