use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::config::LandingConfig;
use crate::dom;

/// Id an in-page link points at, if it points at anything.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn setup(document: &Document, config: &LandingConfig) -> Result<usize, JsValue> {
    let anchors = dom::query_all(document, config.anchor_selector)?;
    let count = anchors.len();

    for anchor in anchors {
        let document = document.clone();
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(target) = fragment_id(&href).and_then(|id| document.get_element_by_id(id)) else {
                return;
            };
            event.prevent_default();

            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        })?;
    }

    debug!("Smooth scrolling {} anchor links", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_the_hash() {
        assert_eq!(fragment_id("#pricing"), Some("pricing"));
    }

    #[test]
    fn bare_hash_has_no_target() {
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("/about"), None);
    }
}
