use std::mem;

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlImageElement};

use crate::config::LandingConfig;
use crate::dom;
use crate::observe::{state_for, subscribe_once, Subscription, TriggerOptions};

#[derive(Debug, Clone, PartialEq)]
pub enum LazyImage {
    Pending(String),
    Loaded,
}

impl LazyImage {
    pub fn from_attr(deferred: Option<String>) -> Self {
        match deferred {
            Some(src) if !src.is_empty() => LazyImage::Pending(src),
            _ => LazyImage::Loaded,
        }
    }

    /// Hands out the real source the first time, nothing afterwards.
    pub fn load(&mut self) -> Option<String> {
        match mem::replace(self, LazyImage::Loaded) {
            LazyImage::Pending(src) => Some(src),
            LazyImage::Loaded => None,
        }
    }
}

fn swap_in_source(element: &Element, image: &mut LazyImage, deferred_attr: &str) {
    let Some(src) = image.load() else {
        return;
    };
    match element.dyn_ref::<HtmlImageElement>() {
        Some(img) => img.set_src(&src),
        None => {
            let _ = element.set_attribute("src", &src);
        }
    }
    let _ = element.remove_attribute(deferred_attr);
}

pub fn setup(document: &Document, config: &LandingConfig) -> Result<Option<Subscription>, JsValue> {
    let images = dom::query_all(document, config.lazy_image_selector)?;
    let deferred_attr = config.lazy_src_attr;
    // one state per image for the page's life; `load` hands the source out once
    let mut states: Vec<(Element, LazyImage)> = images
        .iter()
        .map(|img| (img.clone(), LazyImage::from_attr(img.get_attribute(deferred_attr))))
        .collect();

    let options = TriggerOptions {
        root_margin: config.lazy_root_margin,
        threshold: None,
    };
    let subscription = subscribe_once(images, &options, move |element| {
        if let Some(image) = state_for(&mut states, &element) {
            swap_in_source(&element, image, deferred_attr);
        }
    })?;

    if let Some(subscription) = &subscription {
        debug!("Deferring {} images", subscription.pending());
    }
    Ok(subscription)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::{admit, OnceRegistry};

    #[test]
    fn source_assigned_only_after_proximity() {
        let mut registry = OnceRegistry::new(vec!["hero", "footer"]);
        let mut states = vec![
            ("hero", LazyImage::from_attr(Some("img/hero.webp".to_string()))),
            ("footer", LazyImage::from_attr(Some("img/footer.webp".to_string()))),
        ];
        let mut assigned = Vec::new();

        for (target, near) in [("footer", false), ("hero", true), ("hero", true), ("footer", false)] {
            if !admit(&mut registry, near, &target) {
                continue;
            }
            if let Some(src) = state_for(&mut states, &target).and_then(LazyImage::load) {
                assigned.push(src);
            }
        }

        assert_eq!(assigned, vec!["img/hero.webp".to_string()]);
        assert_eq!(states[0].1, LazyImage::Loaded);
        assert!(matches!(states[1].1, LazyImage::Pending(_)));
    }

    #[test]
    fn loads_exactly_once() {
        let mut image = LazyImage::from_attr(Some("img/contract-preview.webp".to_string()));
        assert_eq!(image.load().as_deref(), Some("img/contract-preview.webp"));
        assert_eq!(image, LazyImage::Loaded);
        assert_eq!(image.load(), None);
    }

    #[test]
    fn nothing_deferred_means_nothing_to_load() {
        assert_eq!(LazyImage::from_attr(None).load(), None);
        assert_eq!(LazyImage::from_attr(Some(String::new())).load(), None);
    }
}
