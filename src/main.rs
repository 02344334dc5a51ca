use std::cell::RefCell;

use log::{debug, info, warn};
use wasm_bindgen::JsValue;

mod analytics;
mod anchors;
mod carousel;
mod config;
mod dom;
mod forms;
mod lazy_images;
mod observe;
mod page;
mod preload;
mod reveal;
mod effects {
    pub mod parallax;
    pub mod ripple;
}

use analytics::Notifier;
use carousel::PageCarousel;
use config::LandingConfig;
use observe::Subscription;

/// Handles that have to outlive `boot` for the page to keep working.
struct Page {
    _reveal: Option<Subscription>,
    _lazy_images: Option<Subscription>,
    _carousel: Option<PageCarousel>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Components that failed to set up. One broken component shouldn't take the
/// rest of the page down with it.
#[derive(Debug, Default)]
struct BootReport {
    failed: Vec<&'static str>,
}

impl BootReport {
    fn record<T, E>(&mut self, component: &'static str, result: Result<T, E>) -> Result<T, E> {
        if result.is_err() {
            self.failed.push(component);
        }
        result
    }

    fn report<T>(&mut self, component: &'static str, result: Result<T, JsValue>) -> Option<T> {
        match self.record(component, result) {
            Ok(value) => Some(value),
            Err(err) => {
                gloo_console::error!(format!("Failed to set up {}", component), err);
                None
            }
        }
    }

    fn all_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

fn boot(mut report: BootReport) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let config = LandingConfig::default();

    let reveal = report.report("reveal", reveal::setup(&document, &config)).flatten();
    report.report("anchors", anchors::setup(&document, &config));
    report.report("ripple", effects::ripple::setup(&document, &config));
    report.report("parallax", effects::parallax::setup(&window, &document, &config));
    report.report("sections", page::watch_sections(&window, &document, &config));
    let lazy_images = report.report("lazy images", lazy_images::setup(&document, &config)).flatten();
    report.report("forms", forms::setup(&document, &config));

    let carousel = report.report("carousel", carousel::setup(&document, &config)).flatten();
    if let Some(carousel) = &carousel {
        debug!(
            "Carousel on slide {} ({}%), autoplay {}",
            carousel.current_index(),
            carousel.offset_percent(),
            carousel.is_autoplaying()
        );
    }

    let notifier = Notifier::for_window(&window);
    if let Some(wired) = report.report("analytics", analytics::setup(&document, &config, notifier)) {
        debug!("Tracking {} CTA buttons", wired);
    }

    if !page::fill_footer_year(&document, &config) {
        debug!("No footer year slot");
    }
    report.report("preload", preload::preload_images(&document, config.preload_images));

    PAGE.with(|page| {
        *page.borrow_mut() = Some(Page {
            _reveal: reveal,
            _lazy_images: lazy_images,
            _carousel: carousel,
        });
    });

    if report.all_ok() {
        info!("🚀 Landing page loaded");
    } else {
        warn!("Landing page loaded without: {}", report.failed.join(", "));
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let mut report = BootReport::default();
    report.report("keyframes", preload::inject_keyframes(&document));

    if document.ready_state() == "loading" {
        let listening = dom::listen(&document, "DOMContentLoaded", move |_| {
            boot(std::mem::take(&mut report))
        });
        if let Err(err) = listening {
            gloo_console::error!("Failed to wait for DOMContentLoaded", err);
        }
    } else {
        boot(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_boot_has_no_failures() {
        let mut report = BootReport::default();
        assert_eq!(report.record("reveal", Ok::<_, ()>(3)), Ok(3));
        assert_eq!(report.record("forms", Ok::<_, ()>(())), Ok(()));
        assert!(report.all_ok());
    }

    #[test]
    fn any_failure_spoils_the_boot() {
        let mut report = BootReport::default();
        let _ = report.record("reveal", Ok::<_, &str>(()));
        let _ = report.record("carousel", Err::<(), _>("track is not an HtmlElement"));
        let _ = report.record("forms", Ok::<_, &str>(()));
        assert!(!report.all_ok());
        assert_eq!(report.failed, vec!["carousel"]);
    }
}
