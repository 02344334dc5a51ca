use log::Level;

/// Everything the page markup is expected to carry, plus the timings the
/// effects run with.
#[derive(Clone, Debug, PartialEq)]
pub struct LandingConfig {
    pub reveal_selector: &'static str,
    pub reveal_delay_attr: &'static str,
    pub reveal_class: &'static str,
    pub reveal_root_margin: &'static str,
    pub reveal_threshold: f64,

    pub anchor_selector: &'static str,

    pub button_selector: &'static str,
    pub ripple_duration_ms: u32,

    pub hero_image_selector: &'static str,
    pub parallax_min_width: f64,
    pub parallax_rate: f64,

    pub section_selector: &'static str,

    pub lazy_image_selector: &'static str,
    pub lazy_src_attr: &'static str,
    pub lazy_root_margin: &'static str,

    pub form_selector: &'static str,
    pub required_selector: &'static str,
    pub error_class: &'static str,

    pub carousel_id: &'static str,
    pub carousel_track_id: &'static str,
    pub carousel_dot_selector: &'static str,
    pub carousel_active_class: &'static str,
    pub carousel_slides: usize,
    pub carousel_interval_ms: u32,

    pub cta_hero_id: &'static str,
    pub cta_final_id: &'static str,

    pub footer_year_id: &'static str,

    pub preload_images: &'static [&'static str],
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            reveal_selector: "[data-animate]",
            reveal_delay_attr: "data-delay",
            reveal_class: "animate-visible",
            reveal_root_margin: "0px 0px -50px 0px",
            reveal_threshold: 0.1,

            anchor_selector: "a[href^=\"#\"]",

            button_selector: ".btn",
            ripple_duration_ms: 600,

            hero_image_selector: ".hero-image-desktop img",
            parallax_min_width: 1024.0,
            parallax_rate: 0.05,

            section_selector: ".section",

            lazy_image_selector: "img[data-src]",
            lazy_src_attr: "data-src",
            lazy_root_margin: "50px",

            form_selector: "form",
            required_selector: "[required]",
            error_class: "error",

            carousel_id: "depoimentosCarousel",
            carousel_track_id: "depoimentosTrack",
            carousel_dot_selector: ".dot",
            carousel_active_class: "active",
            carousel_slides: 6,
            carousel_interval_ms: 4000,

            cta_hero_id: "cta-hero",
            cta_final_id: "cta-final",

            footer_year_id: "year",

            preload_images: &["img/leo-hero-desktop.png", "img/leo-hero-mobile.png"],
        }
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Chatty while developing against a local page
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
