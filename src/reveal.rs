use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::config::LandingConfig;
use crate::dom;
use crate::observe::{state_for, subscribe_once, Subscription, TriggerOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Visible,
}

impl RevealState {
    /// Pending becomes Visible once; returns whether this call did it.
    pub fn reveal(&mut self) -> bool {
        match self {
            RevealState::Pending => {
                *self = RevealState::Visible;
                true
            }
            RevealState::Visible => false,
        }
    }
}

/// Milliseconds to wait after intersection before showing the element.
/// Anything missing, negative or not a number means "right away". Capped at
/// the largest delay `setTimeout` accepts.
pub fn parse_delay(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|ms| ms.is_finite() && *ms > 0.0)
        .map(|ms| ms.min(i32::MAX as f64).round() as u32)
        .unwrap_or(0)
}

pub fn setup(document: &Document, config: &LandingConfig) -> Result<Option<Subscription>, JsValue> {
    let targets = dom::query_all(document, config.reveal_selector)?;
    let mut states: Vec<_> = targets.iter().map(|t| (t.clone(), RevealState::Pending)).collect();
    let delay_attr = config.reveal_delay_attr;
    let visible_class = config.reveal_class;

    let options = TriggerOptions {
        root_margin: config.reveal_root_margin,
        threshold: Some(config.reveal_threshold),
    };
    let subscription = subscribe_once(targets, &options, move |element| {
        if !state_for(&mut states, &element).is_some_and(RevealState::reveal) {
            return;
        }
        let delay = parse_delay(element.get_attribute(delay_attr).as_deref());
        Timeout::new(delay, move || {
            let _ = element.class_list().add_1(visible_class);
        })
        .forget();
    })?;

    match &subscription {
        Some(subscription) => debug!("Watching {} elements for reveal", subscription.pending()),
        None => debug!("No reveal targets on this page"),
    }
    Ok(subscription)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::{admit, OnceRegistry};

    #[test]
    fn reveals_once() {
        let mut state = RevealState::Pending;
        assert!(state.reveal());
        assert_eq!(state, RevealState::Visible);
        assert!(!state.reveal());
        assert_eq!(state, RevealState::Visible);
    }

    #[test]
    fn stays_pending_until_it_intersects() {
        let targets = vec!["benefits", "pricing"];
        let mut registry = OnceRegistry::new(targets.clone());
        let mut states: Vec<_> = targets.iter().map(|t| (*t, RevealState::Pending)).collect();
        let mut revealed = Vec::new();

        // (target, intersecting) as the observer would report them
        let entries = [
            ("pricing", false),
            ("benefits", false),
            ("pricing", true),
            ("pricing", true),
            ("pricing", false),
        ];
        for (target, intersecting) in entries {
            if admit(&mut registry, intersecting, &target)
                && state_for(&mut states, &target).is_some_and(RevealState::reveal)
            {
                revealed.push(target);
            }
        }

        assert_eq!(revealed, vec!["pricing"]);
        assert_eq!(states, vec![("benefits", RevealState::Pending), ("pricing", RevealState::Visible)]);
    }

    #[test]
    fn huge_delays_stay_positive_for_set_timeout() {
        assert_eq!(parse_delay(Some("1e12")), i32::MAX as u32);
        assert_eq!(parse_delay(Some("2147483647")), i32::MAX as u32);
    }

    #[test]
    fn missing_delay_is_immediate() {
        assert_eq!(parse_delay(None), 0);
        assert_eq!(parse_delay(Some("")), 0);
    }

    #[test]
    fn reads_millisecond_delays() {
        assert_eq!(parse_delay(Some("200")), 200);
        assert_eq!(parse_delay(Some(" 150 ")), 150);
        assert_eq!(parse_delay(Some("99.6")), 100);
    }

    #[test]
    fn garbage_delay_falls_back_to_zero() {
        assert_eq!(parse_delay(Some("soon")), 0);
        assert_eq!(parse_delay(Some("-300")), 0);
        assert_eq!(parse_delay(Some("NaN")), 0);
    }
}
