use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::config::LandingConfig;
use crate::dom;

pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Outcome of checking a form's required fields, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub invalid: Vec<bool>,
}

impl Verdict {
    pub fn check<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        Self {
            invalid: values.into_iter().map(is_blank).collect(),
        }
    }

    pub fn allows_submit(&self) -> bool {
        !self.invalid.iter().any(|bad| *bad)
    }
}

fn field_value(field: &Element) -> Option<String> {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        Some(area.value())
    } else {
        field.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
    }
}

pub fn setup(document: &Document, config: &LandingConfig) -> Result<usize, JsValue> {
    let forms = dom::query_all(document, config.form_selector)?;
    let count = forms.len();
    let required_selector = config.required_selector;
    let error_class = config.error_class;

    for form in forms {
        let root = form.clone();
        dom::listen(&form, "submit", move |event| {
            let Ok(fields) = dom::query_all_in(&root, required_selector) else {
                return;
            };
            let values: Vec<Option<String>> = fields.iter().map(field_value).collect();
            let verdict = Verdict::check(values.iter().map(|v| v.as_deref()));

            for (field, invalid) in fields.iter().zip(&verdict.invalid) {
                let classes = field.class_list();
                let _ = if *invalid {
                    classes.add_1(error_class)
                } else {
                    classes.remove_1(error_class)
                };
            }

            if !verdict.allows_submit() {
                debug!("Blocked submit, required fields empty");
                event.prevent_default();
            }
        })?;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_counts_as_empty() {
        assert!(is_blank(Some("   \t")));
        assert!(is_blank(None));
        assert!(!is_blank(Some(" a ")));
    }

    #[test]
    fn empty_email_blocks_and_only_email_is_marked() {
        let fields = [("email", ""), ("name", "Ana Souza")];
        let verdict = Verdict::check(fields.iter().map(|(_, v)| Some(*v)));

        assert!(!verdict.allows_submit());
        let marked: Vec<&str> = fields
            .iter()
            .zip(&verdict.invalid)
            .filter(|(_, bad)| **bad)
            .map(|((name, _), _)| *name)
            .collect();
        assert_eq!(marked, vec!["email"]);
    }

    #[test]
    fn all_filled_submits_and_clears_marks() {
        let verdict = Verdict::check([Some("ana@example.com"), Some("Ana")]);
        assert!(verdict.allows_submit());
        assert_eq!(verdict.invalid, vec![false, false]);
    }

    #[test]
    fn no_required_fields_submits() {
        assert!(Verdict::check(std::iter::empty()).allows_submit());
    }
}
