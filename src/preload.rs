use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlLinkElement};

pub const KEYFRAMES: &str = r#"
  @keyframes ripple {
    to {
      transform: scale(4);
      opacity: 0;
    }
  }

  @keyframes pulse {
    0%, 100% {
      opacity: 1;
    }
    50% {
      opacity: 0.5;
    }
  }
"#;

/// The ripple effect animates with these, so they go in before anything else.
pub fn inject_keyframes(document: &Document) -> Result<(), JsValue> {
    let Some(head) = document.head() else {
        return Ok(());
    };
    let style = document.create_element("style")?;
    style.set_text_content(Some(KEYFRAMES));
    head.append_child(&style)?;
    Ok(())
}

pub fn preload_images(document: &Document, paths: &[&str]) -> Result<usize, JsValue> {
    let Some(head) = document.head() else {
        return Ok(0);
    };
    for href in paths {
        let link: HtmlLinkElement = document.create_element("link")?.dyn_into()?;
        link.set_rel("preload");
        link.set_as("image");
        link.set_href(href);
        head.append_child(&link)?;
    }
    Ok(paths.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ships_both_animations() {
        assert!(KEYFRAMES.contains("@keyframes ripple"));
        assert!(KEYFRAMES.contains("@keyframes pulse"));
        assert!(KEYFRAMES.contains("scale(4)"));
    }
}
