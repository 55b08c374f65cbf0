//! Background image discovery and preloading.

use gloo::events::EventListener;
use web_sys::{HtmlElement, HtmlImageElement, Window};

use crate::error::FragmentsError;

/// Extract the URL from a CSS `background-image` value.
///
/// Accepts `url(a.jpg)`, `url("a.jpg")` and `url('a.jpg')`. Returns `None`
/// for `none`, empty values, and anything that is not a single `url()`.
pub fn background_image_url(css: &str) -> Option<String> {
    let inner = css.trim().strip_prefix("url(")?.strip_suffix(')')?.trim();
    let unquoted = inner
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| inner.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(inner);
    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}

/// Source image of the host: inline style first, computed style second.
pub(crate) fn host_image_src(window: &Window, host: &HtmlElement) -> Result<String, FragmentsError> {
    let inline = host.style().get_property_value("background-image")?;
    if let Some(url) = background_image_url(&inline) {
        return Ok(url);
    }
    let computed = window
        .get_computed_style(host)?
        .map(|style| style.get_property_value("background-image"))
        .transpose()?
        .unwrap_or_default();
    background_image_url(&computed).ok_or(FragmentsError::NoBackgroundImage)
}

/// Load `src` in a detached image and call exactly one of the callbacks.
///
/// The returned listeners must be kept alive until the load settles.
pub(crate) fn preload(
    src: &str,
    on_load: impl FnOnce() + 'static,
    on_error: impl FnOnce() + 'static,
) -> Result<Vec<EventListener>, FragmentsError> {
    let img = HtmlImageElement::new()?;
    let load = EventListener::once(&img, "load", move |_| on_load());
    let error = EventListener::once(&img, "error", move |_| on_error());
    img.set_src(src);
    Ok(vec![load, error])
}
