//! One-time clip-path capability probe.

use web_sys::Document;

use crate::geometry::ClipSupport;

/// Shape assigned during the probe; any browser with shape clipping keeps it.
const PROBE_SHAPE: &str = "polygon(50% 0%, 0% 100%, 100% 100%)";

/// Standard and vendor-prefixed clip-path property names, tried in order.
pub(crate) const CLIP_PATH_PROPERTIES: &[&str] = &[
    "clip-path",
    "-webkit-clip-path",
    "-moz-clip-path",
    "-ms-clip-path",
    "-o-clip-path",
];

/// Detect whether the environment accepts `clip-path: polygon(...)`.
///
/// A detached test element is styled with a polygon under each property
/// name; the first name that reads the value back means polygon support.
/// Any DOM failure reports [`ClipSupport::RectOnly`].
pub fn probe_clip_support(document: &Document) -> ClipSupport {
    let Ok(element) = document.create_element("div") else {
        return ClipSupport::RectOnly;
    };
    let Ok(element) = wasm_bindgen::JsCast::dyn_into::<web_sys::HtmlElement>(element) else {
        return ClipSupport::RectOnly;
    };
    let style = element.style();

    for property in CLIP_PATH_PROPERTIES {
        if style.set_property(property, PROBE_SHAPE).is_err() {
            continue;
        }
        let accepted = style
            .get_property_value(property)
            .map(|v| !v.is_empty())
            .unwrap_or(false);
        if accepted {
            tracing::debug!(property, "clip-path shapes supported");
            return ClipSupport::Polygon;
        }
    }

    tracing::debug!("clip-path shapes unsupported, using clip: rect()");
    ClipSupport::RectOnly
}
