//! Errors from building the widget around the layout engine.
//!
//! Geometry itself never fails; these cover option parsing and the host
//! environment.

use alloc::string::String;

/// Widget setup error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FragmentsError {
    /// Options could not be parsed into a configuration.
    #[error("invalid fragment options: {0}")]
    InvalidOptions(String),
    /// No global `window` (not running in a browser main thread).
    #[error("no window available")]
    NoWindow,
    /// The window has no document.
    #[error("no document available")]
    NoDocument,
    /// The host element has no `background-image` URL to fragment.
    #[error("element has no background image")]
    NoBackgroundImage,
    /// A DOM call threw.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

#[cfg(feature = "web")]
impl From<wasm_bindgen::JsValue> for FragmentsError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(
            value
                .as_string()
                .unwrap_or_else(|| alloc::format!("{value:?}")),
        )
    }
}

#[cfg(feature = "web")]
impl From<FragmentsError> for wasm_bindgen::JsValue {
    fn from(err: FragmentsError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
