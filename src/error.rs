// Error types for the particle backdrop.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while binding the animator to the page or loading its config.
#[derive(Debug, Error)]
pub enum Error {
    /// No global `window` (not running in a browser main thread)
    #[error("no global window available")]
    NoWindow,

    /// The window has no document
    #[error("window has no document")]
    NoDocument,

    /// No element with the requested id
    #[error("no element with id '{0}'")]
    ElementNotFound(String),

    /// The element exists but is not a `<canvas>`
    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),

    /// The canvas refused to hand out a 2d context
    #[error("canvas 2d context unavailable")]
    ContextUnavailable,

    /// Malformed JSON configuration
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// A browser API call threw
    #[error("javascript error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
