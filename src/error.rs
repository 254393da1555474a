// error.rs - Setup failures
//
// The simulation itself cannot fail. Everything here happens while mounting
// onto the page, before the first frame is scheduled.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no global window")]
    MissingWindow,

    #[error("element #{0} not found")]
    MissingElement(String),

    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    #[error("canvas has no 2d context")]
    NoContext,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("browser error: {0}")]
    Js(String),
}

impl From<JsValue> for EngineError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
