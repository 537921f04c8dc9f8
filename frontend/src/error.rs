use thiserror::Error;

#[derive(Debug, Error)]
pub enum FxError {
    /// A web-sys call threw. The `JsValue` is stringified since it can't cross threads.
    #[error("dom call failed: {0}")]
    Dom(String),

    #[error("invalid config json: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    ConfigValue(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FxError::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

pub type Result<T> = std::result::Result<T, FxError>;
