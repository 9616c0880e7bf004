//! Structured error types for stickygrid.
//!
//! Layout computation itself never fails; errors come from the host
//! (listener and timer registration), configuration, and I/O at the edges.

/// All errors that can occur in stickygrid.
#[derive(Debug, thiserror::Error)]
pub enum StickyGridError {
    /// The host surface refused an operation (listener, timer, DOM access).
    #[error("Host error: {0}")]
    Host(String),

    /// Invalid table configuration.
    #[error("Invalid config: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StickyGridError>;

impl From<String> for StickyGridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for StickyGridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<StickyGridError> for wasm_bindgen::JsValue {
    fn from(e: StickyGridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
