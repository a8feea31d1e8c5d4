use thiserror::Error;
use wasm_bindgen::JsValue;

/// Reasons a particle field cannot be built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("palette color alpha must be within [0, 1], got {0}")]
    InvalidColor(String),

    #[error("particle count must be positive")]
    NoParticles,

    #[error("surface dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("radius range must satisfy 0 < min < max, got [{min}, {max})")]
    InvalidRadius { min: f64, max: f64 },

    #[error("max speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f64),

    #[error("repulsion needs a positive radius and a positive finite strength, got radius {radius}, strength {strength}")]
    InvalidRepulsion { radius: f64, strength: f64 },

    #[error("invalid field config: {0}")]
    Config(String),

    /// The host could not hand out a 2D context. Callers should skip the
    /// animation rather than fail the page.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

impl From<serde_json::Error> for FieldError {
    fn from(err: serde_json::Error) -> Self {
        FieldError::Config(err.to_string())
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
