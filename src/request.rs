use serde_json::Value;

use crate::error::{PromptpixError, PromptpixResult};

pub const MIN_DIMENSION: i64 = 100;
pub const MAX_DIMENSION: i64 = 2048;
pub const DEFAULT_WIDTH: i64 = 1024;
pub const DEFAULT_HEIGHT: i64 = 768;

/// A validated generation request. Width and height are always within
/// [100, 2048] after construction; the prompt may be empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, width: i64, height: i64) -> Self {
        Self {
            prompt: prompt.into(),
            width: clamp_dimension(width),
            height: clamp_dimension(height),
        }
    }

    /// Extracts a request from an arbitrary JSON value, applying the
    /// leniency policy: missing or wrongly-typed prompt becomes the empty
    /// string, missing dimensions take the defaults, out-of-range
    /// dimensions are clamped. Only a dimension that cannot be read as an
    /// integer at all is an error.
    pub fn from_value(value: &Value) -> PromptpixResult<Self> {
        let prompt = value
            .get("prompt")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let width = dimension_field(value, "width", DEFAULT_WIDTH)?;
        let height = dimension_field(value, "height", DEFAULT_HEIGHT)?;
        Ok(Self::new(prompt, width, height))
    }
}

fn clamp_dimension(v: i64) -> u32 {
    v.clamp(MIN_DIMENSION, MAX_DIMENSION) as u32
}

fn dimension_field(value: &Value, name: &str, default: i64) -> PromptpixResult<i64> {
    let Some(raw) = value.get(name) else {
        return Ok(default);
    };
    match raw {
        Value::Null => Ok(default),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64() {
                Ok(f as i64)
            } else {
                Err(PromptpixError::invalid_input(format!(
                    "invalid dimension '{name}': {n}"
                )))
            }
        }
        // Numeric strings are accepted for parity with loosely typed
        // callers; anything else is a hard error.
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| {
            PromptpixError::invalid_input(format!("invalid dimension '{name}': '{s}'"))
        }),
        other => Err(PromptpixError::invalid_input(format!(
            "invalid dimension '{name}': {other}"
        ))),
    }
}

/// Response envelope for the image pipeline: success and failure are
/// mutually exclusive shapes.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum GenerationResponse {
    Ok {
        #[serde(rename = "dataUri")]
        data_uri: String,
    },
    Err {
        error: String,
    },
}
