use image::RgbaImage;
use serde_json::Value;
use tracing::debug;

use crate::{
    canvas::Canvas,
    compose,
    encode::to_png_data_uri,
    error::{PromptpixError, PromptpixResult},
    font::FontStack,
    request::{GenerationRequest, GenerationResponse},
    seed::derive_seed,
};

/// Runs the four compositor stages for a validated request and returns the
/// finished raster. Everything downstream of the seed is request-local.
pub fn generate(req: &GenerationRequest) -> PromptpixResult<RgbaImage> {
    let seed = derive_seed(&req.prompt);
    debug!(seed, width = req.width, height = req.height, "generating");

    let fonts = FontStack::locate();
    let mut canvas = Canvas::new(req.width, req.height);
    compose::paint_gradient(&mut canvas);
    compose::paint_shapes(&mut canvas, seed);
    compose::paint_subject(&mut canvas, &req.prompt, &fonts);
    compose::paint_caption(&mut canvas, &req.prompt, &fonts);
    Ok(canvas.into_image())
}

pub fn generate_data_uri(req: &GenerationRequest) -> PromptpixResult<String> {
    let img = generate(req)?;
    to_png_data_uri(&img)
}

/// Top-level image request handler: one raw JSON payload in, one JSON
/// envelope out. Every failure mode is folded into the `{"error": ...}`
/// shape; this function cannot return non-JSON.
pub fn handle_image_request(raw: &str) -> String {
    let response = match process_image_request(raw) {
        Ok(data_uri) => GenerationResponse::Ok { data_uri },
        Err(e) => GenerationResponse::Err {
            error: e.to_string(),
        },
    };
    // The envelope contains only strings; serialization cannot fail.
    serde_json::to_string(&response)
        .unwrap_or_else(|e| format!(r#"{{"error":"response encode: {e}"}}"#))
}

fn process_image_request(raw: &str) -> PromptpixResult<String> {
    let value: Value = if raw.trim().is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_str(raw)
            .map_err(|e| PromptpixError::invalid_input(format!("malformed JSON: {e}")))?
    };
    let req = GenerationRequest::from_value(&value)?;
    generate_data_uri(&req)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_respects_clamped_dimensions() {
        let req = GenerationRequest::new("x", 5, 5000);
        let img = generate(&req).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 2048);
    }

    #[test]
    fn empty_input_is_treated_as_defaults() {
        let out = handle_image_request("");
        assert!(out.starts_with(r#"{"dataUri":"data:image/png;base64,"#));
    }

    #[test]
    fn malformed_json_becomes_error_envelope() {
        let out = handle_image_request("{not json");
        let v: Value = serde_json::from_str(&out).unwrap();
        assert!(v.get("error").is_some());
        assert!(v.get("dataUri").is_none());
    }

    #[test]
    fn bad_dimension_becomes_error_envelope() {
        let out = handle_image_request(r#"{"width": "wide"}"#);
        let v: Value = serde_json::from_str(&out).unwrap();
        assert!(
            v.get("error")
                .and_then(Value::as_str)
                .unwrap()
                .contains("invalid input")
        );
    }
}
