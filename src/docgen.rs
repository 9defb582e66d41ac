use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value;

/// Stateless text-to-document conversion. Shares the one-request-in,
/// one-envelope-out JSON style with the image pipeline but has no other
/// interaction with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocFormat {
    Doc,
    Csv,
    Txt,
}

impl DocFormat {
    /// Case-insensitive token mapping; unknown tokens fall back to plain
    /// text rather than erroring.
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "doc" | "docx" | "word" => Self::Doc,
            "csv" | "excel" | "xlsx" => Self::Csv,
            _ => Self::Txt,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct DocPayload {
    #[serde(rename = "dataUri")]
    pub data_uri: String,
    pub filename: String,
    pub mime: String,
}

pub fn convert(text: &str, format: DocFormat) -> DocPayload {
    match format {
        DocFormat::Doc => to_doc_html(text),
        DocFormat::Csv => to_csv(text),
        DocFormat::Txt => to_txt(text),
    }
}

fn to_doc_html(text: &str) -> DocPayload {
    let html = format!(
        "<!doctype html><html><head><meta charset='utf-8'></head><body>{}</body></html>",
        text.replace('\n', "<br/>")
    );
    payload(&html, "document.doc", "application/msword")
}

fn to_csv(text: &str) -> DocPayload {
    payload(&text.replace('\t', ","), "spreadsheet.csv", "text/csv")
}

fn to_txt(text: &str) -> DocPayload {
    payload(text, "document.txt", "text/plain")
}

fn payload(body: &str, filename: &str, mime: &str) -> DocPayload {
    DocPayload {
        data_uri: format!("data:{mime};base64,{}", STANDARD.encode(body.as_bytes())),
        filename: filename.to_string(),
        mime: mime.to_string(),
    }
}

/// Top-level document request handler, mirroring the image handler's
/// never-crash contract: any failure becomes `{"error": ...}`.
pub fn handle_doc_request(raw: &str) -> String {
    let value: Value = if raw.trim().is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                return serde_json::json!({ "error": format!("malformed JSON: {e}") })
                    .to_string();
            }
        }
    };

    let text = value.get("text").and_then(Value::as_str).unwrap_or_default();
    let format = value
        .get("format")
        .and_then(Value::as_str)
        .map(DocFormat::from_token)
        .unwrap_or(DocFormat::Txt);

    let out = convert(text, format);
    serde_json::to_string(&out)
        .unwrap_or_else(|e| format!(r#"{{"error":"response encode: {e}"}}"#))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(p: &DocPayload) -> String {
        let payload = p.data_uri.split_once(";base64,").unwrap().1;
        String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap()
    }

    #[test]
    fn csv_replaces_tabs_with_commas() {
        let p = convert("a\tb\tc", DocFormat::Csv);
        assert_eq!(decode(&p), "a,b,c");
        assert_eq!(p.mime, "text/csv");
        assert_eq!(p.filename, "spreadsheet.csv");
    }

    #[test]
    fn doc_wraps_html_and_converts_newlines() {
        let p = convert("line1\nline2", DocFormat::Doc);
        let body = decode(&p);
        assert!(body.starts_with("<!doctype html>"));
        assert!(body.contains("line1<br/>line2"));
        assert_eq!(p.mime, "application/msword");
    }

    #[test]
    fn unknown_format_falls_back_to_plain_text() {
        assert_eq!(DocFormat::from_token("unknown"), DocFormat::Txt);
        assert_eq!(DocFormat::from_token(""), DocFormat::Txt);
        let p = convert("hi", DocFormat::from_token("unknown"));
        assert_eq!(decode(&p), "hi");
        assert_eq!(p.mime, "text/plain");
    }

    #[test]
    fn format_tokens_are_case_insensitive() {
        assert_eq!(DocFormat::from_token("DOCX"), DocFormat::Doc);
        assert_eq!(DocFormat::from_token("Excel"), DocFormat::Csv);
    }

    #[test]
    fn handler_produces_expected_envelope() {
        let out = handle_doc_request(r#"{"text":"a\tb","format":"csv"}"#);
        let p: DocPayload = serde_json::from_str(&out).unwrap();
        assert_eq!(decode(&p), "a,b");
    }

    #[test]
    fn handler_survives_malformed_json() {
        let out = handle_doc_request("nope{");
        let v: Value = serde_json::from_str(&out).unwrap();
        assert!(v.get("error").is_some());
    }
}
