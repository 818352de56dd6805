use base64::Engine;

/// Content type used when a response declares none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

pub fn is_data_url(reference: &str) -> bool {
    reference
        .get(..5)
        .is_some_and(|p| p.eq_ignore_ascii_case("data:"))
}

/// `data:<content-type>;base64,<payload>`.
pub fn encode_data_url(content_type: Option<&str>, bytes: &[u8]) -> String {
    let content_type = content_type
        .map(normalize_content_type)
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{content_type};base64,{payload}")
}

/// Lowercase the media type and drop whitespace around parameters.
pub fn normalize_content_type(raw: &str) -> String {
    let mut parts = raw.split(';').map(str::trim).filter(|p| !p.is_empty());
    let Some(essence) = parts.next() else {
        return String::new();
    };
    let mut out = essence.to_ascii_lowercase();
    for p in parts {
        out.push(';');
        out.push_str(p);
    }
    out
}
