use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Stem used when a template name folds to nothing.
pub const FALLBACK_STEM: &str = "meme-notificacao";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportVariant {
    Raw,
    Card,
}

/// File name for an export: the template name folded to a lowercase ASCII slug.
pub fn export_file_name(template_name: &str, variant: ExportVariant) -> String {
    let mut stem = slugify(template_name);
    if stem.is_empty() {
        stem.push_str(FALLBACK_STEM);
    }
    if variant == ExportVariant::Card {
        stem.push_str("-whatsapp");
    }
    stem.push_str(".png");
    stem
}

fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.nfd().filter(|c| !is_combining_mark(*c)) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}
