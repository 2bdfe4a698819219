/// Two-letter language subset the provider's prompts are localized to.
/// Unrecognized or missing tags fall back to `Pt`, matching
/// `original_source`'s `language[:2].lower()` default branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Pt,
    En,
    Es,
}

impl Language {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.to_lowercase()) {
            Some(ref t) if t.starts_with("en") => Language::En,
            Some(ref t) if t.starts_with("es") => Language::Es,
            _ => Language::Pt,
        }
    }
}

/// A text-bearing block handed to the summarizer/title generator. Mirrors
/// the subset of `Block` fields the summary prompt actually reads.
#[derive(Debug, Clone)]
pub struct BlockText {
    pub text_content: String,
}

/// What to feed `describe_image`: either a fetchable URL or an inlined
/// base64 payload with its content type, used as the base64 fallback when
/// the URL-based call fails (spec §4.6 Stage B).
#[derive(Debug, Clone)]
pub enum ImageReference {
    Url(String),
    Inline { base64_data: String, content_type: String },
}
