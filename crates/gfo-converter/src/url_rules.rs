//! Input validation for the stylesheet URL field.
//!
//! Only Google Fonts CSS endpoints (API v1 and v2) are accepted. The checks
//! run against a lowercased copy of the field; the raw field text is what
//! later gets rewritten.

use url::Url;

/// Substrings a normalized input must contain to be accepted.
pub const WHITELIST_MARKERS: [&str; 2] = ["fonts.googleapis.com/css?", "fonts.googleapis.com/css2?"];

const STYLESHEET_HOST: &str = "fonts.googleapis.com";
const STYLESHEET_PATHS: [&str; 2] = ["/css", "/css2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Not an absolute http(s) URL.
    Malformed,
    /// A valid URL, but not a Google Fonts stylesheet. This includes URLs
    /// that only mention the stylesheet endpoint outside host and path.
    NotWhitelisted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCheck {
    Empty,
    Valid { normalized: String },
    Rejected(Rejection),
}

impl InputCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, InputCheck::Valid { .. })
    }
}

/// Returns true when `text` parses as an absolute URL with an `http` or
/// `https` scheme. Parse failures are an expected outcome, not an error.
pub fn is_valid_url(text: &str) -> bool {
    match Url::parse(text) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Lowercases the text and upgrades a literal `http` scheme to `https`.
pub fn normalize_input(text: &str) -> String {
    let lowered = text.to_lowercase();
    match lowered.split(':').next() {
        Some("http") => format!("https{}", &lowered[4..]),
        _ => lowered,
    }
}

pub fn check_input(text: &str) -> InputCheck {
    if text.is_empty() {
        return InputCheck::Empty;
    }

    let normalized = normalize_input(text);
    let url = match Url::parse(&normalized) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        _ => return InputCheck::Rejected(Rejection::Malformed),
    };
    let is_stylesheet = url.host_str() == Some(STYLESHEET_HOST)
        && STYLESHEET_PATHS.contains(&url.path())
        && WHITELIST_MARKERS.iter().any(|m| normalized.contains(m));
    if !is_stylesheet {
        return InputCheck::Rejected(Rejection::NotWhitelisted);
    }

    InputCheck::Valid { normalized }
}
