//! Derives the proxy and archive URLs served by the page host.
//!
//! The derived URL always points at the current site: scheme, host and port
//! come from the page location, and only the part of the Google Fonts URL
//! after its `/css` path marker is carried over.

use thiserror::Error;
use url::Url;

const PATH_MARKER: &str = "/css";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("malformed input: {0}")]
    Malformed(#[from] url::ParseError),
    #[error("no /css path marker in {0}")]
    MissingMarker(String),
    #[error("page location scheme {0:?} is not http(s)")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Convert,
    Download,
}

impl Mode {
    /// Path prefix of the endpoint, relative to the page path.
    pub fn endpoint_prefix(self) -> &'static str {
        match self {
            Mode::Convert => "css",
            Mode::Download => "download/css",
        }
    }
}

/// The location of the page the converter is running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    pub fn parse(href: &str) -> Result<Self, RewriteError> {
        Self::from_url(Url::parse(href)?)
    }

    pub fn from_url(url: Url) -> Result<Self, RewriteError> {
        match url.scheme() {
            "http" | "https" => Ok(Self { url }),
            other => Err(RewriteError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Forces a leading and a trailing `/` without doubling existing ones.
pub fn normalize_page_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    if !path.starts_with('/') {
        out.push('/');
    }
    out.push_str(path);
    if !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Returns whatever follows the `/css` marker at the start of `path`.
fn strip_marker(path: &str) -> Option<&str> {
    let head = path.get(..PATH_MARKER.len())?;
    head.eq_ignore_ascii_case(PATH_MARKER)
        .then(|| &path[PATH_MARKER.len()..])
}

/// The input text after its path's `/css` marker, byte for byte: rest of the
/// path, query and fragment exactly as typed.
fn raw_tail(input: &str) -> Option<&str> {
    let (_, rest) = input.split_once("://")?;
    let path_start = rest.find(['/', '?', '#'])?;
    strip_marker(&rest[path_start..])
}

/// Rewrites a Google Fonts stylesheet URL into one addressing this site's
/// `css` or `download/css` endpoint.
///
/// Given the page `https://host:8080/app/` and the input
/// `https://fonts.googleapis.com/css2?family=Lato`, convert mode yields
/// `https://host:8080/app/css2?family=Lato`. The suffix is copied verbatim,
/// so inputs that differ only in their encoding stay distinct.
pub fn derive_target_url(input: &str, location: &PageLocation, mode: Mode) -> Result<String, RewriteError> {
    let input = input.trim();
    let source = Url::parse(input)?;
    let tail = strip_marker(source.path())
        .and_then(|_| raw_tail(input))
        .ok_or_else(|| RewriteError::MissingMarker(input.to_string()))?;

    let mut target = location.url.clone();
    // Credentials never come from either side; these only fail for
    // cannot-be-a-base URLs, which http(s) locations are not.
    let _ = target.set_username("");
    let _ = target.set_password(None);
    target.set_query(None);
    target.set_fragment(None);
    target.set_path(&format!(
        "{}{}",
        normalize_page_path(location.url.path()),
        mode.endpoint_prefix()
    ));

    Ok(format!("{}{}", target, tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(href: &str) -> PageLocation {
        PageLocation::parse(href).unwrap()
    }

    #[test]
    fn test_normalize_page_path() {
        assert_eq!(normalize_page_path(""), "/");
        assert_eq!(normalize_page_path("/"), "/");
        assert_eq!(normalize_page_path("app"), "/app/");
        assert_eq!(normalize_page_path("/app"), "/app/");
        assert_eq!(normalize_page_path("app/"), "/app/");
        assert_eq!(normalize_page_path("/app/"), "/app/");
    }

    #[test]
    fn test_convert_and_download_targets() {
        let loc = location("https://host:8080/app/");
        let input = "https://fonts.googleapis.com/css2?family=Lato";

        let converted = derive_target_url(input, &loc, Mode::Convert).unwrap();
        assert_eq!(converted, "https://host:8080/app/css2?family=Lato");

        let download = derive_target_url(input, &loc, Mode::Download).unwrap();
        assert_eq!(download, "https://host:8080/app/download/css2?family=Lato");
    }

    #[test]
    fn test_v1_api_and_page_path_without_trailing_slash() {
        let loc = location("http://localhost:3000/fonts?language=de#top");
        let out = derive_target_url(
            "https://fonts.googleapis.com/css?family=Roboto:400,700&display=swap",
            &loc,
            Mode::Convert,
        )
        .unwrap();
        assert_eq!(
            out,
            "http://localhost:3000/fonts/css?family=Roboto:400,700&display=swap"
        );
    }

    #[test]
    fn test_default_port_is_omitted() {
        let loc = location("https://fonts.example.org/");
        let out = derive_target_url("https://fonts.googleapis.com/css2?family=Lato", &loc, Mode::Download).unwrap();
        assert_eq!(out, "https://fonts.example.org/download/css2?family=Lato");
    }

    #[test]
    fn test_input_casing_is_preserved_in_query() {
        let loc = location("http://localhost:3000/");
        let out = derive_target_url(
            "HTTP://Fonts.GoogleAPIs.com/CSS2?family=Open+Sans",
            &loc,
            Mode::Convert,
        )
        .unwrap();
        assert_eq!(out, "http://localhost:3000/css2?family=Open+Sans");
    }

    #[test]
    fn test_suffix_is_copied_verbatim() {
        let loc = location("https://host:8080/app/");
        let spaced = derive_target_url(
            "https://fonts.googleapis.com/css2?family=Open Sans",
            &loc,
            Mode::Convert,
        )
        .unwrap();
        let encoded = derive_target_url(
            "https://fonts.googleapis.com/css2?family=Open%20Sans",
            &loc,
            Mode::Convert,
        )
        .unwrap();
        assert_eq!(spaced, "https://host:8080/app/css2?family=Open Sans");
        assert_eq!(encoded, "https://host:8080/app/css2?family=Open%20Sans");

        let quoted = derive_target_url(
            "https://fonts.googleapis.com/css?family=a'b#x",
            &loc,
            Mode::Download,
        )
        .unwrap();
        assert_eq!(quoted, "https://host:8080/app/download/css?family=a'b#x");
    }

    #[test]
    fn test_missing_marker_is_an_error() {
        let loc = location("http://localhost:3000/");
        let err = derive_target_url(
            "https://example.com/?next=fonts.googleapis.com/css?family=Lato",
            &loc,
            Mode::Convert,
        )
        .unwrap_err();
        assert!(matches!(err, RewriteError::MissingMarker(_)));

        // No authority slashes, so there is no literal path to copy from.
        let err = derive_target_url("https:fonts.googleapis.com/css?family=Lato", &loc, Mode::Convert).unwrap_err();
        assert!(matches!(err, RewriteError::MissingMarker(_)));

        let err = derive_target_url("not a url", &loc, Mode::Convert).unwrap_err();
        assert!(matches!(err, RewriteError::Malformed(_)));
    }

    #[test]
    fn test_page_location_rejects_other_schemes() {
        assert_eq!(
            PageLocation::parse("file:///tmp/index.html").unwrap_err(),
            RewriteError::UnsupportedScheme("file".to_string())
        );
    }
}
