use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use gfo_converter::markup::escape_html;
use rust_embed::RustEmbed;
use serde::Deserialize;
use tracing::debug;

use crate::config::Settings;
use crate::i18n::Translation;
use crate::state::AppState;

#[derive(RustEmbed)]
#[folder = "web/"]
pub struct Assets;

/// wasm-pack output; absent when the frontend was not built.
#[derive(RustEmbed)]
#[folder = "frontend/dist/"]
#[allow_missing = true]
pub struct Bundle;

/// Last path segments of the stylesheet endpoints the derived URLs point at.
const ENDPOINT_SEGMENTS: [&str; 2] = ["css", "css2"];

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub language: Option<String>,
}

/// The language a page is rendered in.
pub struct PageLanguage<'a> {
    pub code: &'a str,
    pub translation: &'a Translation,
}

/// True for `.../css`, `.../css2` and their `download/` variants, wherever
/// the page is mounted.
pub fn is_converter_endpoint(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|segment| ENDPOINT_SEGMENTS.contains(&segment))
}

/// Serves the converter page for `/` and any path the router does not know,
/// so the page works wherever it is mounted. Stylesheet endpoint paths are
/// left to the converter backend.
pub async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
    uri: Uri,
) -> Response {
    if is_converter_endpoint(uri.path()) {
        debug!(path = uri.path(), "stylesheet endpoint requested");
        return (
            StatusCode::NOT_IMPLEMENTED,
            "Stylesheet endpoints are served by the converter backend",
        )
            .into_response();
    }

    let (code, translation) = state.catalog.resolve(query.language.as_deref());
    match Assets::get("index.html") {
        Some(content) => {
            let template = String::from_utf8_lossy(&content.data);
            let page = render_index(&template, &state.settings, &PageLanguage { code, translation });
            ([(CONTENT_TYPE, "text/html; charset=utf-8")], page).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            "index.html not found in embedded assets",
        )
            .into_response(),
    }
}

pub async fn static_handler(Path(path): Path<String>) -> Response {
    match Assets::get(&path) {
        Some(content) if path != "index.html" => embedded(&path, content.data.into_owned()),
        _ => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

pub async fn bundle_handler(Path(path): Path<String>) -> Response {
    match Bundle::get(&path) {
        Some(content) => embedded(&path, content.data.into_owned()),
        None => (StatusCode::NOT_FOUND, "Frontend bundle not built").into_response(),
    }
}

fn embedded(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    ([(CONTENT_TYPE, mime.as_ref())], data).into_response()
}

/// Fills the `{{slot}}` placeholders of the page template. Every value is
/// escaped except the color script, whose values are validated at startup.
pub fn render_index(template: &str, settings: &Settings, language: &PageLanguage) -> String {
    let text = &language.translation.index;
    let slots = [
        ("{{page_constants}}", settings.colors.page_constants_script()),
        ("{{footer_links}}", footer_links(settings, language.translation)),
        ("{{language_links}}", language_links(language)),
        ("{{lang}}", escape_html(language.code)),
        ("{{title}}", escape_html(&text.title)),
        ("{{subtitle}}", escape_html(&text.subtitle)),
        ("{{placeholder}}", escape_html(&text.placeholder)),
        ("{{convert}}", escape_html(&text.convert)),
        ("{{download}}", escape_html(&text.download)),
        ("{{language}}", escape_html(&text.language)),
    ];
    slots
        .iter()
        .fold(template.to_string(), |page, (slot, value)| page.replace(slot, value))
}

fn footer_links(settings: &Settings, translation: &Translation) -> String {
    [
        (&translation.index.imprint, settings.imprint_url.as_deref()),
        (&translation.index.privacy, settings.privacy_url.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
        url.map(|url| {
            format!(
                "<a class=\"footer-link\" href=\"{}\">{}</a>",
                escape_html(url),
                escape_html(label)
            )
        })
    })
    .collect::<Vec<_>>()
    .join("\n")
}

fn language_links(language: &PageLanguage) -> String {
    language
        .translation
        .languages
        .iter()
        .map(|(code, name)| {
            let current = if code == language.code { " aria-current=\"true\"" } else { "" };
            format!(
                "<a class=\"language-link\" href=\"?language={}\"{}>{}</a>",
                escape_html(code),
                current,
                escape_html(name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_endpoints() {
        for path in ["/css", "/css2", "/download/css2", "/app/css", "/app/download/css"] {
            assert!(is_converter_endpoint(path), "{}", path);
        }
        for path in ["/", "/app/", "/css/", "/cssx", "/static/style.css", "/download/"] {
            assert!(!is_converter_endpoint(path), "{}", path);
        }
    }
}
