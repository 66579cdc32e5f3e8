mod config;
mod handlers;
mod i18n;
mod state;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Level, info, warn};

use crate::config::Settings;
use crate::handlers::web;
use crate::i18n::Catalog;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let settings = Settings::new().expect("Failed to load configuration");

    tracing_subscriber::fmt()
        .with_env_filter(&settings.log_level)
        .init();

    info!("Starting gfo...");

    let catalog = Catalog::load(&settings.default_language).expect("Failed to load translations");
    info!(
        "Languages: {} (default {})",
        catalog.languages().collect::<Vec<_>>().join(", "),
        settings.default_language
    );

    let state = AppState {
        settings: settings.clone(),
        catalog: Arc::new(catalog),
    };

    let app = create_app(state);

    let port = settings.server_port;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors_origins);

    Router::new()
        .route("/static/{*path}", get(web::static_handler))
        .route("/pkg/{*path}", get(web::bundle_handler))
        .fallback(web::index_handler)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(tower_http::trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(tower_http::trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::HEAD])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use gfo_converter::ColorConfig;

    fn test_settings() -> Settings {
        Settings {
            server_port: 0,
            log_level: "info".to_string(),
            default_language: "en".to_string(),
            colors: ColorConfig {
                primary: "#101010".to_string(),
                highlight: "rebeccapurple".to_string(),
                ..Default::default()
            },
            imprint_url: Some("https://example.org/imprint?a=1&b=2".to_string()),
            privacy_url: None,
            cors_origins: vec![],
        }
    }

    fn setup_test_app(settings: Settings) -> TestServer {
        let catalog = Catalog::load(&settings.default_language).unwrap();
        let state = AppState {
            settings,
            catalog: Arc::new(catalog),
        };
        TestServer::new(create_app(state)).unwrap()
    }

    #[tokio::test]
    async fn test_index_page() {
        let server = setup_test_app(test_settings());
        let response = server.get("/").await;
        response.assert_status_ok();
        response.assert_header("content-type", "text/html; charset=utf-8");

        let body = response.text();
        for id in ["urlInput", "btnConvertURL", "btnDownload", "artifacts"] {
            assert!(body.contains(&format!("id=\"{}\"", id)), "missing #{}", id);
        }
        assert!(body.contains("var PRIMARY_COLOR = \"#101010\";"));
        assert!(body.contains("var HIGHLIGHT_COLOR = \"rebeccapurple\";"));
        assert!(body.contains("var TEXT_COLOR = \"\";"));
        assert!(body.contains("href=\"https://example.org/imprint?a=1&amp;b=2\">Imprint</a>"));
        assert!(!body.contains(">Privacy</a>"));
        assert!(!body.contains("{{"));
    }

    #[tokio::test]
    async fn test_page_served_under_any_path() {
        let server = setup_test_app(test_settings());
        let response = server.get("/app/").await;
        response.assert_status_ok();
        assert!(response.text().contains("id=\"urlInput\""));
    }

    #[tokio::test]
    async fn test_static_assets() {
        let server = setup_test_app(test_settings());
        let response = server.get("/static/style.css").await;
        response.assert_status_ok();
        response.assert_header("content-type", "text/css");
        assert!(response.text().contains("--highlight"));

        let response = server.get("/static/missing.css").await;
        response.assert_status(axum::http::StatusCode::NOT_FOUND);

        // The raw template is only served rendered.
        let response = server.get("/static/index.html").await;
        response.assert_status(axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_bundle_file() {
        let server = setup_test_app(test_settings());
        let response = server.get("/pkg/does-not-exist.js").await;
        response.assert_status(axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stylesheet_endpoints_are_not_the_page() {
        let server = setup_test_app(test_settings());
        for path in [
            "/css2?family=Lato",
            "/download/css2?family=Lato",
            "/css?family=Roboto:400,700",
            "/app/download/css?family=Roboto",
        ] {
            let response = server.get(path).await;
            response.assert_status(axum::http::StatusCode::NOT_IMPLEMENTED);
            assert!(!response.text().contains("id=\"urlInput\""), "{} served the page", path);
        }
    }

    #[tokio::test]
    async fn test_page_language() {
        let server = setup_test_app(test_settings());

        let response = server.get("/").add_query_param("language", "DE").await;
        response.assert_status_ok();
        let body = response.text();
        assert!(body.contains("<html lang=\"de\">"));
        assert!(body.contains(">Umwandeln</button>"));
        assert!(body.contains(">Impressum</a>"));
        assert!(body.contains("href=\"?language=en\">Englisch</a>"));
        assert!(body.contains("href=\"?language=de\" aria-current=\"true\">Deutsch</a>"));

        // Unknown codes fall back to the configured default.
        let response = server.get("/app/").add_query_param("language", "xx").await;
        response.assert_status_ok();
        let body = response.text();
        assert!(body.contains("<html lang=\"en\">"));
        assert!(body.contains(">Convert</button>"));
    }

    #[tokio::test]
    async fn test_default_language_setting() {
        let mut settings = test_settings();
        settings.default_language = "de".to_string();
        let server = setup_test_app(settings);

        let body = server.get("/").await.text();
        assert!(body.contains("<html lang=\"de\">"));
        assert!(body.contains(">Herunterladen</button>"));
    }

    #[tokio::test]
    async fn test_restricted_cors() {
        let mut settings = test_settings();
        settings.cors_origins = vec!["https://example.org".to_string()];
        let server = setup_test_app(settings);

        let response = server
            .get("/static/style.css")
            .add_header(
                axum::http::header::ORIGIN,
                HeaderValue::from_static("https://example.org"),
            )
            .await;
        response.assert_header("access-control-allow-origin", "https://example.org");
    }
}
