use config::{Config, ConfigError, Environment, File, Source};
use gfo_converter::{ColorConfig, is_valid_url};
use serde::Deserialize;
#[cfg(test)]
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server_port: u16,
    pub log_level: String,
    /// Page language when the request names none or an unknown one.
    pub default_language: String,
    #[serde(default)]
    pub colors: ColorConfig,
    pub imprint_url: Option<String>,
    pub privacy_url: Option<String>,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(File::with_name("config").required(false))
    }

    #[cfg(test)]
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path))
    }

    fn build<S: Source + Send + Sync + 'static>(file: S) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Default settings
            .set_default("server_port", 3000)?
            .set_default("log_level", "info")?
            .set_default("default_language", "en")?
            // Config file
            .add_source(file)
            // Environment variables (e.g. GFO_SERVER_PORT=8080, GFO_COLORS__PRIMARY=#123456)
            .add_source(
                Environment::with_prefix("GFO")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_origins")
                    .try_parsing(true),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        self.colors
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        for (key, link) in [
            ("imprint_url", &mut self.imprint_url),
            ("privacy_url", &mut self.privacy_url),
        ] {
            // An empty variable disables the link.
            if link.as_deref().is_some_and(str::is_empty) {
                *link = None;
            }
            if let Some(url) = link.as_deref()
                && !is_valid_url(url)
            {
                return Err(ConfigError::Message(format!(
                    "{} must be an absolute http(s) url, got {:?}",
                    key, url
                )));
            }
        }

        Ok(self)
    }
}
