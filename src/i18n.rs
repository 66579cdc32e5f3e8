use std::collections::BTreeMap;

use rust_embed::RustEmbed;
use serde::Deserialize;
use thiserror::Error;

/// One `<code>.json` file per language.
#[derive(RustEmbed)]
#[folder = "i18n/"]
struct Translations;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("invalid translation file {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no translation for default language {0:?}")]
    MissingDefault(String),
}

/// Texts of the converter page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageText {
    pub title: String,
    pub subtitle: String,
    pub placeholder: String,
    pub convert: String,
    pub download: String,
    pub imprint: String,
    pub privacy: String,
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Translation {
    pub index: PageText,
    /// Display names of all languages, keyed by code.
    pub languages: BTreeMap<String, String>,
}

/// All embedded translations. The default language is always present.
#[derive(Debug)]
pub struct Catalog {
    translations: BTreeMap<String, Translation>,
    default_language: String,
}

impl Catalog {
    pub fn load(default_language: &str) -> Result<Self, I18nError> {
        let mut translations = BTreeMap::new();
        for file in Translations::iter() {
            let Some(code) = file.strip_suffix(".json") else {
                continue;
            };
            let Some(content) = Translations::get(&file) else {
                continue;
            };
            let translation = serde_json::from_slice(&content.data).map_err(|source| I18nError::Parse {
                file: file.to_string(),
                source,
            })?;
            translations.insert(code.to_lowercase(), translation);
        }

        let default_language = default_language.to_lowercase();
        if !translations.contains_key(&default_language) {
            return Err(I18nError::MissingDefault(default_language));
        }

        Ok(Self {
            translations,
            default_language,
        })
    }

    /// Picks the requested language, case-insensitively, falling back to
    /// the default for missing or unknown codes.
    pub fn resolve(&self, language: Option<&str>) -> (&str, &Translation) {
        let requested = language.map(str::to_lowercase);
        match requested.as_deref().and_then(|l| self.translations.get_key_value(l)) {
            Some((code, translation)) => (code.as_str(), translation),
            None => (
                self.default_language.as_str(),
                &self.translations[&self.default_language],
            ),
        }
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }
}
