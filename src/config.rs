use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::i18n::{default_languages, LanguageCode, LanguageRegistry};
use crate::security::EventGuard;

#[derive(Debug, Clone)]
pub struct Settings {
    // Storage
    pub database_path: String,

    // Languages
    pub active_languages: Vec<LanguageCode>,
    pub default_language: LanguageCode,

    // Events
    pub admin_token: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let active_languages = std::env::var("LINGUA_ACTIVE_LANGUAGES")
            .unwrap_or_else(|_| "en_US".to_string())
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(LanguageCode::new)
            .collect();

        Ok(Self {
            // Storage
            database_path: std::env::var("LINGUA_DB_PATH")
                .unwrap_or_else(|_| "lingua.db".to_string()),

            // Languages
            active_languages,
            default_language: LanguageCode::new(
                std::env::var("LINGUA_DEFAULT_LANGUAGE")
                    .unwrap_or_else(|_| "en_US".to_string()),
            ),

            // Events
            admin_token: std::env::var("LINGUA_ADMIN_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
        })
    }

    /// Build the language registry these settings describe.
    ///
    /// Active codes are looked up in the built-in language table; unknown
    /// actives are skipped with a warning. The default language must be
    /// both known and active.
    pub fn registry(&self) -> Result<LanguageRegistry> {
        let mut languages = default_languages();

        for active in &self.active_languages {
            if !languages.iter().any(|language| &language.code == active) {
                warn!("Active language '{}' is not a known language; skipped", active);
            }
        }

        if !languages
            .iter()
            .any(|language| language.code == self.default_language)
        {
            bail!(
                "default language '{}' is not a known language",
                self.default_language
            );
        }
        if !self.active_languages.contains(&self.default_language) {
            bail!(
                "default language '{}' is not in LINGUA_ACTIVE_LANGUAGES",
                self.default_language
            );
        }

        for language in &mut languages {
            language.enabled = self.active_languages.contains(&language.code);
            language.is_default = language.code == self.default_language;
        }

        LanguageRegistry::new(languages).context("invalid language configuration")
    }

    /// The event guard these settings configure.
    pub fn guard(&self) -> EventGuard {
        match &self.admin_token {
            Some(token) => EventGuard::new(token.as_str()),
            None => EventGuard::disabled(),
        }
    }
}
