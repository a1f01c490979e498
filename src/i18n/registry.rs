//! Language registry: the configured set of languages a site works with.
//!
//! The registry is a plain value constructed once from configuration and
//! passed explicitly to every component that needs it. It answers three
//! questions: is a code known at all, is it currently enabled for tagging
//! and switching, and which single code is the site default. It also carries
//! the display metadata (names, URL slug) read paths hand to the host.

use crate::i18n::LanguageCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for one language the site knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Locale code the host uses for this language (e.g. "en_US")
    pub code: LanguageCode,

    /// English name of the language (e.g. "French")
    pub name: String,

    /// Native name of the language (e.g. "Français")
    pub native_name: String,

    /// Short URL-safe identifier used in query arguments (e.g. "fr")
    pub slug: String,

    /// Whether this is the site default language (exactly one must be true)
    pub is_default: bool,

    /// Whether this language is enabled for tagging and switching
    pub enabled: bool,
}

/// Errors detected when constructing a registry from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate language code '{0}' in registry")]
    DuplicateCode(LanguageCode),

    #[error("duplicate language slug '{0}' in registry")]
    DuplicateSlug(String),

    #[error("registry has no default language")]
    NoDefault,

    #[error("registry has more than one default language")]
    MultipleDefaults,

    #[error("default language '{0}' is not enabled")]
    DisabledDefault(LanguageCode),
}

/// The configured language set.
///
/// Order is significant: list order is the stable presentation order used by
/// the switcher and by "missing translation" listings.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
    default_idx: usize,
}

impl LanguageRegistry {
    /// Build a registry, validating the configuration.
    ///
    /// # Arguments
    /// * `languages` - All known languages, in presentation order
    ///
    /// # Returns
    /// * `Ok(LanguageRegistry)` when codes and slugs are unique and exactly
    ///   one enabled language is marked as the default
    /// * `Err(RegistryError)` describing the first violation found
    pub fn new(languages: Vec<LanguageConfig>) -> Result<Self, RegistryError> {
        for (i, config) in languages.iter().enumerate() {
            for other in &languages[i + 1..] {
                if other.code == config.code {
                    return Err(RegistryError::DuplicateCode(config.code.clone()));
                }
                if other.slug == config.slug {
                    return Err(RegistryError::DuplicateSlug(config.slug.clone()));
                }
            }
        }

        let defaults: Vec<usize> = languages
            .iter()
            .enumerate()
            .filter(|(_, config)| config.is_default)
            .map(|(i, _)| i)
            .collect();

        let default_idx = match defaults.len() {
            0 => return Err(RegistryError::NoDefault),
            1 => defaults[0],
            _ => return Err(RegistryError::MultipleDefaults),
        };

        if !languages[default_idx].enabled {
            return Err(RegistryError::DisabledDefault(
                languages[default_idx].code.clone(),
            ));
        }

        Ok(Self {
            languages,
            default_idx,
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &LanguageCode) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| &lang.code == code)
    }

    /// Get a language configuration by its URL slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.slug == slug)
    }

    /// Whether the code is known to the registry at all (enabled or not).
    ///
    /// Group entries keyed by codes outside this set are pruned on the next
    /// resolver write.
    pub fn contains(&self, code: &LanguageCode) -> bool {
        self.get_by_code(code).is_some()
    }

    /// Whether the code is known and enabled.
    pub fn is_enabled(&self, code: &LanguageCode) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }

    /// All enabled languages, in presentation order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// All languages (including disabled ones), in presentation order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// The site default language configuration.
    pub fn default_language(&self) -> &LanguageConfig {
        &self.languages[self.default_idx]
    }

    /// The site default language code.
    pub fn default_code(&self) -> &LanguageCode {
        &self.languages[self.default_idx].code
    }
}

/// The built-in known-language table.
///
/// Sites that configure languages by code (see `Settings::registry`) start
/// from this table; only English ships enabled. Hosts with their own
/// language metadata construct `LanguageRegistry::new` directly instead.
pub fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: LanguageCode::new("en_US"),
            name: "English".to_string(),
            native_name: "English".to_string(),
            slug: "en".to_string(),
            is_default: true,
            enabled: true,
        },
        LanguageConfig {
            code: LanguageCode::new("es_ES"),
            name: "Spanish".to_string(),
            native_name: "Español".to_string(),
            slug: "es".to_string(),
            is_default: false,
            enabled: false,
        },
        LanguageConfig {
            code: LanguageCode::new("fr_FR"),
            name: "French".to_string(),
            native_name: "Français".to_string(),
            slug: "fr".to_string(),
            is_default: false,
            enabled: false,
        },
        LanguageConfig {
            code: LanguageCode::new("de_DE"),
            name: "German".to_string(),
            native_name: "Deutsch".to_string(),
            slug: "de".to_string(),
            is_default: false,
            enabled: false,
        },
        LanguageConfig {
            code: LanguageCode::new("it_IT"),
            name: "Italian".to_string(),
            native_name: "Italiano".to_string(),
            slug: "it".to_string(),
            is_default: false,
            enabled: false,
        },
        LanguageConfig {
            code: LanguageCode::new("pt_BR"),
            name: "Portuguese (Brazil)".to_string(),
            native_name: "Português do Brasil".to_string(),
            slug: "pt-br".to_string(),
            is_default: false,
            enabled: false,
        },
        LanguageConfig {
            code: LanguageCode::new("ja"),
            name: "Japanese".to_string(),
            native_name: "日本語".to_string(),
            slug: "ja".to_string(),
            is_default: false,
            enabled: false,
        },
    ]
}
