//! Admin query filter.
//!
//! List and search screens restrict what they show to one language. The
//! host asks for a predicate here and applies it to its own query engine;
//! no query construction happens in this crate. Untagged items belong to
//! the default language, so filtering by the default must also match items
//! with no language metadata at all.

use crate::i18n::{LanguageCode, LanguageRegistry};
use tracing::debug;

/// What the screen asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSelection {
    /// The "all" sentinel: show every language.
    All,
    /// Show one language.
    Language(LanguageCode),
}

impl FilterSelection {
    /// Parse a raw UI value (e.g. a query argument).
    ///
    /// Empty input means the control made no selection; "all" is the
    /// disable-filtering sentinel; anything else is taken as a code.
    pub fn from_param(value: &str) -> Option<FilterSelection> {
        match value.trim() {
            "" => None,
            "all" => Some(FilterSelection::All),
            code => Some(FilterSelection::Language(LanguageCode::new(code))),
        }
    }
}

/// Per-screen inputs the selection falls back through.
///
/// Admin screens differ in what they know: an explicit selector when the
/// user picked one, the language of the item being edited, or the language
/// of the containing taxonomy/menu. The first available source wins; the
/// site default is the final fallback.
#[derive(Debug, Clone, Default)]
pub struct FilterContext {
    /// Explicit selector or query argument, when the UI provided one.
    pub explicit: Option<FilterSelection>,
    /// Language of the content item the screen centers on.
    pub item_language: Option<LanguageCode>,
    /// Language of the containing taxonomy or menu.
    pub container_language: Option<LanguageCode>,
}

impl FilterContext {
    pub fn resolve(&self, registry: &LanguageRegistry) -> FilterSelection {
        if let Some(selection) = &self.explicit {
            return selection.clone();
        }
        if let Some(code) = &self.item_language {
            return FilterSelection::Language(code.clone());
        }
        if let Some(code) = &self.container_language {
            return FilterSelection::Language(code.clone());
        }
        FilterSelection::Language(registry.default_code().clone())
    }
}

/// The language predicate a list screen applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageFilter {
    /// Pass everything.
    All,
    /// Match the default language or absent language metadata.
    DefaultOrUntagged(LanguageCode),
    /// Match exactly one non-default language.
    Exact(LanguageCode),
}

impl LanguageFilter {
    /// Build the predicate for a resolved selection.
    ///
    /// Asking for the default language widens to "default or untagged".
    /// Asking for a code that is not currently enabled degrades to the same
    /// widened default rather than showing nothing.
    pub fn for_selection(
        selection: &FilterSelection,
        registry: &LanguageRegistry,
    ) -> LanguageFilter {
        match selection {
            FilterSelection::All => LanguageFilter::All,
            FilterSelection::Language(code) => {
                let default = registry.default_code();
                if code == default || !registry.is_enabled(code) {
                    LanguageFilter::DefaultOrUntagged(default.clone())
                } else {
                    LanguageFilter::Exact(code.clone())
                }
            }
        }
    }

    /// Resolve a screen context and build its predicate in one step.
    pub fn for_context(context: &FilterContext, registry: &LanguageRegistry) -> LanguageFilter {
        let selection = context.resolve(registry);
        debug!("Screen language selection resolved to {:?}", selection);
        Self::for_selection(&selection, registry)
    }

    /// Whether an item with this language metadata passes the filter.
    pub fn matches(&self, language: Option<&LanguageCode>) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::DefaultOrUntagged(default) => match language {
                None => true,
                Some(code) => code == default,
            },
            LanguageFilter::Exact(expected) => language == Some(expected),
        }
    }

    /// Combine with a predicate the caller already had; both must pass.
    pub fn and<F>(self, prior: F) -> impl Fn(Option<&LanguageCode>) -> bool
    where
        F: Fn(Option<&LanguageCode>) -> bool,
    {
        move |language| prior(language) && self.matches(language)
    }
}
