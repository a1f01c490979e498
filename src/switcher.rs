//! Language switcher.
//!
//! Builds the list of links a site renders for jumping between translations
//! of the current page. Permalink construction belongs to the host, so it
//! comes in through the [`PermalinkResolver`] trait; this module decides
//! which languages appear, in what order, and with which target.

use serde::Serialize;
use tracing::debug;

use crate::content::ContentRef;
use crate::error::LinkError;
use crate::i18n::{LanguageCode, LanguageRegistry};
use crate::resolver::GroupResolver;
use crate::store::{MetadataStore, RecordStore};
use crate::tagger::LanguageTagger;

/// Maps a content item to its public URL.
///
/// Returning `None` means the item has no address right now (draft,
/// private, or simply unroutable); the switcher drops that entry.
pub trait PermalinkResolver {
    fn permalink_for(&self, item: &ContentRef) -> Option<String>;
}

/// One entry in the rendered switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitcherLink {
    pub code: LanguageCode,
    pub name: String,
    pub native_name: String,
    pub slug: String,
    pub url: String,
}

/// Produces switcher links for singular and non-singular views.
pub struct LanguageSwitcher<'a, S, P>
where
    S: MetadataStore + RecordStore,
    P: PermalinkResolver,
{
    store: &'a S,
    registry: &'a LanguageRegistry,
    permalinks: &'a P,
}

impl<'a, S, P> LanguageSwitcher<'a, S, P>
where
    S: MetadataStore + RecordStore,
    P: PermalinkResolver,
{
    pub fn new(store: &'a S, registry: &'a LanguageRegistry, permalinks: &'a P) -> Self {
        LanguageSwitcher {
            store,
            registry,
            permalinks,
        }
    }

    /// Links for a singular view centered on `current`.
    ///
    /// Walks enabled languages in registry order, skipping the current
    /// item's own language and any language without a group member. Members
    /// whose permalink cannot be resolved are skipped as well.
    pub fn links_for(&self, current: &ContentRef) -> Result<Vec<SwitcherLink>, LinkError> {
        let tagger = LanguageTagger::new(self.store, self.registry);
        let resolver = GroupResolver::new(self.store, self.registry);

        let current_code = tagger.language_or_default(current)?;
        let members = resolver.members(current)?;

        let mut links = Vec::new();
        for config in self.registry.list_enabled() {
            if config.code == current_code {
                continue;
            }
            let Some(member_id) = members.get(&config.code) else {
                continue;
            };
            let target = ContentRef::new(current.kind, member_id);
            match self.permalinks.permalink_for(&target) {
                Some(url) => links.push(SwitcherLink {
                    code: config.code.clone(),
                    name: config.name.clone(),
                    native_name: config.native_name.clone(),
                    slug: config.slug.clone(),
                    url,
                }),
                None => {
                    debug!("No permalink for {}; switcher entry skipped", target);
                }
            }
        }

        Ok(links)
    }

    /// Links for a non-singular view (archive, search, front page).
    ///
    /// There is no translation group to consult, so every enabled language
    /// except the current one gets a link back to the same URL with a
    /// `lang` query argument carrying the language slug.
    pub fn links_for_context(
        &self,
        current_language: &LanguageCode,
        current_url: &str,
    ) -> Vec<SwitcherLink> {
        let mut links = Vec::new();
        for config in self.registry.list_enabled() {
            if &config.code == current_language {
                continue;
            }
            links.push(SwitcherLink {
                code: config.code.clone(),
                name: config.name.clone(),
                native_name: config.native_name.clone(),
                slug: config.slug.clone(),
                url: append_query_arg(current_url, "lang", &config.slug),
            });
        }
        links
    }
}

fn append_query_arg(url: &str, key: &str, value: &str) -> String {
    if url.contains('?') {
        format!("{}&{}={}", url, key, value)
    } else {
        format!("{}?{}={}", url, key, value)
    }
}
