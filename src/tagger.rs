//! Content language tagger.
//!
//! Reads and writes the two metadata back-references an item carries: its
//! own language and its group id. Writes are gated on the active-language
//! set; everything group-shaped is the resolver's job, invoked by callers
//! after tagging.

use crate::content::ContentRef;
use crate::group::GroupId;
use crate::i18n::{LanguageCode, LanguageRegistry};
use crate::store::{MetadataStore, StoreError};
use tracing::debug;

pub struct LanguageTagger<'a, S: MetadataStore> {
    store: &'a S,
    registry: &'a LanguageRegistry,
}

impl<'a, S: MetadataStore> LanguageTagger<'a, S> {
    pub fn new(store: &'a S, registry: &'a LanguageRegistry) -> Self {
        Self { store, registry }
    }

    /// Tag the item with a language.
    ///
    /// # Returns
    /// * `Ok(true)` when the metadata was written
    /// * `Ok(false)` when the code is not enabled; nothing is persisted
    pub fn set_language(
        &self,
        item: &ContentRef,
        code: &LanguageCode,
    ) -> Result<bool, StoreError> {
        if !self.registry.is_enabled(code) {
            debug!("Language '{}' not enabled; tag skipped for {}", code, item);
            return Ok(false);
        }

        self.store.set_meta(
            item.kind.scope(),
            item.id,
            item.kind.language_meta_key(),
            code.as_str(),
        )?;
        Ok(true)
    }

    /// The item's tagged language, if any.
    ///
    /// Absent metadata (or an empty value left behind by the host) reads as
    /// `None`, which readers treat as the site default.
    pub fn language(&self, item: &ContentRef) -> Result<Option<LanguageCode>, StoreError> {
        let value =
            self.store
                .get_meta(item.kind.scope(), item.id, item.kind.language_meta_key())?;
        Ok(value.filter(|v| !v.is_empty()).map(LanguageCode::new))
    }

    /// The item's tagged language, falling back to the site default.
    pub fn language_or_default(&self, item: &ContentRef) -> Result<LanguageCode, StoreError> {
        Ok(self
            .language(item)?
            .unwrap_or_else(|| self.registry.default_code().clone()))
    }

    /// Remove the item's language tag.
    pub fn clear_language(&self, item: &ContentRef) -> Result<(), StoreError> {
        self.store
            .delete_meta(item.kind.scope(), item.id, item.kind.language_meta_key())
    }

    /// The item's group-id back-reference, if any.
    pub fn group_id(&self, item: &ContentRef) -> Result<Option<GroupId>, StoreError> {
        let value =
            self.store
                .get_meta(item.kind.scope(), item.id, item.kind.group_meta_key())?;
        Ok(value
            .and_then(|v| v.parse::<i64>().ok())
            .map(GroupId::new))
    }

    /// Point the item at a group.
    pub fn set_group_id(&self, item: &ContentRef, group: GroupId) -> Result<(), StoreError> {
        self.store.set_meta(
            item.kind.scope(),
            item.id,
            item.kind.group_meta_key(),
            &group.get().to_string(),
        )
    }
}
