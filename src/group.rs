//! Translation groups: the language → item mapping shared by translations.
//!
//! A group is the sole owner of the mapping; items only hold back-references
//! (their own language and the group id). Groups persist in the host's
//! named-record store as JSON objects under `lingua_<ns>_translations_<id>`,
//! so a record stays a plain readable object in the option table.

use crate::content::{ContentId, ContentKind};
use crate::i18n::LanguageCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a translation group.
///
/// By convention equal to the id of the item that first created the group
/// (the origin item); callers linking a new translation supply it explicitly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupId(i64);

impl GroupId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Name of the persisted record for this group, scoped by namespace.
    ///
    /// Posts and attachments resolve to the same name for the same id, so a
    /// post and the attachments translated alongside it share group space.
    pub fn record_name(self, kind: ContentKind) -> String {
        format!("lingua_{}_translations_{}", kind.namespace(), self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ContentId> for GroupId {
    fn from(id: ContentId) -> Self {
        Self(id.get())
    }
}

/// Membership of a translation group: at most one item per language code.
///
/// Key uniqueness is the map's own property; the one-item-per-language rule
/// and the pruning of unknown codes are enforced by the resolver's write
/// path, never by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationGroup(BTreeMap<LanguageCode, ContentId>);

impl TranslationGroup {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// A one-entry membership, as synthesized for unlinked items.
    pub fn singleton(code: LanguageCode, id: ContentId) -> Self {
        let mut map = BTreeMap::new();
        map.insert(code, id);
        Self(map)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The item holding this language, if any.
    pub fn get(&self, code: &LanguageCode) -> Option<ContentId> {
        self.0.get(code).copied()
    }

    pub fn contains(&self, code: &LanguageCode) -> bool {
        self.0.contains_key(code)
    }

    /// Insert or replace the entry for a language.
    ///
    /// Returns the previous holder when the language was already mapped.
    pub fn insert(&mut self, code: LanguageCode, id: ContentId) -> Option<ContentId> {
        self.0.insert(code, id)
    }

    /// Remove the entry for a language, returning the item it mapped to.
    pub fn remove(&mut self, code: &LanguageCode) -> Option<ContentId> {
        self.0.remove(code)
    }

    /// Keep only the entries the predicate accepts.
    pub fn retain(&mut self, mut keep: impl FnMut(&LanguageCode, ContentId) -> bool) {
        self.0.retain(|code, id| keep(code, *id));
    }

    /// Language codes present in the group.
    pub fn codes(&self) -> impl Iterator<Item = &LanguageCode> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LanguageCode, ContentId)> {
        self.0.iter().map(|(code, id)| (code, *id))
    }
}

impl FromIterator<(LanguageCode, ContentId)> for TranslationGroup {
    fn from_iter<I: IntoIterator<Item = (LanguageCode, ContentId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
