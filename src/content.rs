//! Content item identity: kinds, ids, and the metadata keys they map to.
//!
//! The host platform owns content items; this crate only ever sees a kind
//! plus a numeric id. Kinds decide two independent things: which metadata
//! scope (post or term tables) an item's keys live in, and which namespace
//! prefixes its keys and group-record names. Attachments ride the post
//! namespace; menu entries are stored with terms but keep their own
//! namespace so menu groups never collide with taxonomy groups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned identifier of a content item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContentId(i64);

impl ContentId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ContentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Which host metadata table an item's keys live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaScope {
    Post,
    Term,
}

impl MetaScope {
    pub fn as_str(self) -> &'static str {
        match self {
            MetaScope::Post => "post",
            MetaScope::Term => "term",
        }
    }
}

impl fmt::Display for MetaScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kinds of content items that can carry a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Post,
    Attachment,
    Term,
    Menu,
}

impl ContentKind {
    /// The metadata scope holding this kind's keys.
    pub fn scope(self) -> MetaScope {
        match self {
            ContentKind::Post | ContentKind::Attachment => MetaScope::Post,
            ContentKind::Term | ContentKind::Menu => MetaScope::Term,
        }
    }

    /// The key/record-name prefix for this kind.
    ///
    /// Attachments share the post namespace: an attachment translation lives
    /// in the same group record a post translation would.
    pub fn namespace(self) -> &'static str {
        match self {
            ContentKind::Post | ContentKind::Attachment => "post",
            ContentKind::Term => "term",
            ContentKind::Menu => "menu",
        }
    }

    /// Metadata key holding the item's language code.
    pub fn language_meta_key(self) -> &'static str {
        match self {
            ContentKind::Post | ContentKind::Attachment => "_lingua_post_language",
            ContentKind::Term => "_lingua_term_language",
            ContentKind::Menu => "_lingua_menu_language",
        }
    }

    /// Metadata key holding the item's group-id back-reference.
    pub fn group_meta_key(self) -> &'static str {
        match self {
            ContentKind::Post | ContentKind::Attachment => "_lingua_post_translations_id",
            ContentKind::Term => "_lingua_term_translations_id",
            ContentKind::Menu => "_lingua_menu_translations_id",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Attachment => "attachment",
            ContentKind::Term => "term",
            ContentKind::Menu => "menu",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content item as callers name it: kind plus id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRef {
    pub kind: ContentKind,
    pub id: ContentId,
}

impl ContentRef {
    pub const fn new(kind: ContentKind, id: ContentId) -> Self {
        Self { kind, id }
    }

    pub const fn post(id: i64) -> Self {
        Self::new(ContentKind::Post, ContentId::new(id))
    }

    pub const fn attachment(id: i64) -> Self {
        Self::new(ContentKind::Attachment, ContentId::new(id))
    }

    pub const fn term(id: i64) -> Self {
        Self::new(ContentKind::Term, ContentId::new(id))
    }

    pub const fn menu(id: i64) -> Self {
        Self::new(ContentKind::Menu, ContentId::new(id))
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
