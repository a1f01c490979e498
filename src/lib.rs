//! Language tagging and translation-group linkage for content management
//! backends.
//!
//! The host owns content storage, routing, and rendering; this crate owns
//! the multilingual bookkeeping on top of it:
//!
//! - **Tagger** ([`tagger::LanguageTagger`]): the per-item language tag and
//!   group-id back-reference, stored as host metadata.
//! - **Resolver** ([`resolver::GroupResolver`]): keeps translation-group
//!   records and back-references consistent across saves, language changes,
//!   untrash and delete.
//! - **Filter** ([`filter::LanguageFilter`]): the predicate admin list
//!   screens apply, with the default-or-untagged widening rule.
//! - **Switcher** ([`switcher::LanguageSwitcher`]): the links a page offers
//!   to its translations, through a host-supplied permalink port.
//! - **Events** ([`events::EventDispatcher`]): adapts host editorial events
//!   (save, create, trash, untrash, delete) onto the pieces above behind a
//!   credential guard.
//!
//! Storage is abstracted behind the [`store::MetadataStore`] and
//! [`store::RecordStore`] traits; [`store::MemoryStore`] and
//! [`store::SqliteStore`] adapters ship with the crate. Which languages
//! exist, which are active, and which one is the default comes from an
//! explicit [`i18n::LanguageRegistry`] value, buildable from environment
//! settings via [`config::Settings`].

pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod filter;
pub mod group;
pub mod i18n;
pub mod resolver;
pub mod security;
pub mod store;
pub mod switcher;
pub mod tagger;

pub use config::Settings;
pub use content::{ContentId, ContentKind, ContentRef, MetaScope};
pub use error::LinkError;
pub use events::{ContentEvent, DispatchOutcome, EventDispatcher};
pub use filter::{FilterContext, FilterSelection, LanguageFilter};
pub use group::{GroupId, TranslationGroup};
pub use i18n::{default_languages, LanguageCode, LanguageConfig, LanguageRegistry, RegistryError};
pub use resolver::GroupResolver;
pub use security::EventGuard;
pub use store::{MemoryStore, MetadataStore, RecordStore, SqliteStore, StoreError};
pub use switcher::{LanguageSwitcher, PermalinkResolver, SwitcherLink};
pub use tagger::LanguageTagger;
