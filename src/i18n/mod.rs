//! Language identity and configuration.
//!
//! Everything the rest of the crate knows about languages lives here: the
//! opaque code type and the configured registry of known/enabled languages.
//! The registry is an explicit value passed to component constructors; there
//! is deliberately no process-wide language state.
//!
//! # Architecture
//!
//! - `language`: `LanguageCode`, the opaque locale identifier used as group keys
//! - `registry`: `LanguageRegistry`, the configured language set with display
//!   metadata, enabled flags, and the single site default
//!
//! # Example
//!
//! ```rust,ignore
//! use lingua_link::i18n::{LanguageCode, LanguageRegistry, default_languages};
//!
//! let registry = LanguageRegistry::new(default_languages())?;
//! assert!(registry.is_enabled(&LanguageCode::new("en_US")));
//! ```

mod language;
mod registry;

pub use language::LanguageCode;
pub use registry::{default_languages, LanguageConfig, LanguageRegistry, RegistryError};
