//! Error taxonomy for linkage operations.
//!
//! Domain failures here are recoverable by design: callers (normally the
//! event adapter) log them and skip the operation, leaving stores untouched
//! except for writes that already landed. Storage faults pass through from
//! the adapter unchanged.

use crate::content::ContentId;
use crate::group::GroupId;
use crate::i18n::LanguageCode;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    /// The code is not in the language registry at all.
    #[error("language code '{0}' is not in the registry")]
    UnknownLanguage(LanguageCode),

    /// The code is known but not enabled for tagging or linking.
    #[error("language '{0}' is not enabled")]
    InactiveLanguage(LanguageCode),

    /// Another item already holds this language in the target group.
    ///
    /// The claim is refused and the group left unchanged; the prior holder
    /// is never evicted.
    #[error("language '{code}' in group {group} is already claimed by item {holder}")]
    LanguageConflict {
        group: GroupId,
        code: LanguageCode,
        holder: ContentId,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
