//! Host event adapter.
//!
//! Hosts raise a [`ContentEvent`] at each editorial moment (save, create,
//! trash, untrash, delete) and this module turns it into tagger and
//! resolver calls. The credential check runs before anything is read or
//! written; recoverable domain errors come back as
//! [`DispatchOutcome::Skipped`] so a failed linkage never breaks the host's
//! own save path, while storage faults propagate as errors.

use tracing::{debug, info, warn};

use crate::content::ContentRef;
use crate::error::LinkError;
use crate::group::GroupId;
use crate::i18n::{LanguageCode, LanguageRegistry};
use crate::resolver::GroupResolver;
use crate::security::EventGuard;
use crate::store::{MetadataStore, RecordStore, StoreError};
use crate::tagger::LanguageTagger;

/// An editorial moment reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEvent {
    /// An existing item was saved. The language control's value and the
    /// explicit group reference from the "+ add translation" flow ride
    /// along when present.
    Saved {
        item: ContentRef,
        requested_language: Option<LanguageCode>,
        requested_group: Option<GroupId>,
    },
    /// A brand-new item was created. Unlike a save, creation never steals
    /// an occupied language slot and never relinks.
    Created {
        item: ContentRef,
        requested_language: Option<LanguageCode>,
        requested_group: Option<GroupId>,
    },
    Trashed { item: ContentRef },
    Untrashed { item: ContentRef },
    Deleted { item: ContentRef },
}

impl ContentEvent {
    pub fn item(&self) -> &ContentRef {
        match self {
            ContentEvent::Saved { item, .. }
            | ContentEvent::Created { item, .. }
            | ContentEvent::Trashed { item }
            | ContentEvent::Untrashed { item }
            | ContentEvent::Deleted { item } => item,
        }
    }
}

/// What dispatching an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The event's linkage work was carried out.
    Applied,
    /// The event was valid but nothing could (or needed to) be done.
    Skipped { reason: String },
    /// The credential check failed; nothing was read or written.
    Unauthorized,
}

/// Routes host events through the tagger and resolver.
pub struct EventDispatcher<'a, S: MetadataStore + RecordStore> {
    store: &'a S,
    registry: &'a LanguageRegistry,
    guard: EventGuard,
}

impl<'a, S: MetadataStore + RecordStore> EventDispatcher<'a, S> {
    pub fn new(store: &'a S, registry: &'a LanguageRegistry, guard: EventGuard) -> Self {
        EventDispatcher {
            store,
            registry,
            guard,
        }
    }

    fn tagger(&self) -> LanguageTagger<'a, S> {
        LanguageTagger::new(self.store, self.registry)
    }

    fn resolver(&self) -> GroupResolver<'a, S> {
        GroupResolver::new(self.store, self.registry)
    }

    /// Handle one host event.
    ///
    /// The credential is checked first; on failure the stores are never
    /// touched and the outcome is `Unauthorized`.
    pub fn dispatch(
        &self,
        event: &ContentEvent,
        credential: Option<&str>,
    ) -> Result<DispatchOutcome, StoreError> {
        if !self.guard.verify(credential) {
            warn!("Rejected event for {}: invalid credential", event.item());
            return Ok(DispatchOutcome::Unauthorized);
        }

        match event {
            ContentEvent::Saved {
                item,
                requested_language,
                requested_group,
            } => self.on_saved(item, requested_language.as_ref(), *requested_group),
            ContentEvent::Created {
                item,
                requested_language,
                requested_group,
            } => self.on_created(item, requested_language.as_ref(), *requested_group),
            ContentEvent::Trashed { item } => {
                debug!("{} trashed; group membership retained", item);
                Ok(DispatchOutcome::Applied)
            }
            ContentEvent::Untrashed { item } => {
                self.outcome(self.resolver().on_untrash(item))
            }
            ContentEvent::Deleted { item } => {
                self.outcome(self.resolver().on_permanent_delete(item))
            }
        }
    }

    /// Save flow: tag first, then reconcile the group.
    ///
    /// The language comes from the request when present, else the item's
    /// existing tag. A save carrying neither is skipped untouched. With an
    /// explicit group reference the item joins that group; otherwise its
    /// own group is relinked to the (possibly changed) language.
    fn on_saved(
        &self,
        item: &ContentRef,
        requested_language: Option<&LanguageCode>,
        requested_group: Option<GroupId>,
    ) -> Result<DispatchOutcome, StoreError> {
        let tagger = self.tagger();
        let previous = tagger.language(item)?;

        let Some(code) = requested_language.cloned().or_else(|| previous.clone()) else {
            debug!("Save event for {} carries no language; nothing to do", item);
            return Ok(DispatchOutcome::Skipped {
                reason: "no language on save".to_string(),
            });
        };

        tagger.set_language(item, &code)?;

        let result = match requested_group {
            Some(group) => self.resolver().link_to_group(item, group, &code),
            None => self.resolver().relink(item, &code, previous.as_ref()).map(|_| ()),
        };
        self.outcome(result)
    }

    /// Creation flow: reconcile the group first, then tag.
    ///
    /// Creation requires an explicit language. When joining an existing
    /// group, a refused join (occupied slot, inactive code) leaves the new
    /// item completely untagged.
    fn on_created(
        &self,
        item: &ContentRef,
        requested_language: Option<&LanguageCode>,
        requested_group: Option<GroupId>,
    ) -> Result<DispatchOutcome, StoreError> {
        let Some(code) = requested_language else {
            debug!("Creation event for {} carries no language; nothing to do", item);
            return Ok(DispatchOutcome::Skipped {
                reason: "no language on creation".to_string(),
            });
        };

        let tagger = self.tagger();
        match requested_group {
            Some(group) => match self.resolver().link_to_group(item, group, code) {
                Ok(()) => {
                    tagger.set_language(item, code)?;
                    Ok(DispatchOutcome::Applied)
                }
                Err(err) => self.outcome(Err(err)),
            },
            None => {
                if !tagger.set_language(item, code)? {
                    return Ok(DispatchOutcome::Skipped {
                        reason: format!("language '{}' not active", code),
                    });
                }
                self.outcome(self.resolver().ensure_group(item).map(|_| ()))
            }
        }
    }

    /// Tag every untagged item in `items` with the site default and give it
    /// a group. Returns how many items were tagged.
    ///
    /// This is the bulk admin tool for content that predates language
    /// support. Already-tagged items are left alone.
    pub fn apply_default_to_untagged(&self, items: &[ContentRef]) -> Result<usize, StoreError> {
        let tagger = self.tagger();
        let resolver = self.resolver();
        let default = self.registry.default_code();

        let mut tagged = 0;
        for item in items {
            if tagger.language(item)?.is_some() {
                continue;
            }
            tagger.set_language(item, default)?;
            match resolver.ensure_group(item) {
                Ok(_) => tagged += 1,
                Err(LinkError::Store(err)) => return Err(err),
                Err(err) => warn!("Could not group {} during bulk tagging: {}", item, err),
            }
        }

        info!("Applied default language '{}' to {} items", default, tagged);
        Ok(tagged)
    }

    fn outcome(&self, result: Result<(), LinkError>) -> Result<DispatchOutcome, StoreError> {
        match result {
            Ok(()) => Ok(DispatchOutcome::Applied),
            Err(LinkError::Store(err)) => Err(err),
            Err(err) => {
                warn!("Linkage skipped: {}", err);
                Ok(DispatchOutcome::Skipped {
                    reason: err.to_string(),
                })
            }
        }
    }
}
