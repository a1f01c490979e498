//! Group linkage resolver.
//!
//! Keeps an item's group-id back-reference and its group's membership
//! mutually consistent. All writes are best-effort upserts over the plain
//! key/value stores: there is no transaction spanning the metadata write and
//! the record write, so a crash between the two can leave an item tagged but
//! not reflected in its group. That is the accepted consistency model;
//! drift heals lazily through pruning, the untrash repair path, and the next
//! relink.
//!
//! Write-path invariants enforced here (never by the store):
//! - at most one entry per language code in a group
//! - a language claimed by a different item is refused, not overwritten
//! - entries keyed by codes unknown to the registry are dropped on rewrite

use crate::content::ContentRef;
use crate::error::LinkError;
use crate::group::{GroupId, TranslationGroup};
use crate::i18n::{LanguageCode, LanguageRegistry};
use crate::store::{MetadataStore, RecordStore};
use crate::tagger::LanguageTagger;
use tracing::{debug, info, warn};

pub struct GroupResolver<'a, S: MetadataStore + RecordStore> {
    store: &'a S,
    registry: &'a LanguageRegistry,
}

impl<'a, S: MetadataStore + RecordStore> GroupResolver<'a, S> {
    pub fn new(store: &'a S, registry: &'a LanguageRegistry) -> Self {
        Self { store, registry }
    }

    fn tagger(&self) -> LanguageTagger<'a, S> {
        LanguageTagger::new(self.store, self.registry)
    }

    /// The item's group id, creating the group when it has none.
    ///
    /// A fresh group takes the item's own id and starts with the single
    /// entry for the item's language (site default when untagged).
    /// Idempotent per item.
    pub fn ensure_group(&self, item: &ContentRef) -> Result<GroupId, LinkError> {
        let tagger = self.tagger();
        if let Some(existing) = tagger.group_id(item)? {
            return Ok(existing);
        }

        let group = GroupId::from(item.id);
        let language = tagger.language_or_default(item)?;
        let members = TranslationGroup::singleton(language, item.id);

        self.store
            .set_record(&group.record_name(item.kind), &members)?;
        tagger.set_group_id(item, group)?;

        info!("Created translation group {} for {}", group, item);
        Ok(group)
    }

    /// Reconcile group membership after the item's language changed.
    ///
    /// `old_code` is the language the item was stored under before the
    /// change (None when it was untagged). The group id resolves like
    /// `ensure_group`: the stored back-reference when present, the item's
    /// own id otherwise. A missing record is rebuilt at that same id, which
    /// keeps the id stable for other members' repair paths.
    ///
    /// # Returns
    /// The group id the membership was persisted under.
    pub fn relink(
        &self,
        item: &ContentRef,
        new_code: &LanguageCode,
        old_code: Option<&LanguageCode>,
    ) -> Result<GroupId, LinkError> {
        self.require_enabled(new_code)?;

        let tagger = self.tagger();
        let group = match tagger.group_id(item)? {
            Some(existing) => existing,
            None => GroupId::from(item.id),
        };
        let name = group.record_name(item.kind);
        let mut members = self.store.get_record(&name)?.unwrap_or_default();

        if let Some(old) = old_code {
            if members.get(old) == Some(item.id) {
                members.remove(old);
            }
        }

        if let Some(holder) = members.get(new_code) {
            if holder != item.id {
                warn!(
                    "Language '{}' in group {} already claimed by item {}; relink of {} refused",
                    new_code, group, holder, item
                );
                return Err(LinkError::LanguageConflict {
                    group,
                    code: new_code.clone(),
                    holder,
                });
            }
        }

        members.insert(new_code.clone(), item.id);
        self.prune(&mut members);

        self.store.set_record(&name, &members)?;
        tagger.set_group_id(item, group)?;

        debug!(
            "Relinked {} as '{}' in group {} ({} members)",
            item,
            new_code,
            group,
            members.len()
        );
        Ok(group)
    }

    /// Link a new translation into an existing group (the "+" action).
    ///
    /// Requires `code` to be enabled and unclaimed in the target group. The
    /// target record is seeded fresh when it does not exist.
    pub fn link_to_group(
        &self,
        item: &ContentRef,
        target: GroupId,
        code: &LanguageCode,
    ) -> Result<(), LinkError> {
        self.require_enabled(code)?;

        let name = target.record_name(item.kind);
        let mut members = self.store.get_record(&name)?.unwrap_or_default();

        if let Some(holder) = members.get(code) {
            if holder != item.id {
                warn!(
                    "Language '{}' in group {} already claimed by item {}; link of {} refused",
                    code, target, holder, item
                );
                return Err(LinkError::LanguageConflict {
                    group: target,
                    code: code.clone(),
                    holder,
                });
            }
        }

        members.insert(code.clone(), item.id);
        self.prune(&mut members);

        self.store.set_record(&name, &members)?;
        self.tagger().set_group_id(item, target)?;

        info!("Linked {} as '{}' into group {}", item, code, target);
        Ok(())
    }

    /// Restore the item's membership entry after an untrash.
    ///
    /// Best-effort repair: items without a group are left alone, and a slot
    /// taken by a different item while this one sat in the trash stays with
    /// its new holder.
    pub fn on_untrash(&self, item: &ContentRef) -> Result<(), LinkError> {
        let tagger = self.tagger();
        let group = match tagger.group_id(item)? {
            Some(group) => group,
            None => {
                debug!("Untrashed {} has no translation group; nothing to restore", item);
                return Ok(());
            }
        };

        let language = tagger.language_or_default(item)?;
        let name = group.record_name(item.kind);
        let mut members = self.store.get_record(&name)?.unwrap_or_default();

        match members.get(&language) {
            Some(holder) if holder == item.id => return Ok(()),
            Some(holder) => {
                warn!(
                    "Language '{}' in group {} taken by item {} while {} was trashed; leaving group unchanged",
                    language, group, holder, item
                );
                return Ok(());
            }
            None => {}
        }

        members.insert(language.clone(), item.id);
        self.store.set_record(&name, &members)?;

        info!("Restored '{}' -> {} in group {}", language, item, group);
        Ok(())
    }

    /// Drop the item's entry from its group after a permanent delete.
    ///
    /// The entry is removed only when it still maps to this item; when the
    /// removal empties the group, the record is deleted outright.
    pub fn on_permanent_delete(&self, item: &ContentRef) -> Result<(), LinkError> {
        let tagger = self.tagger();
        let group = match tagger.group_id(item)? {
            Some(group) => group,
            None => return Ok(()),
        };
        let name = group.record_name(item.kind);

        let mut members = match self.store.get_record(&name)? {
            Some(members) => members,
            None => return Ok(()),
        };

        let language = tagger.language_or_default(item)?;
        if members.get(&language) == Some(item.id) {
            members.remove(&language);
        }

        if members.is_empty() {
            self.store.delete_record(&name)?;
            info!("Deleted empty translation group {} after removing {}", group, item);
        } else {
            self.store.set_record(&name, &members)?;
            debug!(
                "Removed {} from group {} ({} members remain)",
                item,
                group,
                members.len()
            );
        }

        Ok(())
    }

    /// Effective membership for an item.
    ///
    /// Falls back to a synthesized one-entry membership (the item under its
    /// own language) when the item has no group or the record is empty, so
    /// read paths always see the item itself.
    pub fn members(&self, item: &ContentRef) -> Result<TranslationGroup, LinkError> {
        let tagger = self.tagger();
        let stored = match tagger.group_id(item)? {
            Some(group) => self.store.get_record(&group.record_name(item.kind))?,
            None => None,
        };

        match stored {
            Some(members) if !members.is_empty() => Ok(members),
            _ => {
                let language = tagger.language_or_default(item)?;
                Ok(TranslationGroup::singleton(language, item.id))
            }
        }
    }

    /// Enabled languages the item's group has no translation for yet,
    /// in registry order. This is the set an "add translation" control
    /// offers.
    pub fn missing_languages(&self, item: &ContentRef) -> Result<Vec<LanguageCode>, LinkError> {
        let members = self.members(item)?;
        Ok(self
            .registry
            .list_enabled()
            .into_iter()
            .filter(|config| !members.contains(&config.code))
            .map(|config| config.code.clone())
            .collect())
    }

    fn require_enabled(&self, code: &LanguageCode) -> Result<(), LinkError> {
        if self.registry.is_enabled(code) {
            return Ok(());
        }
        if self.registry.contains(code) {
            Err(LinkError::InactiveLanguage(code.clone()))
        } else {
            Err(LinkError::UnknownLanguage(code.clone()))
        }
    }

    /// Drop entries keyed by codes the registry does not know.
    ///
    /// Known-but-disabled codes keep their entries; read paths hide them
    /// instead.
    fn prune(&self, members: &mut TranslationGroup) {
        let registry = self.registry;
        members.retain(|code, _| {
            let keep = registry.contains(code);
            if !keep {
                debug!("Pruned unknown language '{}' from group", code);
            }
            keep
        });
    }
}
