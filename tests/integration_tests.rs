//! Integration tests for the lingua-link crate
//!
//! These tests verify the interaction between multiple modules and the
//! complete editorial workflows: tagging, group linkage, filtering,
//! switching and event dispatch, over both storage adapters.
//!
//! NOTE: Adapter-level storage tests live in src/store.rs as unit tests;
//! this file drives whole workflows through the public API.

use std::collections::HashMap;

use tempfile::TempDir;

// Re-export modules from the crate
use lingua_link::{
    ContentEvent, ContentId, ContentRef, DispatchOutcome, EventDispatcher, EventGuard,
    FilterContext, FilterSelection, GroupId, GroupResolver, LanguageCode, LanguageConfig,
    LanguageFilter, LanguageRegistry, LanguageSwitcher, LanguageTagger, MemoryStore,
    MetadataStore, PermalinkResolver, RecordStore, SqliteStore,
};

// ==================== Test Helpers ====================

fn code(s: &str) -> LanguageCode {
    LanguageCode::new(s)
}

fn language(code: &str, slug: &str, is_default: bool, enabled: bool) -> LanguageConfig {
    LanguageConfig {
        code: LanguageCode::new(code),
        name: format!("{} name", code),
        native_name: format!("{} native", code),
        slug: slug.to_string(),
        is_default,
        enabled,
    }
}

/// English, French and Spanish active, with English as the site default.
fn test_registry() -> LanguageRegistry {
    LanguageRegistry::new(vec![
        language("en_US", "en", true, true),
        language("fr_FR", "fr", false, true),
        language("es_ES", "es", false, true),
    ])
    .expect("valid registry")
}

/// Create a SQLite store backed by a temporary file
fn create_sqlite_store() -> (SqliteStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("lingua.db");
    let store = SqliteStore::new(db_path.to_str().unwrap()).expect("Failed to open store");
    (store, temp_dir)
}

struct FakePermalinks {
    urls: HashMap<ContentRef, String>,
}

impl FakePermalinks {
    fn new() -> Self {
        FakePermalinks {
            urls: HashMap::new(),
        }
    }

    fn insert(&mut self, item: ContentRef, url: &str) {
        self.urls.insert(item, url.to_string());
    }
}

impl PermalinkResolver for FakePermalinks {
    fn permalink_for(&self, item: &ContentRef) -> Option<String> {
        self.urls.get(item).cloned()
    }
}

/// The canonical editorial walk: an English post gets a group, a French
/// translation joins through the "+" flow, the switcher reflects it, and
/// deletions unwind the group again.
fn run_editorial_walk<S: MetadataStore + RecordStore>(store: &S) {
    let registry = test_registry();
    let tagger = LanguageTagger::new(store, &registry);
    let resolver = GroupResolver::new(store, &registry);

    let post_a = ContentRef::post(10);
    let post_b = ContentRef::post(20);

    // Create A in the default language
    assert!(tagger.set_language(&post_a, &code("en_US")).expect("tag A"));
    let group = resolver.ensure_group(&post_a).expect("group A");
    assert_eq!(group, GroupId::new(10));

    let members = resolver.members(&post_a).expect("members");
    assert_eq!(members.len(), 1);
    assert_eq!(members.get(&code("en_US")), Some(ContentId::new(10)));

    // French and Spanish are still missing, in registry order
    let missing = resolver.missing_languages(&post_a).expect("missing");
    assert_eq!(missing, vec![code("fr_FR"), code("es_ES")]);

    // Link B as the French translation
    assert!(tagger.set_language(&post_b, &code("fr_FR")).expect("tag B"));
    resolver
        .link_to_group(&post_b, group, &code("fr_FR"))
        .expect("link B");

    assert_eq!(tagger.group_id(&post_b).expect("gid B"), Some(group));
    let members = resolver.members(&post_a).expect("members");
    assert_eq!(members.get(&code("fr_FR")), Some(ContentId::new(20)));
    assert_eq!(
        resolver.missing_languages(&post_a).expect("missing"),
        vec![code("es_ES")]
    );

    // The switcher on A offers exactly the French link
    let mut permalinks = FakePermalinks::new();
    permalinks.insert(post_a, "https://example.com/hello");
    permalinks.insert(post_b, "https://example.com/bonjour");
    let switcher = LanguageSwitcher::new(store, &registry, &permalinks);

    let links = switcher.links_for(&post_a).expect("links for A");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].code, code("fr_FR"));
    assert_eq!(links[0].url, "https://example.com/bonjour");

    // And on B it points back at the English original
    let links = switcher.links_for(&post_b).expect("links for B");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].code, code("en_US"));
    assert_eq!(links[0].url, "https://example.com/hello");

    // Deleting B shrinks the group back to A alone
    resolver.on_permanent_delete(&post_b).expect("delete B");
    let members = resolver.members(&post_a).expect("members");
    assert_eq!(members.len(), 1);
    assert_eq!(members.get(&code("fr_FR")), None);
    assert!(switcher.links_for(&post_a).expect("links").is_empty());

    // Deleting A removes the record entirely
    resolver.on_permanent_delete(&post_a).expect("delete A");
    assert!(store
        .get_record("lingua_post_translations_10")
        .expect("record read")
        .is_none());
}

// ==================== Editorial Walk Tests ====================

#[test]
fn test_editorial_walk_over_memory_store() {
    let store = MemoryStore::new();
    run_editorial_walk(&store);
}

#[test]
fn test_editorial_walk_over_sqlite_store() {
    let (store, _temp_dir) = create_sqlite_store();
    run_editorial_walk(&store);
}

// ==================== Event Dispatch Tests ====================

#[test]
fn test_event_driven_workflow() {
    let store = MemoryStore::new();
    let registry = test_registry();
    let dispatcher = EventDispatcher::new(&store, &registry, EventGuard::new("hook-token"));

    let post_a = ContentRef::post(10);
    let post_b = ContentRef::post(20);
    let credential = Some("hook-token");

    // Save A in English
    let outcome = dispatcher
        .dispatch(
            &ContentEvent::Saved {
                item: post_a,
                requested_language: Some(code("en_US")),
                requested_group: None,
            },
            credential,
        )
        .expect("save A");
    assert_eq!(outcome, DispatchOutcome::Applied);

    // Create B as the French translation via the "+" flow
    let outcome = dispatcher
        .dispatch(
            &ContentEvent::Saved {
                item: post_b,
                requested_language: Some(code("fr_FR")),
                requested_group: Some(GroupId::new(10)),
            },
            credential,
        )
        .expect("save B");
    assert_eq!(outcome, DispatchOutcome::Applied);

    let members = store
        .get_record("lingua_post_translations_10")
        .expect("record read")
        .expect("record");
    assert_eq!(members.get(&code("en_US")), Some(ContentId::new(10)));
    assert_eq!(members.get(&code("fr_FR")), Some(ContentId::new(20)));

    // Trash keeps the membership; untrash finds nothing to repair
    for event in [
        ContentEvent::Trashed { item: post_b },
        ContentEvent::Untrashed { item: post_b },
    ] {
        let outcome = dispatcher.dispatch(&event, credential).expect("lifecycle");
        assert_eq!(outcome, DispatchOutcome::Applied);
    }
    let members = store
        .get_record("lingua_post_translations_10")
        .expect("record read")
        .expect("record");
    assert_eq!(members.len(), 2);

    // Permanent deletions unwind the group
    dispatcher
        .dispatch(&ContentEvent::Deleted { item: post_b }, credential)
        .expect("delete B");
    dispatcher
        .dispatch(&ContentEvent::Deleted { item: post_a }, credential)
        .expect("delete A");
    assert!(store
        .get_record("lingua_post_translations_10")
        .expect("record read")
        .is_none());
}

#[test]
fn test_dispatcher_rejects_bad_credentials() {
    let store = MemoryStore::new();
    let registry = test_registry();
    let dispatcher = EventDispatcher::new(&store, &registry, EventGuard::new("hook-token"));
    let tagger = LanguageTagger::new(&store, &registry);

    let post = ContentRef::post(10);
    let event = ContentEvent::Saved {
        item: post,
        requested_language: Some(code("en_US")),
        requested_group: None,
    };

    // Wrong and missing credentials are rejected without touching storage
    for credential in [Some("wrong"), None] {
        let outcome = dispatcher.dispatch(&event, credential).expect("dispatch");
        assert_eq!(outcome, DispatchOutcome::Unauthorized);
        assert_eq!(tagger.language(&post).expect("language"), None);
        assert!(store
            .get_record("lingua_post_translations_10")
            .expect("record read")
            .is_none());
    }

    // The right credential goes through
    let outcome = dispatcher
        .dispatch(&event, Some("hook-token"))
        .expect("dispatch");
    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(
        tagger.language(&post).expect("language"),
        Some(code("en_US"))
    );
}

// ==================== Admin Filter Tests ====================

#[test]
fn test_admin_list_filtering_workflow() {
    let registry = test_registry();

    // A host-side list: items paired with their language metadata
    let rows = vec![
        (ContentRef::post(10), Some(code("en_US"))),
        (ContentRef::post(20), Some(code("fr_FR"))),
        (ContentRef::post(30), None),
        (ContentRef::term(5), Some(code("es_ES"))),
    ];

    let apply = |filter: &LanguageFilter| -> Vec<i64> {
        rows.iter()
            .filter(|(_, lang)| filter.matches(lang.as_ref()))
            .map(|(item, _)| item.id.get())
            .collect()
    };

    // The default screen shows default-tagged and untagged rows
    let context = FilterContext::default();
    let filter = LanguageFilter::for_context(&context, &registry);
    assert_eq!(apply(&filter), vec![10, 30]);

    // An explicit French selection narrows to exactly French
    let context = FilterContext {
        explicit: FilterSelection::from_param("fr_FR"),
        ..FilterContext::default()
    };
    let filter = LanguageFilter::for_context(&context, &registry);
    assert_eq!(apply(&filter), vec![20]);

    // The "all" sentinel disables filtering
    let context = FilterContext {
        explicit: FilterSelection::from_param("all"),
        ..FilterContext::default()
    };
    let filter = LanguageFilter::for_context(&context, &registry);
    assert_eq!(apply(&filter), vec![10, 20, 30, 5]);

    // Composed with a prior predicate, both must pass
    let filter = LanguageFilter::for_context(&FilterContext::default(), &registry);
    let tagged_only = filter.and(|lang| lang.is_some());
    let ids: Vec<i64> = rows
        .iter()
        .filter(|(_, lang)| tagged_only(lang.as_ref()))
        .map(|(item, _)| item.id.get())
        .collect();
    assert_eq!(ids, vec![10]);
}

// ==================== Switcher Tests ====================

#[test]
fn test_switcher_over_sqlite_store() {
    let (store, _temp_dir) = create_sqlite_store();
    let registry = test_registry();
    let tagger = LanguageTagger::new(&store, &registry);
    let resolver = GroupResolver::new(&store, &registry);

    let english = ContentRef::post(10);
    let french = ContentRef::post(20);
    let spanish = ContentRef::post(30);

    tagger.set_language(&english, &code("en_US")).expect("tag en");
    let group = resolver.ensure_group(&english).expect("group");
    for (item, lang) in [(french, "fr_FR"), (spanish, "es_ES")] {
        tagger.set_language(&item, &code(lang)).expect("tag");
        resolver
            .link_to_group(&item, group, &code(lang))
            .expect("link");
    }

    let mut permalinks = FakePermalinks::new();
    permalinks.insert(english, "https://example.com/en/post");
    permalinks.insert(spanish, "https://example.com/es/post");
    let switcher = LanguageSwitcher::new(&store, &registry, &permalinks);

    // From the French page: English and Spanish, in registry order; the
    // French entry itself is excluded.
    let links = switcher.links_for(&french).expect("links");
    let codes: Vec<&LanguageCode> = links.iter().map(|link| &link.code).collect();
    assert_eq!(codes, vec![&code("en_US"), &code("es_ES")]);

    // Archive views fall back to lang query arguments
    let links = switcher.links_for_context(&code("en_US"), "https://example.com/archive");
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].url, "https://example.com/archive?lang=fr");
    assert_eq!(links[1].url, "https://example.com/archive?lang=es");
}

// ==================== Bulk Tool Tests ====================

#[test]
fn test_bulk_default_tagging_over_sqlite() {
    let (store, _temp_dir) = create_sqlite_store();
    let registry = test_registry();
    let dispatcher = EventDispatcher::new(&store, &registry, EventGuard::disabled());
    let tagger = LanguageTagger::new(&store, &registry);

    let tagged = ContentRef::post(10);
    tagger.set_language(&tagged, &code("fr_FR")).expect("pre-tag");

    let items = [tagged, ContentRef::post(20), ContentRef::term(5)];
    let count = dispatcher
        .apply_default_to_untagged(&items)
        .expect("bulk tagging");
    assert_eq!(count, 2);

    assert_eq!(
        tagger.language(&tagged).expect("language"),
        Some(code("fr_FR"))
    );
    for item in [ContentRef::post(20), ContentRef::term(5)] {
        assert_eq!(
            tagger.language(&item).expect("language"),
            Some(code("en_US"))
        );
        assert_eq!(
            tagger.group_id(&item).expect("group id"),
            Some(GroupId::from(item.id))
        );
    }
}
