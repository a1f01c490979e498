//! Storage ports and adapters.
//!
//! The core treats host storage as two black boxes: a per-item metadata
//! store and a named-record store holding group mappings. Both are plain
//! get/set/delete with last-write-wins overwrite semantics; there is no
//! compare-and-swap and none is expected by the callers. The mutexes below
//! serialize access to a connection or map, they do not coordinate logical
//! records across requests.
//!
//! Two adapters ship with the crate: `MemoryStore` for tests and embedded
//! hosts, and `SqliteStore` for standalone deployments.

use crate::content::{ContentId, MetaScope};
use crate::group::TranslationGroup;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Faults raised by storage adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("record '{name}' holds malformed data: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-item metadata: string values keyed by (scope, item, key).
pub trait MetadataStore {
    fn get_meta(
        &self,
        scope: MetaScope,
        item: ContentId,
        key: &str,
    ) -> Result<Option<String>, StoreError>;

    fn set_meta(
        &self,
        scope: MetaScope,
        item: ContentId,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    fn delete_meta(&self, scope: MetaScope, item: ContentId, key: &str)
        -> Result<(), StoreError>;
}

/// Named records holding translation-group mappings.
pub trait RecordStore {
    fn get_record(&self, name: &str) -> Result<Option<TranslationGroup>, StoreError>;

    fn set_record(&self, name: &str, group: &TranslationGroup) -> Result<(), StoreError>;

    fn delete_record(&self, name: &str) -> Result<(), StoreError>;
}

/// In-memory adapter backed by hash maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    meta: Mutex<HashMap<(MetaScope, ContentId, String), String>>,
    records: Mutex<HashMap<String, TranslationGroup>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStore for MemoryStore {
    fn get_meta(
        &self,
        scope: MetaScope,
        item: ContentId,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        let meta = self.meta.lock().unwrap();
        Ok(meta.get(&(scope, item, key.to_string())).cloned())
    }

    fn set_meta(
        &self,
        scope: MetaScope,
        item: ContentId,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let mut meta = self.meta.lock().unwrap();
        meta.insert((scope, item, key.to_string()), value.to_string());
        Ok(())
    }

    fn delete_meta(
        &self,
        scope: MetaScope,
        item: ContentId,
        key: &str,
    ) -> Result<(), StoreError> {
        let mut meta = self.meta.lock().unwrap();
        meta.remove(&(scope, item, key.to_string()));
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn get_record(&self, name: &str) -> Result<Option<TranslationGroup>, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records.get(name).cloned())
    }

    fn set_record(&self, name: &str, group: &TranslationGroup) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        records.insert(name.to_string(), group.clone());
        Ok(())
    }

    fn delete_record(&self, name: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        records.remove(name);
        Ok(())
    }
}

/// SQLite adapter.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at the given path and create tables.
    pub fn new(database_path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(database_path)?;
        Self::create_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a private in-memory database, mostly useful in tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::create_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn create_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS content_meta (
                scope TEXT NOT NULL,
                item_id INTEGER NOT NULL,
                meta_key TEXT NOT NULL,
                meta_value TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (scope, item_id, meta_key)
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS named_records (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }
}

impl MetadataStore for SqliteStore {
    fn get_meta(
        &self,
        scope: MetaScope,
        item: ContentId,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT meta_value FROM content_meta
             WHERE scope = ?1 AND item_id = ?2 AND meta_key = ?3",
        )?;

        let value: Option<String> = stmt
            .query_row(params![scope.as_str(), item.get(), key], |row| row.get(0))
            .optional()?;

        Ok(value)
    }

    fn set_meta(
        &self,
        scope: MetaScope,
        item: ContentId,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO content_meta (scope, item_id, meta_key, meta_value, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (scope, item_id, meta_key)
             DO UPDATE SET meta_value = excluded.meta_value, updated_at = excluded.updated_at",
            params![scope.as_str(), item.get(), key, value, now],
        )?;

        Ok(())
    }

    fn delete_meta(
        &self,
        scope: MetaScope,
        item: ContentId,
        key: &str,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM content_meta WHERE scope = ?1 AND item_id = ?2 AND meta_key = ?3",
            params![scope.as_str(), item.get(), key],
        )?;

        Ok(())
    }
}

impl RecordStore for SqliteStore {
    fn get_record(&self, name: &str) -> Result<Option<TranslationGroup>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM named_records WHERE name = ?1")?;

        let raw: Option<String> = stmt
            .query_row(params![name], |row| row.get(0))
            .optional()?;

        match raw {
            Some(value) => {
                let group =
                    serde_json::from_str(&value).map_err(|source| StoreError::Malformed {
                        name: name.to_string(),
                        source,
                    })?;
                Ok(Some(group))
            }
            None => Ok(None),
        }
    }

    fn set_record(&self, name: &str, group: &TranslationGroup) -> Result<(), StoreError> {
        let value = serde_json::to_string(group).map_err(|source| StoreError::Malformed {
            name: name.to_string(),
            source,
        })?;

        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO named_records (name, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (name)
             DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![name, value, now],
        )?;

        Ok(())
    }

    fn delete_record(&self, name: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM named_records WHERE name = ?1",
            params![name],
        )?;

        Ok(())
    }
}
