// SPDX-License-Identifier: MPL-2.0
//! Application state persistence using an embedded SQLite database.
//!
//! The only durable application state is the onboarding flag: whether the
//! user has completed the first-run slides. It lives in a single-row table
//! keyed by a fixed identifier, separate from the user-editable
//! `settings.toml` preferences.
//!
//! # Path Resolution
//!
//! The database file location can be customized for testing or portable deployments:
//! 1. Use [`OnboardingStore::open`] with an explicit path
//! 2. Set `VIDGALLERY_DATA_DIR` environment variable
//! 3. Falls back to platform-specific data directory

use super::paths;
use crate::error::{Error, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// Database file name within the app data directory.
const STATE_FILE: &str = "state.db";

/// Fixed primary key of the onboarding row.
const ONBOARDING_ROW_ID: i64 = 1;

/// Current schema version, stored in the `user_version` pragma.
const SCHEMA_VERSION: i64 = 1;

/// Persists the onboarding-completed flag.
///
/// Opened once at startup and owned by the application for its whole
/// lifetime. Dropping the store closes the connection.
#[derive(Debug)]
pub struct OnboardingStore {
    conn: Connection,
}

impl OnboardingStore {
    /// Path of the database file inside `base_dir`, or the default data directory.
    pub fn path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::data_dir(base_dir).map(|dir| dir.join(STATE_FILE))
    }

    /// Opens or creates the store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("opening onboarding store at {:?}", path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Opens a store that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self> {
        tracing::debug!("opening in-memory onboarding store");
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Opens the store in the default data directory, falling back to memory.
    ///
    /// Returns the store plus an i18n warning key when the on-disk database
    /// could not be used. The store is `None` only if SQLite cannot open an
    /// in-memory database either.
    pub fn open_or_fallback(base_dir: Option<PathBuf>) -> (Option<Self>, Option<String>) {
        let on_disk = Self::path_with_override(base_dir)
            .ok_or_else(|| Error::Io("no data directory available".into()))
            .and_then(Self::open);

        match on_disk {
            Ok(store) => (Some(store), None),
            Err(err) => {
                tracing::warn!("onboarding store unavailable, using memory: {}", err);
                let store = Self::open_in_memory()
                    .map_err(|mem_err| tracing::error!("in-memory store failed: {}", mem_err))
                    .ok();
                (store, Some("notification-state-open-error".to_string()))
            }
        }
    }

    /// Returns whether onboarding has been completed.
    ///
    /// A missing row or any read error counts as "not visited".
    #[must_use]
    pub fn is_onboarding_visited(&self) -> bool {
        let visited: rusqlite::Result<Option<bool>> = self
            .conn
            .query_row(
                "SELECT visited FROM onboarding WHERE id = ?1",
                params![ONBOARDING_ROW_ID],
                |row| row.get(0),
            )
            .optional();

        match visited {
            Ok(flag) => flag.unwrap_or(false),
            Err(err) => {
                tracing::warn!("failed to read onboarding flag: {}", err);
                false
            }
        }
    }

    /// Records that onboarding has been completed. Safe to call repeatedly.
    pub fn mark_onboarding_visited(&self) -> Result<()> {
        self.conn.execute(
            "INSERT INTO onboarding (id, visited) VALUES (?1, 1)
             ON CONFLICT(id) DO UPDATE SET visited = excluded.visited",
            params![ONBOARDING_ROW_ID],
        )?;
        tracing::info!("onboarding marked as visited");
        Ok(())
    }

    fn migrate(&self) -> Result<()> {
        let current: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if current < SCHEMA_VERSION {
            tracing::info!("migrating state schema v{} -> v{}", current, SCHEMA_VERSION);
            if current < 1 {
                self.conn.execute_batch(
                    "CREATE TABLE IF NOT EXISTS onboarding (
                        id INTEGER PRIMARY KEY,
                        visited INTEGER NOT NULL
                    );",
                )?;
            }
            self.conn
                .pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn fresh_store_is_not_visited() {
        let store = OnboardingStore::open_in_memory().expect("open store");
        assert!(!store.is_onboarding_visited());
    }

    #[test]
    fn mark_then_read_is_visited() {
        let store = OnboardingStore::open_in_memory().expect("open store");
        store.mark_onboarding_visited().expect("mark visited");
        assert!(store.is_onboarding_visited());
    }

    #[test]
    fn mark_is_idempotent() {
        let store = OnboardingStore::open_in_memory().expect("open store");
        store.mark_onboarding_visited().expect("first mark");
        store.mark_onboarding_visited().expect("second mark");
        assert!(store.is_onboarding_visited());

        let rows: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM onboarding", [], |row| row.get(0))
            .expect("count rows");
        assert_eq!(rows, 1);
    }

    #[test]
    fn flag_survives_reopen() {
        let temp_dir = tempdir().expect("create temp dir");
        let path = temp_dir.path().join("nested").join(STATE_FILE);

        {
            let store = OnboardingStore::open(&path).expect("open store");
            assert!(!store.is_onboarding_visited());
            store.mark_onboarding_visited().expect("mark visited");
        }

        let reopened = OnboardingStore::open(&path).expect("reopen store");
        assert!(reopened.is_onboarding_visited());
    }

    #[test]
    fn migration_sets_schema_version() {
        let store = OnboardingStore::open_in_memory().expect("open store");
        let version: i64 = store
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .expect("read version");
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn missing_table_reads_as_not_visited() {
        let store = OnboardingStore::open_in_memory().expect("open store");
        store
            .conn
            .execute_batch("DROP TABLE onboarding;")
            .expect("drop table");
        assert!(!store.is_onboarding_visited());
    }

    #[test]
    fn open_or_fallback_uses_memory_when_path_is_unusable() {
        let temp_dir = tempdir().expect("create temp dir");
        // A regular file where the data directory should be.
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").expect("write blocker");

        let (store, warning) = OnboardingStore::open_or_fallback(Some(blocker.join("sub")));
        let store = store.expect("memory fallback");
        assert_eq!(warning.as_deref(), Some("notification-state-open-error"));
        assert!(!store.is_onboarding_visited());
        store.mark_onboarding_visited().expect("memory store is writable");
    }

    #[test]
    fn open_or_fallback_opens_on_disk_store() {
        let temp_dir = tempdir().expect("create temp dir");
        let (store, warning) =
            OnboardingStore::open_or_fallback(Some(temp_dir.path().to_path_buf()));
        let store = store.expect("on-disk store");
        assert!(warning.is_none());
        store.mark_onboarding_visited().expect("mark visited");
        assert!(temp_dir.path().join(STATE_FILE).exists());
    }
}
