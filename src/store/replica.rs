use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::models::Appointment;

use super::{AppointmentRecord, StoreError};

/// Column list shared by every SELECT; order matches
/// `AppointmentRecord::from_row`.
pub(crate) const SELECT_COLUMNS: &str = "id, art_id, art_name, start, ende, ort, title, uid";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY,
    art_id INTEGER NOT NULL,
    art_name TEXT NOT NULL,
    start TEXT NOT NULL,
    ende TEXT NOT NULL,
    ort TEXT NOT NULL,
    title TEXT NOT NULL,
    uid TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_appointments_uid ON appointments(uid);
";

/// Process-wide store handle, lazily initialized on first use.
static GLOBAL_STORE: OnceCell<ReplicaStore> = OnceCell::const_new();

/// SQLite-backed mirror of the remote appointment list, partitioned by
/// owner uid.
///
/// Clone is cheap: clones share the same connection. All SQLite work runs
/// via `spawn_blocking` so async callers never block the runtime, and a
/// started `replace_all` runs to completion even if the calling future is
/// dropped mid-flight.
#[derive(Clone)]
pub struct ReplicaStore {
    conn: Arc<Mutex<Connection>>,
}

impl ReplicaStore {
    /// Open (and create if needed) the replica database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::StorageUnavailable(e.to_string()))?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory replica (primarily for tests).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// The process-wide store, created on first call. Every later call
    /// returns the same handle regardless of the path argument.
    pub async fn global(db_path: PathBuf) -> Result<&'static ReplicaStore, StoreError> {
        GLOBAL_STORE
            .get_or_try_init(|| async move { Self::open(db_path) })
            .await
    }

    /// All persisted appointments for the given owner, in unspecified
    /// order. An owner with no rows yields an empty vec, not an error.
    pub async fn get_by_owner(&self, uid: &str) -> Result<Vec<Appointment>, StoreError> {
        let conn = Arc::clone(&self.conn);
        let uid = uid.to_owned();
        Self::run_blocking(move || {
            let conn = lock(&conn)?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM appointments WHERE uid = ?1",
                SELECT_COLUMNS
            ))?;
            let rows = stmt.query_map([uid.as_str()], AppointmentRecord::from_row)?;

            let mut appointments = Vec::new();
            for row in rows {
                appointments.push(row?.into_appointment());
            }
            Ok(appointments)
        })
        .await
    }

    /// Atomically replace every record for `uid` with `appointments`.
    ///
    /// Delete and insert run inside one transaction, so a concurrent
    /// reader observes either the fully-old or fully-new set, never a
    /// partial mix. Concurrent replacements for the same owner are
    /// last-writer-wins, which is fine because every write is a full
    /// authoritative snapshot.
    pub async fn replace_all(
        &self,
        uid: &str,
        appointments: &[Appointment],
    ) -> Result<(), StoreError> {
        let conn = Arc::clone(&self.conn);
        let uid = uid.to_owned();
        let records: Vec<AppointmentRecord> = appointments
            .iter()
            .map(AppointmentRecord::from_appointment)
            .collect();

        Self::run_blocking(move || {
            let mut conn = lock(&conn)?;
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM appointments WHERE uid = ?1", [uid.as_str()])?;
            {
                let mut stmt = tx.prepare(
                    "INSERT OR REPLACE INTO appointments
                     (id, art_id, art_name, start, ende, ort, title, uid)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )?;
                for record in &records {
                    stmt.execute(params![
                        record.id,
                        record.art_id,
                        record.art_name,
                        record.start,
                        record.ende,
                        record.ort,
                        record.title,
                        record.uid,
                    ])?;
                }
            }
            tx.commit()?;
            debug!(owner = %uid, rows = records.len(), "replica replaced");
            Ok(())
        })
        .await
    }

    async fn run_blocking<T, F>(work: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    {
        tokio::task::spawn_blocking(work)
            .await
            .map_err(|e| StoreError::StorageUnavailable(format!("storage task failed: {}", e)))?
    }
}

fn lock(conn: &Arc<Mutex<Connection>>) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
    conn.lock()
        .map_err(|_| StoreError::StorageUnavailable("storage lock poisoned".to_string()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentType;

    fn appointment(id: i64, uid: &str, title: &str) -> Appointment {
        Appointment {
            id,
            art: AppointmentType {
                id: 1,
                name: "Meeting".to_string(),
            },
            art_id: 1,
            start: "2025-03-14T10:30:00".to_string(),
            ende: "2025-03-14T11:00:00".to_string(),
            ort: "Berlin".to_string(),
            title: title.to_string(),
            uid: uid.to_string(),
        }
    }

    fn sorted_ids(appointments: &[Appointment]) -> Vec<i64> {
        let mut ids: Vec<i64> = appointments.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids
    }

    #[tokio::test]
    async fn empty_store_returns_empty_vec() {
        let store = ReplicaStore::open_in_memory().unwrap();
        let result = store.get_by_owner("u1").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn replace_then_get_returns_exactly_the_written_set() {
        let store = ReplicaStore::open_in_memory().unwrap();
        let written = vec![
            appointment(1, "u1", "Check-up"),
            appointment(2, "u1", "Review"),
        ];
        store.replace_all("u1", &written).await.unwrap();

        let read = store.get_by_owner("u1").await.unwrap();
        assert_eq!(sorted_ids(&read), vec![1, 2]);
        assert!(read.iter().all(|a| a.uid == "u1"));
    }

    #[tokio::test]
    async fn owners_are_isolated() {
        let store = ReplicaStore::open_in_memory().unwrap();
        store
            .replace_all("u1", &[appointment(1, "u1", "a")])
            .await
            .unwrap();
        store
            .replace_all("u2", &[appointment(2, "u2", "b")])
            .await
            .unwrap();

        let u1 = store.get_by_owner("u1").await.unwrap();
        assert_eq!(sorted_ids(&u1), vec![1]);
        assert!(u1.iter().all(|a| a.uid != "u2"));

        let u2 = store.get_by_owner("u2").await.unwrap();
        assert_eq!(sorted_ids(&u2), vec![2]);
    }

    #[tokio::test]
    async fn replacing_with_empty_set_clears_the_owner() {
        let store = ReplicaStore::open_in_memory().unwrap();
        store
            .replace_all("u1", &[appointment(1, "u1", "a")])
            .await
            .unwrap();
        store.replace_all("u1", &[]).await.unwrap();

        assert!(store.get_by_owner("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_supersedes_instead_of_merging() {
        let store = ReplicaStore::open_in_memory().unwrap();
        store
            .replace_all("u1", &[appointment(1, "u1", "old"), appointment(2, "u1", "old")])
            .await
            .unwrap();
        store
            .replace_all("u1", &[appointment(3, "u1", "new")])
            .await
            .unwrap();

        let read = store.get_by_owner("u1").await.unwrap();
        assert_eq!(sorted_ids(&read), vec![3]);
    }

    #[tokio::test]
    async fn replace_does_not_touch_other_owners() {
        let store = ReplicaStore::open_in_memory().unwrap();
        store
            .replace_all("u1", &[appointment(1, "u1", "a")])
            .await
            .unwrap();
        store.replace_all("u2", &[]).await.unwrap();

        assert_eq!(sorted_ids(&store.get_by_owner("u1").await.unwrap()), vec![1]);
    }

    #[tokio::test]
    async fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replica.db");

        {
            let store = ReplicaStore::open(&path).unwrap();
            store
                .replace_all("u1", &[appointment(1, "u1", "durable")])
                .await
                .unwrap();
        }

        let reopened = ReplicaStore::open(&path).unwrap();
        let read = reopened.get_by_owner("u1").await.unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].title, "durable");
    }

    #[tokio::test]
    async fn concurrent_readers_see_old_or_new_set_never_a_mix() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReplicaStore::open(dir.path().join("c.db")).unwrap();
        let old: Vec<Appointment> = (0..20).map(|i| appointment(i, "u1", "old")).collect();
        let new: Vec<Appointment> = (100..120).map(|i| appointment(i, "u1", "new")).collect();
        store.replace_all("u1", &old).await.unwrap();

        let writer = {
            let store = store.clone();
            let new = new.clone();
            tokio::spawn(async move {
                for _ in 0..10 {
                    store.replace_all("u1", &new).await.unwrap();
                }
            })
        };

        for _ in 0..20 {
            let read = store.get_by_owner("u1").await.unwrap();
            let titles: std::collections::HashSet<&str> =
                read.iter().map(|a| a.title.as_str()).collect();
            // A reader must never observe a half-replaced set.
            assert!(titles.len() <= 1, "observed mixed generations: {:?}", titles);
            assert_eq!(read.len(), 20);
        }

        writer.await.unwrap();
    }
}
