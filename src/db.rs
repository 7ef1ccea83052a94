use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

use kalender_core::storage::{load, save};
use kalender_core::{KeyValueStore, StorageError};

/// Get current time as milliseconds since Unix epoch.
pub fn current_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as i64
}

/// Initialize database connection pool with recommended pragmas.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5))
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

    // Every connection to an in-memory database opens a fresh, empty one
    let max_connections = if database_url.contains(":memory:") {
        1
    } else {
        10
    };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Run database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(include_str!("../migrations/001_create_kv_store.sql"))
        .execute(pool)
        .await?;
    Ok(())
}

/// Key-value store backed by the `kv_store` table.
///
/// Clones share the pool and the write lock.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    writes: Arc<Mutex<()>>,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            writes: Arc::new(Mutex::new(())),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Load the value under `key`, apply `change` and save the result.
    ///
    /// Updates run one at a time, so no change is lost to a concurrent one.
    /// Nothing is saved when `change` fails.
    pub async fn update<T, R, E, F>(&self, key: &str, change: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned + Default + Send + Sync,
        R: Send,
        E: From<StorageError>,
        F: FnOnce(&mut T) -> Result<R, E> + Send,
    {
        let _guard = self.writes.lock().await;
        let mut value: T = load(self, key).await?;
        let result = change(&mut value)?;
        save(self, key, &value).await?;
        Ok(result)
    }
}

fn db_error(e: sqlx::Error) -> StorageError {
    StorageError::Database(e.to_string())
}

impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_ms)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_ms = excluded.updated_ms
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(current_epoch_ms())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kalender_core::storage::keys;
    use kalender_core::{EventBook, NewEvent, Theme};

    /// Create a test database with in-memory SQLite.
    async fn setup_test_db() -> SqliteStore {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteStore::new(pool)
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = setup_test_db().await;
        assert_eq!(store.get("todos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_and_overwrite() {
        let store = setup_test_db().await;

        store.set("theme", "\"dark\"".to_string()).await.unwrap();
        assert_eq!(
            store.get("theme").await.unwrap().as_deref(),
            Some("\"dark\"")
        );

        store.set("theme", "\"light\"".to_string()).await.unwrap();
        assert_eq!(
            store.get("theme").await.unwrap().as_deref(),
            Some("\"light\"")
        );

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_typed_roundtrip() {
        let store = setup_test_db().await;

        let mut book = EventBook::new();
        book.add(NewEvent {
            date: chrono::NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            title: "Tog".to_string(),
            description: None,
            color: None,
            icon: None,
        })
        .unwrap();
        save(&store, keys::CUSTOM_EVENTS, &book).await.unwrap();
        save(&store, keys::THEME, &Theme::Dark).await.unwrap();

        let loaded: EventBook = load(&store, keys::CUSTOM_EVENTS).await.unwrap();
        assert_eq!(loaded, book);
        let theme: Theme = load(&store, keys::THEME).await.unwrap();
        assert_eq!(theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_db_check_constraints() {
        let store = setup_test_db().await;

        // Empty key should fail
        let result = sqlx::query("INSERT INTO kv_store (key, value, updated_ms) VALUES (?, ?, ?)")
            .bind("")
            .bind("[]")
            .bind(current_epoch_ms())
            .execute(store.pool())
            .await;
        assert!(result.is_err());

        // Key too long should fail
        let result = sqlx::query("INSERT INTO kv_store (key, value, updated_ms) VALUES (?, ?, ?)")
            .bind("k".repeat(65))
            .bind("[]")
            .bind(current_epoch_ms())
            .execute(store.pool())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_keep_every_change() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("kalender.db").display());
        let pool = init_pool(&url).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let store = SqliteStore::new(pool);

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .update("counter", |n: &mut u32| {
                            *n += 1;
                            Ok::<_, StorageError>(*n)
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let count: u32 = load(&store, "counter").await.unwrap();
        assert_eq!(count, 50);
    }

    #[tokio::test]
    async fn test_failed_update_saves_nothing() {
        let store = setup_test_db().await;
        save(&store, "counter", &7u32).await.unwrap();

        let result = store
            .update("counter", |n: &mut u32| {
                *n = 99;
                Err::<(), _>(StorageError::Database("rejected".to_string()))
            })
            .await;
        assert!(result.is_err());

        let count: u32 = load(&store, "counter").await.unwrap();
        assert_eq!(count, 7);
    }
}
