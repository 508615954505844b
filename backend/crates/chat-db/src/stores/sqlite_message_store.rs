use crate::{DbError, MessageStore, Result as DbErrorResult};

use chat_core::Message;

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use log::{debug, info};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

const MAX_CONNECTIONS: u32 = 10;
const BUSY_TIMEOUT_SECS: u64 = 5;

/// Apply the bundled schema migrations to `pool`.
pub async fn run_migrations(pool: &SqlitePool) -> DbErrorResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: i64,
    client_id: String,
    message: String,
    created_at: i64,
}

impl TryFrom<MessageRow> for Message {
    type Error = DbError;

    #[track_caller]
    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let timestamp = DateTime::<Utc>::from_timestamp_micros(row.created_at).ok_or_else(|| {
            DbError::InvalidRow {
                table: "messages",
                message: format!("created_at out of range: {}", row.created_at),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(Message {
            sequence: row.id,
            sender_id: row.client_id,
            text: row.message,
            timestamp,
        })
    }
}

/// [`MessageStore`] backed by a SQLite database.
#[derive(Clone)]
pub struct SqliteMessageStore {
    pool: SqlitePool,
}

impl SqliteMessageStore {
    /// Wrap an existing pool. The schema must already be migrated.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database file at `path` and migrate it.
    pub async fn open(path: impl AsRef<Path>) -> DbErrorResult<Self> {
        let path = path.as_ref();
        info!("Opening message store: {}", path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal)
                    .busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS)),
            )
            .await?;

        run_migrations(&pool).await?;
        info!("Message store ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn register_identifier(&self, client_id: &str) -> DbErrorResult<()> {
        let joined_at = Utc::now().timestamp_micros();

        let result = sqlx::query(
            r#"
              INSERT INTO users (id, joined_at)
              VALUES (?, ?)
              ON CONFLICT(id) DO NOTHING
              "#,
        )
        .bind(client_id)
        .bind(joined_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::Conflict {
                client_id: client_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!("Registered identifier {}", client_id);
        Ok(())
    }

    async fn identifier_exists(&self, client_id: &str) -> DbErrorResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
                .bind(client_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn unregister_identifier(&self, client_id: &str) -> DbErrorResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(client_id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected();
        if removed == 0 {
            return Err(DbError::NotFound {
                client_id: client_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!("Unregistered identifier {}", client_id);
        Ok(removed)
    }

    async fn append(&self, sender_id: &str, text: &str) -> DbErrorResult<()> {
        let now = Utc::now().timestamp_micros();

        // Registration check and insert are one statement so a concurrent
        // leave cannot slip in between. created_at never goes backwards.
        let result = sqlx::query(
            r#"
              INSERT INTO messages (client_id, message, created_at)
              SELECT ?, ?, MAX(?, COALESCE((SELECT MAX(created_at) FROM messages), 0) + 1)
              WHERE EXISTS (SELECT 1 FROM users WHERE id = ?)
              "#,
        )
        .bind(sender_id)
        .bind(text)
        .bind(now)
        .bind(sender_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::Unauthorized {
                client_id: sender_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    async fn list_ordered(&self) -> DbErrorResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
              SELECT id, client_id, message, created_at
              FROM messages
              ORDER BY id ASC
              "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Message::try_from).collect()
    }

    async fn registered_identifiers(&self) -> DbErrorResult<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT id FROM users ORDER BY joined_at, id")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    async fn ping(&self) -> DbErrorResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        info!("Closing message store");
        self.pool.close().await;
    }
}
