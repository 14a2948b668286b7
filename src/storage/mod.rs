//! Append-only audit log storage.
//!
//! Every completed full send is recorded as one flat row in `SQLite`.
//! Records are only ever inserted and read back, never updated, so there
//! is no read-modify-write contention between requests.

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::StorageError;

/// Status recorded for sends whose message came from the model flow.
pub const STATUS_AI_GENERATED: &str = "AI_GENERATED";

/// One audit record for a completed send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRecord {
    /// Customer first name from the request.
    pub customer_name: String,
    /// Staff name from the request.
    pub rep_name: String,
    /// Business name from the request.
    pub company_name: String,
    /// Item/service description from the request.
    pub items: String,
    /// Destination phone as supplied by the caller.
    pub phone: String,
    /// Tone hint from the request.
    pub flavor: String,
    /// The composed message that was sent.
    pub msg: String,
    /// The raw draft the message was composed from.
    pub prefix_raw: String,
}

/// A stored audit row, as read back from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSend {
    /// Record id.
    pub id: String,
    /// The recorded send.
    pub record: SendRecord,
    /// Record status.
    pub status: String,
    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}

/// `SQLite` storage backend for the audit log.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new `SQLite` storage instance backed by a file.
    ///
    /// Parent directories are created if missing; the schema is applied on
    /// connect.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails,
    /// or [`StorageError::MigrationFailed`] if the schema cannot be
    /// applied.
    pub async fn new(database_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = database_path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create database directory: {e}"),
            })?;
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path.display()))
                .map_err(|e| StorageError::ConnectionFailed {
                    message: format!("Invalid database path: {e}"),
                })?
                .journal_mode(SqliteJournalMode::Wal)
                .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to connect to database: {e}"),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Create a new in-memory `SQLite` storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn new_in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
            StorageError::ConnectionFailed {
                message: format!("Invalid memory database options: {e}"),
            }
        })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create in-memory database: {e}"),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Apply the schema. Idempotent (uses IF NOT EXISTS).
    async fn run_migrations(&self) -> Result<(), StorageError> {
        let schema_001 = include_str!("../../migrations/001_initial_schema.sql");
        sqlx::query(schema_001)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationFailed {
                version: "001".to_string(),
                message: format!("Failed to run migration 001: {e}"),
            })?;

        Ok(())
    }

    /// Append one audit record with status [`STATUS_AI_GENERATED`].
    ///
    /// Returns the generated record id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QueryFailed`] if the insert fails.
    pub async fn record_send(&self, record: &SendRecord) -> Result<String, StorageError> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO demo_sends \
             (id, customer_name, rep_name, company_name, items, phone, flavor, msg, prefix_raw, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&record.customer_name)
        .bind(&record.rep_name)
        .bind(&record.company_name)
        .bind(&record.items)
        .bind(&record.phone)
        .bind(&record.flavor)
        .bind(&record.msg)
        .bind(&record.prefix_raw)
        .bind(STATUS_AI_GENERATED)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::QueryFailed {
            query: "record_send".to_string(),
            message: e.to_string(),
        })?;

        Ok(id)
    }

    /// Read back the most recent audit rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QueryFailed`] if the query fails, or
    /// [`StorageError::Internal`] if a stored timestamp does not parse.
    pub async fn recent_sends(&self, limit: u32) -> Result<Vec<StoredSend>, StorageError> {
        let rows = sqlx::query(
            "SELECT id, customer_name, rep_name, company_name, items, phone, flavor, msg, prefix_raw, status, created_at \
             FROM demo_sends ORDER BY created_at DESC, id LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::QueryFailed {
            query: "recent_sends".to_string(),
            message: e.to_string(),
        })?;

        rows.into_iter()
            .map(|row| {
                let created_at: String = row.get("created_at");
                let created_at = created_at.parse::<DateTime<Utc>>().map_err(|e| {
                    StorageError::Internal {
                        message: format!("Failed to parse datetime '{created_at}': {e}"),
                    }
                })?;

                Ok(StoredSend {
                    id: row.get("id"),
                    record: SendRecord {
                        customer_name: row.get("customer_name"),
                        rep_name: row.get("rep_name"),
                        company_name: row.get("company_name"),
                        items: row.get("items"),
                        phone: row.get("phone"),
                        flavor: row.get("flavor"),
                        msg: row.get("msg"),
                        prefix_raw: row.get("prefix_raw"),
                    },
                    status: row.get("status"),
                    created_at,
                })
            })
            .collect()
    }
}
