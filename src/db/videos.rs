//! Video registry repository
//!
//! Durable mapping from opaque video identifier to original name, current
//! name, and on-disk path. The rename, restore, and purge orchestrators all
//! go through this repository; it is the single synchronization point for
//! concurrent callers.

use std::path::Path;

use sqlx::SqlitePool;
use thiserror::Error;

/// Errors surfaced by the video registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Insert with an identifier that is already registered. The identity
    /// generator's existence check makes this unlikely, but the registry
    /// defends against it independently via the primary key.
    #[error("duplicate video id: {0}")]
    DuplicateId(String),

    /// Insert with a path another record already claims
    #[error("path already registered: {0}")]
    PathConflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Video record from the registry
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct VideoRecord {
    /// Opaque 11-character identifier; doubles as the renamed filename stem
    pub id: String,
    /// Filename as first observed, never mutated
    pub original_name: String,
    /// Filename currently assigned on disk
    pub new_name: String,
    /// Absolute path to the file
    pub path: String,
}

/// Field a substring search can match against
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    OriginalName,
    Path,
}

impl SearchField {
    fn column(self) -> &'static str {
        match self {
            Self::OriginalName => "original_name",
            Self::Path => "path",
        }
    }
}

pub struct VideoRepository {
    pool: SqlitePool,
}

impl VideoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a newly renamed video. Fails with [RegistryError::DuplicateId]
    /// if the identifier is already taken.
    pub async fn insert(
        &self,
        id: &str,
        original_name: &str,
        new_name: &str,
        path: &str,
    ) -> Result<(), RegistryError> {
        let result = sqlx::query(
            "INSERT INTO videos (id, original_name, new_name, path) VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(original_name)
        .bind(new_name)
        .bind(path)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                if e.message().contains("videos.path") {
                    Err(RegistryError::PathConflict(path.to_string()))
                } else {
                    Err(RegistryError::DuplicateId(id.to_string()))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All records, ordered by (directory of path, original name) for a
    /// stable, human-browsable listing. SQLite has no dirname, so the sort
    /// happens here rather than in SQL.
    pub async fn get_all(&self) -> Result<Vec<VideoRecord>, RegistryError> {
        let mut records = sqlx::query_as::<_, VideoRecord>(
            "SELECT id, original_name, new_name, path FROM videos",
        )
        .fetch_all(&self.pool)
        .await?;

        records.sort_by(|a, b| {
            let dir_a = Path::new(&a.path).parent().unwrap_or_else(|| Path::new(""));
            let dir_b = Path::new(&b.path).parent().unwrap_or_else(|| Path::new(""));
            dir_a
                .cmp(dir_b)
                .then_with(|| a.original_name.cmp(&b.original_name))
        });

        Ok(records)
    }

    /// Look up a single record by identifier
    pub async fn find_by_id(&self, id: &str) -> Result<Option<VideoRecord>, RegistryError> {
        let record = sqlx::query_as::<_, VideoRecord>(
            "SELECT id, original_name, new_name, path FROM videos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Case-sensitive substring search over one field. Uses instr() because
    /// SQLite LIKE is case-insensitive for ASCII.
    pub async fn find_by_substring(
        &self,
        field: SearchField,
        substring: &str,
    ) -> Result<Vec<VideoRecord>, RegistryError> {
        let query = format!(
            "SELECT id, original_name, new_name, path FROM videos WHERE instr({}, ?) > 0",
            field.column()
        );
        let records = sqlx::query_as::<_, VideoRecord>(&query)
            .bind(substring)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Remove a record. Returns false if the identifier was absent.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, RegistryError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Update the current name and path of a record after a restore.
    /// Returns false if the identifier was absent.
    pub async fn update(
        &self,
        id: &str,
        new_name: &str,
        new_path: &str,
    ) -> Result<bool, RegistryError> {
        let result = sqlx::query("UPDATE videos SET new_name = ?, path = ? WHERE id = ?")
            .bind(new_name)
            .bind(new_path)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
