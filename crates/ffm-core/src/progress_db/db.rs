//! SQLite-backed ledger: connection, migration, timestamp helper.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Percent-encode a path for a sqlite:// URI so spaces and special chars
/// don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut encoded = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            ' ' => encoded.push_str("%20"),
            '#' => encoded.push_str("%23"),
            '?' => encoded.push_str("%3F"),
            '&' => encoded.push_str("%26"),
            c => encoded.push(c),
        }
    }
    format!("sqlite://{encoded}")
}

/// Handle to the folder-progress database.
///
/// The database file lives under the XDG state directory:
/// `~/.local/state/ffm/progress.db`.
#[derive(Clone)]
pub struct ProgressDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl ProgressDb {
    /// Open (or create) the default ledger and run migrations.
    pub async fn open_default() -> Result<Self> {
        let state_dir = xdg::BaseDirectories::with_prefix("ffm")?.get_state_home();
        tokio::fs::create_dir_all(&state_dir).await?;
        let db_path = state_dir.join("progress.db");

        let uri = path_to_sqlite_uri(&db_path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await?;

        let db = ProgressDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Open (or create) the ledger at a specific path. Creates parent dirs
    /// if needed. Intended for tests so the DB can live in a temp dir.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await?;
        let db = ProgressDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        // Single-table schema: one whole-record row per folder key.
        // `processed_ids_json` is a JSON array of row ids.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS folder_progress (
                folder_key TEXT PRIMARY KEY,
                total_files INTEGER NOT NULL DEFAULT 0,
                processed_ids_json TEXT NOT NULL DEFAULT '[]',
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Current time as Unix seconds (for ledger timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory ledger for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<ProgressDb> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = ProgressDb { pool };
    db.migrate().await?;
    Ok(db)
}
