//! Record operations: get, set (whole-record upsert), remove, list.

use anyhow::Result;
use sqlx::Row;
use std::collections::BTreeSet;

use super::db::{unix_timestamp, ProgressDb};
use super::types::{FolderSummary, ProgressRecord};

impl ProgressDb {
    /// Fetch the record for one folder, or None if the folder is unknown.
    pub async fn get_record(&self, folder_key: &str) -> Result<Option<ProgressRecord>> {
        let row = sqlx::query(
            r#"
            SELECT total_files, processed_ids_json
            FROM folder_progress
            WHERE folder_key = ?1
            "#,
        )
        .bind(folder_key)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let total_files: i64 = row.get("total_files");
        let ids_json: String = row.get("processed_ids_json");
        let processed_ids: BTreeSet<String> = serde_json::from_str(&ids_json)?;

        Ok(Some(ProgressRecord {
            total_files,
            processed_ids,
        }))
    }

    /// Replace the folder's record wholesale (insert on first write).
    ///
    /// A single upsert per reconciliation keeps the ledger consistent even
    /// if the run dies right after: either the old record or the new one is
    /// on disk, never a mix.
    pub async fn set_record(&self, folder_key: &str, record: &ProgressRecord) -> Result<()> {
        let now = unix_timestamp();
        let ids_json = serde_json::to_string(&record.processed_ids)?;
        sqlx::query(
            r#"
            INSERT INTO folder_progress (
                folder_key, total_files, processed_ids_json, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT(folder_key) DO UPDATE SET
                total_files = excluded.total_files,
                processed_ids_json = excluded.processed_ids_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(folder_key)
        .bind(record.total_files)
        .bind(ids_json)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Forget a folder entirely (explicit user reset).
    pub async fn remove_record(&self, folder_key: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM folder_progress
            WHERE folder_key = ?1
            "#,
        )
        .bind(folder_key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List all known folders, most recently touched first.
    pub async fn list_folders(&self) -> Result<Vec<FolderSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT folder_key, total_files, processed_ids_json, updated_at
            FROM folder_progress
            ORDER BY updated_at DESC, folder_key ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let folder_key: String = row.get("folder_key");
            let total_files: i64 = row.get("total_files");
            let ids_json: String = row.get("processed_ids_json");
            let updated_at: i64 = row.get("updated_at");
            let processed_ids: BTreeSet<String> = serde_json::from_str(&ids_json)?;

            out.push(FolderSummary {
                folder_key,
                total_files,
                processed: processed_ids.len() as i64,
                updated_at,
            });
        }

        Ok(out)
    }
}
