//! `ffm reset <url>` – forget a folder's progress.

use anyhow::Result;
use ffm_core::folder_key;
use ffm_core::progress_db::ProgressDb;

pub async fn run_reset(db: &ProgressDb, url: &str) -> Result<()> {
    let key = folder_key::folder_key(url)?;
    db.remove_record(&key).await?;
    println!("Progress has been reset.");
    Ok(())
}
