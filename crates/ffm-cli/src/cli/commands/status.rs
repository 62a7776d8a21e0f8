//! `ffm status` – report stored progress.

use anyhow::Result;
use ffm_core::folder_key;
use ffm_core::progress_db::{status_line, ProgressDb};

pub async fn run_status(db: &ProgressDb, url: Option<&str>) -> Result<()> {
    match url {
        Some(url) => {
            let key = folder_key::folder_key(url)?;
            let record = db.get_record(&key).await?;
            println!("{}", status_line(record.as_ref()));
        }
        None => {
            let folders = db.list_folders().await?;
            if folders.is_empty() {
                println!("No folder progress recorded.");
            } else {
                println!("{:<10} {:<10} {}", "PROCESSED", "TOTAL", "FOLDER");
                for folder in folders {
                    println!(
                        "{:<10} {:<10} {}",
                        folder.processed, folder.total_files, folder.folder_key
                    );
                }
            }
        }
    }
    Ok(())
}
