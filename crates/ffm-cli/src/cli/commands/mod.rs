//! Command implementations for the ffm CLI.

mod config;
mod download;
mod reset;
mod status;

pub use config::run_config;
pub use download::{run_all, run_batch};
pub use reset::run_reset;
pub use status::run_status;
