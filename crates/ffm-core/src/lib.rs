pub mod config;
pub mod logging;

pub mod cycle;
pub mod driver;
pub mod folder_key;
pub mod page;
pub mod progress_db;
pub mod scanner;
pub mod wait;
