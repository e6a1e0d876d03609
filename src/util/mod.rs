//! Shared utilities

pub mod config;
pub mod fs;

pub use config::GenerateOptions;
pub use fs::{DirectoryLister, OsDirectoryLister};
