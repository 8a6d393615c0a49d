//! Command implementations for the readlist CLI

pub mod books;
pub mod config;

// Re-export dispatcher functions for flat access from main.rs
pub use books::{run_add, run_cycle, run_delete, run_edit, run_list, run_stats};
pub use config::run_config;
