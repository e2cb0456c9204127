pub mod candidate_cache;
pub mod command_log;
pub mod config;
pub mod error;
