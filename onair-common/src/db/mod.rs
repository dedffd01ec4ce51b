//! Database access layer

pub mod init;

pub use init::{init_database, init_memory_database, init_schema};
