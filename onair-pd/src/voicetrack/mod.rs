//! Voice-break pipeline
//!
//! Runs after playlist resolution, consuming the already-resolved slot
//! sequence as read-only input: locate the songs around each fixed
//! checkpoint, build a persona-driven prompt, hand it to the external
//! text generator, and upsert one voice track per checkpoint.

pub mod locator;
pub mod prompt;
pub mod scripts;

pub use locator::{locate_songs, LocatedSongs};
pub use scripts::{CheckpointError, ScriptBatch};
