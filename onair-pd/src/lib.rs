//! # OnAir Program Director
//!
//! Hour playlist resolution and voice-break scripting engine. Given a
//! station's clock template, song library, and recent play history, the
//! program director produces a concrete, conflict-free playlist for one
//! station/DJ/hour, then scripts each voice break against the songs
//! actually placed around it.
//!
//! Entry points:
//! - [`ProgramDirector::build_hour_playlist`] - resolve one broadcast hour
//! - [`ProgramDirector::generate_voice_track_scripts`] - script the hour's
//!   voice breaks
//!
//! Storage, text generation, and all HTTP plumbing are collaborators behind
//! the traits in [`store`]; the engine is invoked in-process.

pub mod assembler;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod pool;
pub mod selector;
pub mod store;
pub mod types;
pub mod voicetrack;

pub use assembler::{HourPlaylistSummary, ProgramDirector};
pub use config::{ProgramConfig, ScoringWeights, VoiceBreakCheckpoint};
pub use error::{EngineError, EngineResult};
pub use store::{LibraryStore, PlaylistStore, TextGenerator};
pub use voicetrack::{CheckpointError, ScriptBatch};
