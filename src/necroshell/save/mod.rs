//! Versioned binary persistence: a framed file with a CRC-32-checked
//! payload, written through a backup-then-temp-then-rename protocol so a
//! crash can never clobber the last good save.
//!
//! `wire` holds the little-endian primitive encodings, `engine` the framing
//! and file protocol, `sidecar` the optional human-readable JSON summary.

pub mod engine;
pub mod sidecar;
pub mod wire;

pub use engine::{
    default_save_path, load_from_path, save_file_exists, save_file_size, save_to_path,
    validate_save_file, SaveError, SaveHeader, SaveState, SAVE_MAGIC, SAVE_VERSION,
};
pub use wire::{SaveReader, SaveWriter};
