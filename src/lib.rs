//! Blocktris (workspace facade crate).
//!
//! Re-exports the workspace crates as `blocktris::{types, core, storage}`.

pub use blocktris_core as core;
pub use blocktris_storage as storage;
pub use blocktris_types as types;
