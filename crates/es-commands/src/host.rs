use es_core::EndscriptError;

use crate::ops::{ArchiveOp, CollectionOp, FileOp, StringOp, TextureOp};

/// Loaded asset databases a command can mutate. This is all a profile has
/// to offer for single-command execution.
pub trait AssetStore {
    fn apply_collection(&mut self, op: &CollectionOp) -> Result<(), EndscriptError>;
    fn apply_texture(&mut self, op: &TextureOp) -> Result<(), EndscriptError>;
    fn apply_string(&mut self, op: &StringOp) -> Result<(), EndscriptError>;
}

/// The shared mutable target of a batch run. One instance per run; every
/// command borrows it in turn.
pub trait ExecutionContext: AssetStore {
    fn apply_file(&mut self, op: &FileOp) -> Result<(), EndscriptError>;
    fn apply_archive(&mut self, op: &ArchiveOp) -> Result<(), EndscriptError>;
}
