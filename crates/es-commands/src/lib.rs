mod command;
mod host;
pub mod ops;
mod registry;

pub use command::{Command, CommandState, SingleExecutable};
pub use host::{AssetStore, ExecutionContext};
pub use registry::{construct, is_singly_executable, kind_for};
