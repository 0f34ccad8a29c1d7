pub mod error;
pub mod types;

pub use error::{EndscriptError, ErrorKind};
pub use types::*;
