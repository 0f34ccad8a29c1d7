use std::path::{Path, PathBuf};

use es_core::EndscriptError;
use serde::{Deserialize, Serialize};

mod codec;
mod links;

pub use codec::{deserialize, from_envelope, is_versioned, serialize, to_envelope};
pub use links::{LinkLoader, LinkType, PathType, ResolvedLink, SubLoader};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Usage {
    Invalid,
    User,
    Modder,
}

impl Usage {
    pub fn as_str(self) -> &'static str {
        match self {
            Usage::Invalid => "Invalid",
            Usage::User => "User",
            Usage::Modder => "Modder",
        }
    }

    fn parse(value: &str) -> Self {
        match value {
            "User" => Usage::User,
            "Modder" => Usage::Modder,
            _ => Usage::Invalid,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameId {
    None,
    Carbon,
    MostWanted,
    Prostreet,
    Undercover,
    Underground1,
    Underground2,
}

impl GameId {
    pub fn as_str(self) -> &'static str {
        match self {
            GameId::None => "None",
            GameId::Carbon => "Carbon",
            GameId::MostWanted => "MostWanted",
            GameId::Prostreet => "Prostreet",
            GameId::Undercover => "Undercover",
            GameId::Underground1 => "Underground1",
            GameId::Underground2 => "Underground2",
        }
    }

    fn parse(value: &str) -> Self {
        match value {
            "Carbon" => GameId::Carbon,
            "MostWanted" => GameId::MostWanted,
            "Prostreet" => GameId::Prostreet,
            "Undercover" => GameId::Undercover,
            "Underground1" => GameId::Underground1,
            "Underground2" => GameId::Underground2,
            _ => GameId::None,
        }
    }
}

/// Run configuration handed to the host: which game, where it lives, and
/// which endscript to run with which side files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Launch {
    pub usage: String,
    pub game: String,
    /// Game installation directory.
    pub directory: String,
    /// Endscript path, relative to the descriptor's own directory.
    pub endscript: String,
    /// Files that must exist under `directory`.
    pub files: Vec<String>,
    pub links: Vec<SubLoader>,
    /// Directory of the descriptor file. Filled in on load, never written.
    #[serde(skip)]
    pub this_dir: PathBuf,
}

impl Default for Launch {
    fn default() -> Self {
        Self {
            usage: Usage::User.as_str().to_string(),
            game: GameId::None.as_str().to_string(),
            directory: String::new(),
            endscript: String::new(),
            files: Vec::new(),
            links: Vec::new(),
            this_dir: PathBuf::new(),
        }
    }
}

/// Descriptor paths are written with Windows separators; the slash form
/// resolves on every platform.
pub(crate) fn host_path(raw: &str) -> PathBuf {
    PathBuf::from(raw.replace('\\', "/"))
}

impl Launch {
    pub fn usage_id(&self) -> Usage {
        Usage::parse(&self.usage)
    }

    pub fn game_id(&self) -> GameId {
        GameId::parse(&self.game)
    }

    pub fn endscript_path(&self) -> PathBuf {
        self.this_dir.join(host_path(&self.endscript))
    }

    pub fn check_endscript(&self) -> Result<(), EndscriptError> {
        let path = self.endscript_path();
        if !path.is_file() {
            return Err(EndscriptError::file_not_found(path));
        }
        Ok(())
    }

    pub fn check_files(&self) -> Result<(), EndscriptError> {
        let directory = host_path(&self.directory);
        for file in &self.files {
            let path = directory.join(host_path(file));
            if !path.is_file() {
                return Err(EndscriptError::file_not_found(path));
            }
        }
        Ok(())
    }

    pub fn with_this_dir(mut self, this_dir: impl AsRef<Path>) -> Self {
        self.this_dir = this_dir.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests;
