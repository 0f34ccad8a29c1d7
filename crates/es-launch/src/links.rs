use std::path::PathBuf;

use es_core::EndscriptError;
use serde::{Deserialize, Serialize};

use crate::{host_path, GameId, Launch};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathType {
    /// Resolved against the descriptor's directory.
    Relative,
    /// Resolved against the game directory.
    Absolute,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LinkType {
    BinKeys,
    VltKeys,
    Attributes,
    FeAttrib,
    Labels,
}

impl LinkType {
    const EXPECTED: &'static str = "one of BinKeys, VltKeys, Attributes, FeAttrib, Labels";

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "BinKeys" => Some(LinkType::BinKeys),
            "VltKeys" => Some(LinkType::VltKeys),
            "Attributes" => Some(LinkType::Attributes),
            "FeAttrib" => Some(LinkType::FeAttrib),
            "Labels" => Some(LinkType::Labels),
            _ => None,
        }
    }
}

/// A side file the host loads before running the endscript, such as a key
/// or label dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubLoader {
    pub load_type: String,
    pub path_type: PathType,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub link_type: LinkType,
    pub path: PathBuf,
}

pub trait LinkLoader {
    fn load(&mut self, link: &ResolvedLink, game: GameId) -> Result<(), EndscriptError>;
}

impl Launch {
    pub fn resolved_links(&self) -> Result<Vec<ResolvedLink>, EndscriptError> {
        let directory = host_path(&self.directory);
        self.links
            .iter()
            .map(|link| -> Result<ResolvedLink, EndscriptError> {
                let link_type = LinkType::parse(&link.load_type).ok_or_else(|| {
                    EndscriptError::invalid_argument(&link.load_type, LinkType::EXPECTED)
                })?;
                let base = match link.path_type {
                    PathType::Relative => self.this_dir.clone(),
                    PathType::Absolute => directory.clone(),
                };
                Ok(ResolvedLink {
                    link_type,
                    path: base.join(host_path(&link.file)),
                })
            })
            .collect()
    }

    /// Resolves every link first, then hands them to `loader` in order.
    pub fn load_links(&self, loader: &mut dyn LinkLoader) -> Result<(), EndscriptError> {
        let game = self.game_id();
        for link in self.resolved_links()? {
            tracing::debug!(path = %link.path.display(), kind = ?link.link_type, "loading link");
            loader.load(&link, game)?;
        }
        Ok(())
    }
}
