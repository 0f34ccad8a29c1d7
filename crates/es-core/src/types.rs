use std::fmt;

use serde::{Deserialize, Serialize};

pub const VERSION1_MARKER: &str = "[VERSN1]";
pub const VERSION2_MARKER: &str = "[VERSN2]";
pub const VERSION3_MARKER: &str = "[VERSN3]";

pub const ENDSCRIPT_EXTENSION: &str = "endscript";
pub const ENDXML_EXTENSION: &str = "endxml";
pub const ENDLAUNCHER_EXTENSION: &str = "endlauncher";

/// Provenance of a single script line, used both for command stamping and
/// for error diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    /// Path of the file the line came from, relative to the root script's
    /// directory when possible.
    pub file: String,
    pub text: String,
    /// 1-based, counted over every physical line of the file.
    pub index: usize,
}

impl ScriptLine {
    pub fn new(file: impl Into<String>, text: impl Into<String>, index: usize) -> Self {
        Self {
            file: file.into(),
            text: text.into(),
            index,
        }
    }

    /// A line typed in by the caller, with no file behind it.
    pub fn detached(text: impl Into<String>) -> Self {
        Self {
            file: String::new(),
            text: text.into(),
            index: 0,
        }
    }
}

impl fmt::Display for ScriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file.is_empty() {
            write!(f, "\"{}\"", self.text)
        } else {
            write!(f, "{}:{}", self.file, self.index)
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    /// Line-oriented commands, starting at `first_line` (0-based).
    Legacy { first_line: usize },
    /// Whole body passed through verbatim as a description.
    Opaque,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Append,
    AddCollection,
    #[serde(rename = "add_incareer")]
    AddInCareer,
    AddOrReplaceTexture,
    AddOrUpdateString,
    AddString,
    AddTexture,
    BindTextures,
    Checkbox,
    Combobox,
    CopyCollection,
    #[serde(rename = "copy_incareer")]
    CopyInCareer,
    CopyTexture,
    CreateFile,
    CreateFolder,
    Delete,
    End,
    EraseFile,
    EraseFolder,
    If,
    Import,
    ImportAll,
    Infobox,
    MoveFile,
    New,
    PackStream,
    RemoveCollection,
    #[serde(rename = "remove_incareer")]
    RemoveInCareer,
    RemoveString,
    RemoveTexture,
    ReplaceTexture,
    #[serde(rename = "speedreflect")]
    SpeedReflect,
    Static,
    StopErrors,
    UnlockMemory,
    UnpackStream,
    UpdateCollection,
    #[serde(rename = "update_incareer")]
    UpdateInCareer,
    UpdateString,
    UpdateTexture,
    Version,
    Watermark,
    /// First token did not name any keyword.
    Invalid,
    /// Line was blank, a comment or a brace.
    Empty,
    /// No-op stand-in built for unrecognized keywords.
    Optional,
}

impl CommandKind {
    /// Every kind reachable through a keyword, in vocabulary order.
    pub const KEYWORDS: [CommandKind; 42] = [
        CommandKind::Append,
        CommandKind::AddCollection,
        CommandKind::AddInCareer,
        CommandKind::AddOrReplaceTexture,
        CommandKind::AddOrUpdateString,
        CommandKind::AddString,
        CommandKind::AddTexture,
        CommandKind::BindTextures,
        CommandKind::Checkbox,
        CommandKind::Combobox,
        CommandKind::CopyCollection,
        CommandKind::CopyInCareer,
        CommandKind::CopyTexture,
        CommandKind::CreateFile,
        CommandKind::CreateFolder,
        CommandKind::Delete,
        CommandKind::End,
        CommandKind::EraseFile,
        CommandKind::EraseFolder,
        CommandKind::If,
        CommandKind::Import,
        CommandKind::ImportAll,
        CommandKind::Infobox,
        CommandKind::MoveFile,
        CommandKind::New,
        CommandKind::PackStream,
        CommandKind::RemoveCollection,
        CommandKind::RemoveInCareer,
        CommandKind::RemoveString,
        CommandKind::RemoveTexture,
        CommandKind::ReplaceTexture,
        CommandKind::SpeedReflect,
        CommandKind::Static,
        CommandKind::StopErrors,
        CommandKind::UnlockMemory,
        CommandKind::UnpackStream,
        CommandKind::UpdateCollection,
        CommandKind::UpdateInCareer,
        CommandKind::UpdateString,
        CommandKind::UpdateTexture,
        CommandKind::Version,
        CommandKind::Watermark,
    ];

    /// The script keyword for this kind. Designated kinds without a keyword
    /// return their lowercase name, which the registry never matches.
    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::Append => "append",
            CommandKind::AddCollection => "add_collection",
            CommandKind::AddInCareer => "add_incareer",
            CommandKind::AddOrReplaceTexture => "add_or_replace_texture",
            CommandKind::AddOrUpdateString => "add_or_update_string",
            CommandKind::AddString => "add_string",
            CommandKind::AddTexture => "add_texture",
            CommandKind::BindTextures => "bind_textures",
            CommandKind::Checkbox => "checkbox",
            CommandKind::Combobox => "combobox",
            CommandKind::CopyCollection => "copy_collection",
            CommandKind::CopyInCareer => "copy_incareer",
            CommandKind::CopyTexture => "copy_texture",
            CommandKind::CreateFile => "create_file",
            CommandKind::CreateFolder => "create_folder",
            CommandKind::Delete => "delete",
            CommandKind::End => "end",
            CommandKind::EraseFile => "erase_file",
            CommandKind::EraseFolder => "erase_folder",
            CommandKind::If => "if",
            CommandKind::Import => "import",
            CommandKind::ImportAll => "import_all",
            CommandKind::Infobox => "infobox",
            CommandKind::MoveFile => "move_file",
            CommandKind::New => "new",
            CommandKind::PackStream => "pack_stream",
            CommandKind::RemoveCollection => "remove_collection",
            CommandKind::RemoveInCareer => "remove_incareer",
            CommandKind::RemoveString => "remove_string",
            CommandKind::RemoveTexture => "remove_texture",
            CommandKind::ReplaceTexture => "replace_texture",
            CommandKind::SpeedReflect => "speedreflect",
            CommandKind::Static => "static",
            CommandKind::StopErrors => "stop_errors",
            CommandKind::UnlockMemory => "unlock_memory",
            CommandKind::UnpackStream => "unpack_stream",
            CommandKind::UpdateCollection => "update_collection",
            CommandKind::UpdateInCareer => "update_incareer",
            CommandKind::UpdateString => "update_string",
            CommandKind::UpdateTexture => "update_texture",
            CommandKind::Version => "version",
            CommandKind::Watermark => "watermark",
            CommandKind::Invalid => "invalid",
            CommandKind::Empty => "empty",
            CommandKind::Optional => "optional",
        }
    }

    pub fn is_designated(self) -> bool {
        matches!(
            self,
            CommandKind::Invalid | CommandKind::Empty | CommandKind::Optional
        )
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
