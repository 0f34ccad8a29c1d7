//! Prepared payloads, one family per host hook.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum CollectionScope {
    /// A collection inside a database manager, e.g. `CarTypeInfos`.
    Manager { file: String, manager: String },
    /// A node of the career tree, addressed by root and class.
    Career {
        file: String,
        root: String,
        class: String,
    },
}

/// Optional `expand node` pair addressing a sub-part of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubPart {
    pub expand: String,
    pub node: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CollectionAction {
    Add {
        name: String,
    },
    Copy {
        from: String,
        name: String,
    },
    Remove {
        name: String,
    },
    Update {
        name: String,
        sub_part: Option<SubPart>,
        property: String,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionOp {
    pub scope: CollectionScope,
    pub action: CollectionAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TextureAction {
    Add { key: String, dds: String },
    AddOrReplace { key: String, dds: String },
    Replace { key: String, dds: String },
    Copy { key: String, new_key: String },
    Remove { key: String },
    Update {
        key: String,
        property: String,
        value: String,
    },
    /// Binds every texture found in `directory`.
    Bind { directory: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureOp {
    pub file: String,
    pub manager: String,
    pub tpk: String,
    pub action: TextureAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StringAction {
    Add {
        key: String,
        label: String,
        text: String,
    },
    AddOrUpdate {
        key: String,
        label: String,
        text: String,
    },
    Update {
        key: String,
        label: String,
        text: String,
    },
    Remove {
        key: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringOp {
    pub file: String,
    pub manager: String,
    pub block: String,
    pub action: StringAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FileOp {
    CreateFile { path: String },
    CreateFolder { path: String },
    Delete { path: String },
    EraseFile { path: String },
    EraseFolder { path: String },
    Move { from: String, to: String },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    Synchronize,
    Overwrite,
    TypeOnly,
}

impl ImportMode {
    pub const EXPECTED: &'static str = "one of synchronize, overwrite, typeonly";

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "synchronize" => Some(ImportMode::Synchronize),
            "overwrite" => Some(ImportMode::Overwrite),
            "typeonly" => Some(ImportMode::TypeOnly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ArchiveOp {
    Import {
        mode: ImportMode,
        file: String,
        path: String,
    },
    ImportAll {
        mode: ImportMode,
        file: String,
        directory: String,
    },
    New {
        file: String,
    },
    PackStream {
        stream: String,
        directory: String,
    },
    UnpackStream {
        stream: String,
        directory: String,
    },
    UnlockMemory {
        file: String,
    },
    SpeedReflect {
        file: String,
    },
}

/// Script annotations. They shape how a host presents or gates a script
/// and have no effect of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "annotation", rename_all = "snake_case")]
pub enum Annotation {
    Checkbox { description: String },
    Combobox { description: String },
    Infobox { description: String },
    If { description: String, option: String },
    Static { description: String },
    End,
    StopErrors { enabled: bool },
    Version { version: String },
    Watermark { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Payload {
    Include { path: String },
    Collection(CollectionOp),
    Texture(TextureOp),
    Strings(StringOp),
    File(FileOp),
    Archive(ArchiveOp),
    Annotation(Annotation),
    Nothing,
}
