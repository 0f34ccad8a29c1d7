use es_core::{CommandKind, EndscriptError, ErrorKind, ScriptLine};
use serde::Serialize;

use crate::host::{AssetStore, ExecutionContext};
use crate::ops::{
    Annotation, ArchiveOp, CollectionAction, CollectionOp, CollectionScope, FileOp, ImportMode,
    Payload, StringAction, StringOp, SubPart, TextureAction, TextureOp,
};
use crate::registry::is_singly_executable;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandState {
    Unprepared,
    Prepared,
    Executed,
}

/// One script directive. Built unprepared by the registry, filled by
/// [`Command::prepare`], consumed by [`Command::execute`] or its single
/// execution capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    kind: CommandKind,
    state: CommandState,
    line: Option<ScriptLine>,
    payload: Option<Payload>,
}

impl Command {
    pub(crate) fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            state: CommandState::Unprepared,
            line: None,
            payload: None,
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    pub fn line(&self) -> Option<&ScriptLine> {
        self.line.as_ref()
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Records where the command came from.
    pub fn stamp(&mut self, line: ScriptLine) {
        self.line = Some(line);
    }

    /// Validates `tokens` (keyword included) and stores the parsed fields.
    ///
    /// # Panics
    ///
    /// When the command was already prepared.
    pub fn prepare(&mut self, tokens: &[String]) -> Result<(), EndscriptError> {
        assert_eq!(
            self.state,
            CommandState::Unprepared,
            "command {} prepared twice",
            self.kind
        );
        self.payload = Some(build_payload(self.kind, tokens)?);
        self.state = CommandState::Prepared;
        Ok(())
    }

    /// Performs the command's effect against the run's context. Annotations
    /// and the no-op fallback succeed without touching it.
    ///
    /// # Panics
    ///
    /// When the command is not in the prepared state.
    pub fn execute(&mut self, context: &mut dyn ExecutionContext) -> Result<(), EndscriptError> {
        let result = match self.take_prepared("execute") {
            Payload::Collection(op) => context.apply_collection(op),
            Payload::Texture(op) => context.apply_texture(op),
            Payload::Strings(op) => context.apply_string(op),
            Payload::File(op) => context.apply_file(op),
            Payload::Archive(op) => context.apply_archive(op),
            Payload::Include { .. } | Payload::Annotation(_) | Payload::Nothing => Ok(()),
        };
        self.finish(result)
    }

    /// The single-command capability, available only for kinds that make
    /// sense outside a batch run.
    pub fn as_single(&mut self) -> Option<SingleExecutable<'_>> {
        if is_singly_executable(self.kind) {
            Some(SingleExecutable { command: self })
        } else {
            None
        }
    }

    fn take_prepared(&self, operation: &str) -> &Payload {
        assert_eq!(
            self.state,
            CommandState::Prepared,
            "cannot {} command {} in state {:?}",
            operation,
            self.kind,
            self.state
        );
        self.payload
            .as_ref()
            .unwrap_or_else(|| unreachable!("prepared command {} has a payload", self.kind))
    }

    fn finish(&mut self, result: Result<(), EndscriptError>) -> Result<(), EndscriptError> {
        self.state = CommandState::Executed;
        match (&self.line, result) {
            (Some(line), Err(error)) => Err(error.at(line)),
            (_, result) => result,
        }
    }
}

/// Handle returned by [`Command::as_single`].
pub struct SingleExecutable<'a> {
    command: &'a mut Command,
}

impl SingleExecutable<'_> {
    pub fn kind(&self) -> CommandKind {
        self.command.kind
    }

    pub fn prepare(&mut self, tokens: &[String]) -> Result<(), EndscriptError> {
        self.command.prepare(tokens)
    }

    pub fn stamp(&mut self, line: ScriptLine) {
        self.command.stamp(line);
    }

    pub fn single_execution(self, profile: &mut dyn AssetStore) -> Result<(), EndscriptError> {
        let command = self.command;
        let result = match command.take_prepared("single-execute") {
            Payload::Collection(op) => profile.apply_collection(op),
            Payload::Texture(op) => profile.apply_texture(op),
            Payload::Strings(op) => profile.apply_string(op),
            _ => Err(ErrorKind::NotSinglyExecutable(command.kind).into()),
        };
        command.finish(result)
    }
}

fn exact(tokens: &[String], expected: usize) -> Result<(), EndscriptError> {
    if tokens.len() == expected {
        Ok(())
    } else {
        Err(EndscriptError::arg_count(tokens.len(), expected))
    }
}

/// Accepts either form of a two-form command; `true` means the long one.
/// Mismatches report the short form.
fn either(tokens: &[String], short: usize, long: usize) -> Result<bool, EndscriptError> {
    match tokens.len() {
        n if n == short => Ok(false),
        n if n == long => Ok(true),
        n => Err(EndscriptError::arg_count(n, short)),
    }
}

fn import_mode(token: &str) -> Result<ImportMode, EndscriptError> {
    ImportMode::from_token(token)
        .ok_or_else(|| EndscriptError::invalid_argument(token, ImportMode::EXPECTED))
}

fn flag(token: &str) -> Result<bool, EndscriptError> {
    if token.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(EndscriptError::invalid_argument(token, "true or false"))
    }
}

fn build_payload(kind: CommandKind, t: &[String]) -> Result<Payload, EndscriptError> {
    let s = |index: usize| t[index].clone();
    let manager = || CollectionScope::Manager {
        file: s(1),
        manager: s(2),
    };
    let career = || CollectionScope::Career {
        file: s(1),
        root: s(2),
        class: s(3),
    };
    let collection = |scope, action| Payload::Collection(CollectionOp { scope, action });
    let texture = |action| {
        Payload::Texture(TextureOp {
            file: s(1),
            manager: s(2),
            tpk: s(3),
            action,
        })
    };
    let strings = |action| {
        Payload::Strings(StringOp {
            file: s(1),
            manager: s(2),
            block: s(3),
            action,
        })
    };

    let payload = match kind {
        CommandKind::Append => {
            exact(t, 2)?;
            Payload::Include { path: s(1) }
        }

        CommandKind::AddCollection => {
            exact(t, 4)?;
            collection(manager(), CollectionAction::Add { name: s(3) })
        }
        CommandKind::CopyCollection => {
            exact(t, 5)?;
            collection(
                manager(),
                CollectionAction::Copy {
                    from: s(3),
                    name: s(4),
                },
            )
        }
        CommandKind::RemoveCollection => {
            exact(t, 4)?;
            collection(manager(), CollectionAction::Remove { name: s(3) })
        }
        CommandKind::UpdateCollection => {
            let action = if either(t, 6, 8)? {
                CollectionAction::Update {
                    name: s(3),
                    sub_part: Some(SubPart {
                        expand: s(4),
                        node: s(5),
                    }),
                    property: s(6),
                    value: s(7),
                }
            } else {
                CollectionAction::Update {
                    name: s(3),
                    sub_part: None,
                    property: s(4),
                    value: s(5),
                }
            };
            collection(manager(), action)
        }

        CommandKind::AddInCareer => {
            exact(t, 5)?;
            collection(career(), CollectionAction::Add { name: s(4) })
        }
        CommandKind::CopyInCareer => {
            exact(t, 6)?;
            collection(
                career(),
                CollectionAction::Copy {
                    from: s(4),
                    name: s(5),
                },
            )
        }
        CommandKind::RemoveInCareer => {
            exact(t, 5)?;
            collection(career(), CollectionAction::Remove { name: s(4) })
        }
        CommandKind::UpdateInCareer => {
            let action = if either(t, 7, 9)? {
                CollectionAction::Update {
                    name: s(4),
                    sub_part: Some(SubPart {
                        expand: s(5),
                        node: s(6),
                    }),
                    property: s(7),
                    value: s(8),
                }
            } else {
                CollectionAction::Update {
                    name: s(4),
                    sub_part: None,
                    property: s(5),
                    value: s(6),
                }
            };
            collection(career(), action)
        }

        CommandKind::AddTexture => {
            exact(t, 6)?;
            texture(TextureAction::Add {
                key: s(4),
                dds: s(5),
            })
        }
        CommandKind::AddOrReplaceTexture => {
            exact(t, 6)?;
            texture(TextureAction::AddOrReplace {
                key: s(4),
                dds: s(5),
            })
        }
        CommandKind::ReplaceTexture => {
            exact(t, 6)?;
            texture(TextureAction::Replace {
                key: s(4),
                dds: s(5),
            })
        }
        CommandKind::CopyTexture => {
            exact(t, 6)?;
            texture(TextureAction::Copy {
                key: s(4),
                new_key: s(5),
            })
        }
        CommandKind::RemoveTexture => {
            exact(t, 5)?;
            texture(TextureAction::Remove { key: s(4) })
        }
        CommandKind::UpdateTexture => {
            exact(t, 7)?;
            texture(TextureAction::Update {
                key: s(4),
                property: s(5),
                value: s(6),
            })
        }
        CommandKind::BindTextures => {
            exact(t, 5)?;
            texture(TextureAction::Bind { directory: s(4) })
        }

        CommandKind::AddString => {
            exact(t, 7)?;
            strings(StringAction::Add {
                key: s(4),
                label: s(5),
                text: s(6),
            })
        }
        CommandKind::AddOrUpdateString => {
            exact(t, 7)?;
            strings(StringAction::AddOrUpdate {
                key: s(4),
                label: s(5),
                text: s(6),
            })
        }
        CommandKind::UpdateString => {
            exact(t, 7)?;
            strings(StringAction::Update {
                key: s(4),
                label: s(5),
                text: s(6),
            })
        }
        CommandKind::RemoveString => {
            exact(t, 5)?;
            strings(StringAction::Remove { key: s(4) })
        }

        CommandKind::CreateFile => {
            exact(t, 2)?;
            Payload::File(FileOp::CreateFile { path: s(1) })
        }
        CommandKind::CreateFolder => {
            exact(t, 2)?;
            Payload::File(FileOp::CreateFolder { path: s(1) })
        }
        CommandKind::Delete => {
            exact(t, 2)?;
            Payload::File(FileOp::Delete { path: s(1) })
        }
        CommandKind::EraseFile => {
            exact(t, 2)?;
            Payload::File(FileOp::EraseFile { path: s(1) })
        }
        CommandKind::EraseFolder => {
            exact(t, 2)?;
            Payload::File(FileOp::EraseFolder { path: s(1) })
        }
        CommandKind::MoveFile => {
            exact(t, 3)?;
            Payload::File(FileOp::Move {
                from: s(1),
                to: s(2),
            })
        }

        CommandKind::Import => {
            exact(t, 4)?;
            Payload::Archive(ArchiveOp::Import {
                mode: import_mode(&t[1])?,
                file: s(2),
                path: s(3),
            })
        }
        CommandKind::ImportAll => {
            exact(t, 4)?;
            Payload::Archive(ArchiveOp::ImportAll {
                mode: import_mode(&t[1])?,
                file: s(2),
                directory: s(3),
            })
        }
        CommandKind::New => {
            exact(t, 2)?;
            Payload::Archive(ArchiveOp::New { file: s(1) })
        }
        CommandKind::PackStream => {
            exact(t, 3)?;
            Payload::Archive(ArchiveOp::PackStream {
                stream: s(1),
                directory: s(2),
            })
        }
        CommandKind::UnpackStream => {
            exact(t, 3)?;
            Payload::Archive(ArchiveOp::UnpackStream {
                stream: s(1),
                directory: s(2),
            })
        }
        CommandKind::UnlockMemory => {
            exact(t, 2)?;
            Payload::Archive(ArchiveOp::UnlockMemory { file: s(1) })
        }
        CommandKind::SpeedReflect => {
            exact(t, 2)?;
            Payload::Archive(ArchiveOp::SpeedReflect { file: s(1) })
        }

        CommandKind::Checkbox => {
            exact(t, 2)?;
            Payload::Annotation(Annotation::Checkbox { description: s(1) })
        }
        CommandKind::Combobox => {
            exact(t, 2)?;
            Payload::Annotation(Annotation::Combobox { description: s(1) })
        }
        CommandKind::Infobox => {
            exact(t, 2)?;
            Payload::Annotation(Annotation::Infobox { description: s(1) })
        }
        CommandKind::If => {
            exact(t, 3)?;
            Payload::Annotation(Annotation::If {
                description: s(1),
                option: s(2),
            })
        }
        CommandKind::Static => {
            exact(t, 2)?;
            Payload::Annotation(Annotation::Static { description: s(1) })
        }
        CommandKind::End => {
            exact(t, 1)?;
            Payload::Annotation(Annotation::End)
        }
        CommandKind::StopErrors => {
            exact(t, 2)?;
            Payload::Annotation(Annotation::StopErrors {
                enabled: flag(&t[1])?,
            })
        }
        CommandKind::Version => {
            exact(t, 2)?;
            Payload::Annotation(Annotation::Version { version: s(1) })
        }
        CommandKind::Watermark => {
            exact(t, 2)?;
            Payload::Annotation(Annotation::Watermark { text: s(1) })
        }

        CommandKind::Invalid | CommandKind::Empty | CommandKind::Optional => Payload::Nothing,
    };

    Ok(payload)
}
