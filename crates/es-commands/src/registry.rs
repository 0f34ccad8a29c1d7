use es_core::CommandKind;

use crate::command::Command;

/// Maps a keyword token to its kind. Lookup is exact and case-sensitive;
/// anything else is [`CommandKind::Invalid`].
pub fn kind_for(token: &str) -> CommandKind {
    CommandKind::KEYWORDS
        .into_iter()
        .find(|kind| kind.keyword() == token)
        .unwrap_or(CommandKind::Invalid)
}

/// Builds an unprepared command. Never fails: kinds without a directive
/// behind them become the no-op [`CommandKind::Optional`].
pub fn construct(kind: CommandKind) -> Command {
    match kind {
        CommandKind::Invalid | CommandKind::Empty | CommandKind::Optional => {
            Command::new(CommandKind::Optional)
        }
        kind => Command::new(kind),
    }
}

/// Whether a kind can run on its own against a profile.
pub fn is_singly_executable(kind: CommandKind) -> bool {
    match kind {
        CommandKind::AddCollection
        | CommandKind::CopyCollection
        | CommandKind::RemoveCollection
        | CommandKind::UpdateCollection
        | CommandKind::AddInCareer
        | CommandKind::CopyInCareer
        | CommandKind::RemoveInCareer
        | CommandKind::UpdateInCareer
        | CommandKind::AddTexture
        | CommandKind::AddOrReplaceTexture
        | CommandKind::ReplaceTexture
        | CommandKind::CopyTexture
        | CommandKind::RemoveTexture
        | CommandKind::UpdateTexture
        | CommandKind::BindTextures
        | CommandKind::AddString
        | CommandKind::AddOrUpdateString
        | CommandKind::UpdateString
        | CommandKind::RemoveString => true,

        CommandKind::Append
        | CommandKind::CreateFile
        | CommandKind::CreateFolder
        | CommandKind::Delete
        | CommandKind::EraseFile
        | CommandKind::EraseFolder
        | CommandKind::MoveFile
        | CommandKind::Import
        | CommandKind::ImportAll
        | CommandKind::New
        | CommandKind::PackStream
        | CommandKind::UnpackStream
        | CommandKind::UnlockMemory
        | CommandKind::SpeedReflect
        | CommandKind::Checkbox
        | CommandKind::Combobox
        | CommandKind::Infobox
        | CommandKind::If
        | CommandKind::Static
        | CommandKind::End
        | CommandKind::StopErrors
        | CommandKind::Version
        | CommandKind::Watermark
        | CommandKind::Invalid
        | CommandKind::Empty
        | CommandKind::Optional => false,
    }
}
