use std::path::Path;

use tracing::debug;

pub use es_commands::ops;
pub use es_commands::{
    construct, is_singly_executable, kind_for, AssetStore, Command, CommandState,
    ExecutionContext, SingleExecutable,
};
pub use es_core::{CommandKind, Dialect, EndscriptError, ErrorKind, ScriptLine};
pub use es_launch::{
    GameId, Launch, LinkLoader, LinkType, PathType, ResolvedLink, SubLoader, Usage,
};
pub use es_parser::{parse_description, smart_split, DescriptionElement, DescriptionNode};
pub use es_resolver::{execute_single_command, EndscriptParser, ResolvedScript};

pub mod launch {
    pub use es_launch::{deserialize, from_envelope, is_versioned, serialize, to_envelope};
}

pub fn resolve_endscript(path: impl AsRef<Path>) -> Result<ResolvedScript, EndscriptError> {
    EndscriptParser::new(path).read()
}

/// Executes `commands` in order against one shared context, stopping at the
/// first failure. Returns how many commands ran.
pub fn run_commands(
    commands: &mut [Command],
    context: &mut dyn ExecutionContext,
) -> Result<usize, EndscriptError> {
    for command in commands.iter_mut() {
        debug!(kind = %command.kind(), line = ?command.line(), "executing command");
        command.execute(context)?;
    }
    Ok(commands.len())
}

pub fn run_endscript(
    path: impl AsRef<Path>,
    context: &mut dyn ExecutionContext,
) -> Result<ResolvedScript, EndscriptError> {
    let mut resolved = resolve_endscript(path)?;
    run_commands(&mut resolved.commands, context)?;
    Ok(resolved)
}

/// Validates a loaded descriptor, then resolves and runs its endscript.
pub fn run_launch(
    launch: &Launch,
    context: &mut dyn ExecutionContext,
) -> Result<ResolvedScript, EndscriptError> {
    launch.check_endscript()?;
    run_endscript(launch.endscript_path(), context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{ArchiveOp, CollectionOp, FileOp, StringOp, TextureOp};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!("endscript-rs-{}-{}", name, nanos))
    }

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent should be created");
        }
        fs::write(path, content).expect("file should be written");
    }

    #[derive(Default)]
    struct Journal {
        entries: Vec<String>,
        reject_archive: bool,
    }

    impl AssetStore for Journal {
        fn apply_collection(&mut self, op: &CollectionOp) -> Result<(), EndscriptError> {
            self.entries.push(format!("collection {:?}", op.action));
            Ok(())
        }

        fn apply_texture(&mut self, op: &TextureOp) -> Result<(), EndscriptError> {
            self.entries.push(format!("texture {}", op.tpk));
            Ok(())
        }

        fn apply_string(&mut self, op: &StringOp) -> Result<(), EndscriptError> {
            self.entries.push(format!("string {}", op.block));
            Ok(())
        }
    }

    impl ExecutionContext for Journal {
        fn apply_file(&mut self, op: &FileOp) -> Result<(), EndscriptError> {
            self.entries.push(format!("file {:?}", op));
            Ok(())
        }

        fn apply_archive(&mut self, _op: &ArchiveOp) -> Result<(), EndscriptError> {
            if self.reject_archive {
                return Err(EndscriptError::execution("archive locked"));
            }
            self.entries.push("archive".to_string());
            Ok(())
        }
    }

    #[test]
    fn run_endscript_executes_in_spliced_order() {
        let root = temp_path("api-run");
        write_file(
            &root.join("main.end"),
            "[VERSN2]\ncreate_folder out\nappend part.endscript\ncheckbox \"Extras\"\nerase_file junk.bin\n",
        );
        write_file(
            &root.join("part.endscript"),
            "add_collection GlobalB.lzc CarTypeInfos M3\nremove_texture GlobalB.lzc TPKBlocks CARS KEY\n",
        );

        let mut journal = Journal::default();
        let resolved = run_endscript(root.join("main.end"), &mut journal).expect("run");
        assert_eq!(resolved.commands.len(), 5);
        assert!(resolved
            .commands
            .iter()
            .all(|command| command.state() == CommandState::Executed));
        assert_eq!(
            journal.entries,
            vec![
                "file CreateFolder { path: \"out\" }".to_string(),
                "collection Add { name: \"M3\" }".to_string(),
                "texture CARS".to_string(),
                "file EraseFile { path: \"junk.bin\" }".to_string(),
            ]
        );
    }

    #[test]
    fn run_commands_stops_at_first_failure() {
        let root = temp_path("api-fail");
        write_file(
            &root.join("main.endscript"),
            "create_file a.txt\nunpack_stream STREAML2RA.BUN out\ncreate_file b.txt\n",
        );

        let mut resolved = resolve_endscript(root.join("main.endscript")).expect("resolve");
        let mut journal = Journal {
            reject_archive: true,
            ..Journal::default()
        };
        let error = run_commands(&mut resolved.commands, &mut journal).expect_err("archive");
        assert_eq!(error.code(), "EXECUTION");
        assert_eq!(error.location.expect("located").index, 2);
        assert_eq!(journal.entries.len(), 1);
        assert_eq!(resolved.commands[2].state(), CommandState::Prepared);
    }

    #[test]
    fn run_launch_checks_endscript_first() {
        let root = temp_path("api-launch");
        let launch = Launch {
            endscript: r"scripts\install.endscript".to_string(),
            ..Launch::default()
        }
        .with_this_dir(&root);

        let mut journal = Journal::default();
        let error = run_launch(&launch, &mut journal).expect_err("missing endscript");
        assert_eq!(error.code(), "FILE_NOT_FOUND");

        write_file(&root.join("scripts/install.endscript"), "new GlobalB.lzc\n");
        let resolved = run_launch(&launch, &mut journal).expect("run");
        assert_eq!(resolved.commands[0].kind(), CommandKind::New);
        assert_eq!(journal.entries, vec!["archive"]);
    }
}
