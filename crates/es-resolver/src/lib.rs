use std::fs;
use std::path::{Path, PathBuf};

use es_commands::{construct, kind_for, AssetStore, Command};
use es_core::{CommandKind, EndscriptError, ErrorKind, ScriptLine};
use es_parser::{classify_line, detect_source, smart_split, DetectedSource, LineClass};
use tracing::{debug, trace, warn};

mod include_stack;

use include_stack::{normalize_path, resolve_include_path, IncludeStack};

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct ResolvedScript {
    /// Prepared commands in execution order, includes spliced in place.
    pub commands: Vec<Command>,
    /// Body of the last opaque-dialect file met during the pass.
    pub description: Option<String>,
}

pub struct EndscriptParser {
    filename: PathBuf,
    directory: PathBuf,
}

impl EndscriptParser {
    pub fn new(filename: impl AsRef<Path>) -> Self {
        let filename = normalize_path(filename.as_ref());
        let directory = filename.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            filename,
            directory,
        }
    }

    /// Directory of the root script; stamped file names are relative to it.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn read(&self) -> Result<ResolvedScript, EndscriptError> {
        let mut pass = ResolvePass {
            directory: &self.directory,
            stack: IncludeStack::default(),
            description: None,
        };
        let commands = pass.resolve_file(&self.filename)?;
        debug!(
            root = %self.filename.display(),
            commands = commands.len(),
            "endscript resolved"
        );
        Ok(ResolvedScript {
            commands,
            description: pass.description,
        })
    }
}

struct ResolvePass<'a> {
    directory: &'a Path,
    stack: IncludeStack,
    description: Option<String>,
}

impl ResolvePass<'_> {
    fn resolve_file(&mut self, path: &Path) -> Result<Vec<Command>, EndscriptError> {
        if !path.is_file() {
            return Err(EndscriptError::file_not_found(path));
        }

        let key = fs::canonicalize(path).map_err(|error| EndscriptError::io(path, error))?;
        self.stack.enter(&key, path)?;
        let result = self.resolve_entered(path);
        self.stack.leave();
        result
    }

    fn resolve_entered(&mut self, path: &Path) -> Result<Vec<Command>, EndscriptError> {
        let raw = fs::read_to_string(path).map_err(|error| EndscriptError::io(path, error))?;
        let content = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

        let first_line = match detect_source(path, content)? {
            DetectedSource::Opaque(body) => {
                debug!(file = %path.display(), "opaque description captured");
                self.description = Some(body.to_string());
                return Ok(Vec::new());
            }
            DetectedSource::Legacy { first_line } => first_line,
        };

        let file = self.relative_name(path);
        debug!(file = %file, depth = self.stack.depth(), "resolving endscript");

        let mut commands = Vec::new();
        for (offset, raw_line) in content.lines().enumerate().skip(first_line) {
            let LineClass::Statement(text) = classify_line(raw_line) else {
                continue;
            };

            let line = ScriptLine::new(file.as_str(), text, offset + 1);
            let tokens = smart_split(text);
            let keyword = tokens.first().map(String::as_str).unwrap_or_default();
            let kind = kind_for(keyword);

            if kind == CommandKind::Append {
                if tokens.len() != 2 {
                    return Err(EndscriptError::arg_count(tokens.len(), 2).at(&line));
                }
                let target = resolve_include_path(path, &tokens[1]);
                let spliced = self.resolve_file(&target).map_err(|error| error.at(&line))?;
                trace!(target = %target.display(), spliced = spliced.len(), "append expanded");
                commands.extend(spliced);
                continue;
            }

            if kind == CommandKind::Invalid {
                warn!(keyword, line = %line, "unrecognized keyword treated as optional");
            }

            let mut command = construct(kind);
            command.prepare(&tokens).map_err(|error| error.at(&line))?;
            trace!(kind = %command.kind(), line = %line, "command prepared");
            command.stamp(line);
            commands.push(command);
        }

        Ok(commands)
    }

    fn relative_name(&self, path: &Path) -> String {
        path.strip_prefix(self.directory)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

/// Parses and runs one line against `profile`, outside of any batch.
///
/// Blank and comment lines are accepted and report [`CommandKind::Empty`].
/// Unlike batch resolution, an unknown keyword is an error here.
pub fn execute_single_command(
    line: &str,
    profile: &mut dyn AssetStore,
) -> Result<CommandKind, EndscriptError> {
    let LineClass::Statement(text) = classify_line(line) else {
        return Ok(CommandKind::Empty);
    };

    let location = ScriptLine::detached(text);
    let tokens = smart_split(text);
    let keyword = tokens.first().map(String::as_str).unwrap_or_default();
    let kind = kind_for(keyword);

    if kind == CommandKind::Invalid {
        return Err(EndscriptError::with_location(
            ErrorKind::UnrecognizedCommand(keyword.to_string()),
            location,
        ));
    }

    let mut command = construct(kind);
    let Some(mut single) = command.as_single() else {
        return Err(EndscriptError::with_location(ErrorKind::NotSinglyExecutable(kind), location));
    };

    single.stamp(location.clone());
    single.prepare(&tokens).map_err(|error| error.at(&location))?;
    single.single_execution(profile)?;
    debug!(kind = %kind, "single command executed");
    Ok(kind)
}
