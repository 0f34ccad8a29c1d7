use std::path::{Component, Path, PathBuf};

use es_core::{EndscriptError, ErrorKind};

/// Files currently being resolved, outermost first.
#[derive(Debug, Default)]
pub(crate) struct IncludeStack {
    active: Vec<ActiveFile>,
}

#[derive(Debug)]
struct ActiveFile {
    /// Identity of the file, with links resolved.
    key: PathBuf,
    /// Path as written, for the cycle chain.
    path: PathBuf,
}

impl IncludeStack {
    /// Pushes `path` unless a file with the same `key` is already active.
    pub(crate) fn enter(&mut self, key: &Path, path: &Path) -> Result<(), EndscriptError> {
        if self.active.iter().any(|active| active.key == key) {
            let mut chain = self
                .active
                .iter()
                .map(|active| active.path.display().to_string())
                .collect::<Vec<_>>();
            chain.push(path.display().to_string());
            return Err(ErrorKind::CircularInclude(chain.join(" -> ")).into());
        }
        self.active.push(ActiveFile {
            key: key.to_path_buf(),
            path: path.to_path_buf(),
        });
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.active.pop();
    }

    pub(crate) fn depth(&self) -> usize {
        self.active.len()
    }
}

/// Lexically folds `.` and `..` so the same file always gets the same key.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolves an `append` target against the directory of the file that
/// contains the directive. Backslashes are accepted as separators.
pub(crate) fn resolve_include_path(current_file: &Path, include: &str) -> PathBuf {
    let parent = current_file.parent().unwrap_or_else(|| Path::new(""));
    normalize_path(&parent.join(include.replace('\\', "/")))
}
