use std::fs;
use std::path::Path;

use es_core::{EndscriptError, ErrorKind, ENDLAUNCHER_EXTENSION, VERSION1_MARKER};
use tracing::debug;

use crate::Launch;

/// Every descriptor except `.endlauncher` files carries a version marker.
pub fn is_versioned(path: &Path) -> bool {
    !path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(ENDLAUNCHER_EXTENSION))
}

/// Renders the on-disk text. Backslashes are written unescaped so paths
/// read naturally in the file.
pub fn to_envelope(launch: &Launch, versioned: bool) -> Result<String, EndscriptError> {
    let json = serde_json::to_string_pretty(launch)
        .map_err(|error| ErrorKind::LaunchFormat(error.to_string()))?;

    let mut text = String::new();
    if versioned {
        text.push_str(VERSION1_MARKER);
        text.push_str("\n\n");
    }
    text.push_str(&json.replace("\\\\", "\\"));
    text.push('\n');
    Ok(text)
}

pub fn from_envelope(text: &str, versioned: bool) -> Result<Launch, EndscriptError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let body = if versioned {
        text.strip_prefix(VERSION1_MARKER)
            .ok_or(ErrorKind::UnsupportedVersion(1))?
    } else {
        text
    };

    serde_json::from_str(&body.replace('\\', "\\\\"))
        .map_err(|error| ErrorKind::LaunchFormat(error.to_string()).into())
}

pub fn serialize(path: impl AsRef<Path>, launch: &Launch) -> Result<(), EndscriptError> {
    let path = path.as_ref();
    let text = to_envelope(launch, is_versioned(path))?;
    fs::write(path, text).map_err(|error| EndscriptError::io(path, error))?;
    debug!(path = %path.display(), "launch descriptor written");
    Ok(())
}

/// Reads a descriptor and records its directory as `this_dir`.
pub fn deserialize(path: impl AsRef<Path>) -> Result<Launch, EndscriptError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(EndscriptError::file_not_found(path));
    }
    let text = fs::read_to_string(path).map_err(|error| EndscriptError::io(path, error))?;
    let launch = from_envelope(&text, is_versioned(path))?;
    debug!(path = %path.display(), endscript = %launch.endscript, "launch descriptor read");

    let this_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(launch.with_this_dir(this_dir))
}
