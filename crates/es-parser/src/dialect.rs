use std::path::Path;

use es_core::{
    Dialect, EndscriptError, ErrorKind, ENDSCRIPT_EXTENSION, ENDXML_EXTENSION, VERSION2_MARKER,
    VERSION3_MARKER,
};

/// Extension half of the decision table. `None` means the extension says
/// nothing and the header line has to be sniffed.
pub fn dialect_for_extension(path: &Path) -> Option<Dialect> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        ENDXML_EXTENSION => Some(Dialect::Opaque),
        ENDSCRIPT_EXTENSION => Some(Dialect::Legacy { first_line: 0 }),
        _ => None,
    }
}

/// Header half of the decision table.
pub fn dialect_from_header(first_line: &str) -> Result<Dialect, EndscriptError> {
    match first_line {
        VERSION3_MARKER => Ok(Dialect::Opaque),
        VERSION2_MARKER => Ok(Dialect::Legacy { first_line: 1 }),
        _ => Err(ErrorKind::UnsupportedVersion(2).into()),
    }
}

/// Splits off the first line. The remainder is returned byte for byte,
/// starting after the first line terminator.
pub fn split_header(content: &str) -> (&str, &str) {
    match content.find('\n') {
        Some(at) => (content[..at].trim_end_matches('\r'), &content[at + 1..]),
        None => (content, ""),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedSource<'a> {
    Opaque(&'a str),
    Legacy { first_line: usize },
}

/// Runs the whole table against a file's path and content.
pub fn detect_source<'a>(
    path: &Path,
    content: &'a str,
) -> Result<DetectedSource<'a>, EndscriptError> {
    match dialect_for_extension(path) {
        Some(Dialect::Opaque) => Ok(DetectedSource::Opaque(content)),
        Some(Dialect::Legacy { first_line }) => Ok(DetectedSource::Legacy { first_line }),
        None => {
            let (first, rest) = split_header(content);
            match dialect_from_header(first)? {
                Dialect::Opaque => Ok(DetectedSource::Opaque(rest)),
                Dialect::Legacy { first_line } => Ok(DetectedSource::Legacy { first_line }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_table_is_case_insensitive() {
        assert_eq!(
            dialect_for_extension(Path::new("mods/Install.ENDXML")),
            Some(Dialect::Opaque)
        );
        assert_eq!(
            dialect_for_extension(Path::new("install.endscript")),
            Some(Dialect::Legacy { first_line: 0 })
        );
        assert_eq!(dialect_for_extension(Path::new("install.end")), None);
        assert_eq!(dialect_for_extension(Path::new("install")), None);
    }

    #[test]
    fn header_markers_pick_dialect_or_fail() {
        assert_eq!(
            dialect_from_header("[VERSN2]").expect("v2"),
            Dialect::Legacy { first_line: 1 }
        );
        assert_eq!(dialect_from_header("[VERSN3]").expect("v3"), Dialect::Opaque);

        let error = dialect_from_header("[VERSN4]").expect_err("unknown marker");
        assert_eq!(error.kind, ErrorKind::UnsupportedVersion(2));
        let error = dialect_from_header("version 4").expect_err("missing marker");
        assert_eq!(error.code(), "UNSUPPORTED_VERSION");
    }

    #[test]
    fn split_header_keeps_remainder_verbatim() {
        assert_eq!(split_header("[VERSN3]\r\n<a>\r\n</a>"), ("[VERSN3]", "<a>\r\n</a>"));
        assert_eq!(split_header("[VERSN2]"), ("[VERSN2]", ""));
    }

    #[test]
    fn detect_source_combines_extension_and_header() {
        let xml = "<menu>\n  <text/>\n</menu>\n";
        assert_eq!(
            detect_source(Path::new("a.endxml"), xml).expect("opaque"),
            DetectedSource::Opaque(xml)
        );
        assert_eq!(
            detect_source(Path::new("a.end"), "[VERSN3]\n<menu/>").expect("sniffed"),
            DetectedSource::Opaque("<menu/>")
        );
        assert_eq!(
            detect_source(Path::new("a.end"), "[VERSN2]\nversion 1").expect("v2"),
            DetectedSource::Legacy { first_line: 1 }
        );
        assert_eq!(
            detect_source(Path::new("a.endscript"), "[VERSN3]\n").expect("raw"),
            DetectedSource::Legacy { first_line: 0 }
        );
    }
}
