/// What a physical script line turned out to be after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Skip,
    Statement(&'a str),
}

pub fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with('#')
}

pub fn is_brace(trimmed: &str) -> bool {
    trimmed.starts_with('{') || trimmed.starts_with('}')
}

/// Trims `raw` and decides whether it carries a statement. Blank lines,
/// comments and brace lines are skipped.
pub fn classify_line(raw: &str) -> LineClass<'_> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_comment(trimmed) || is_brace(trimmed) {
        LineClass::Skip
    } else {
        LineClass::Statement(trimmed)
    }
}
