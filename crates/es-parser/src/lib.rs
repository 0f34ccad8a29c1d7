mod dialect;
mod line;
mod tokenizer;
mod xml;

pub use dialect::{
    detect_source, dialect_for_extension, dialect_from_header, split_header, DetectedSource,
};
pub use line::{classify_line, is_brace, is_comment, LineClass};
pub use tokenizer::smart_split;
pub use xml::{parse_description, DescriptionElement, DescriptionNode};
