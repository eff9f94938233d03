//! Schema-driven loading of text-encoded records.
//!
//! Records are encoded as human-readable `field: value` pairs with nested
//! messages in braces. The encoding is schema-driven rather than
//! self-describing: the caller supplies a template record that knows its own
//! field names and types, and unknown fields are a hard error.

pub mod parser;

use std::{fs, path::Path};
use thiserror::Error;

pub use parser::{TextField, TextValue};

/// All types of errors the text record encoding can produce.
#[derive(Error, Debug)]
pub enum TextFormatError {
    #[error("Unexpected character '{found}' at line {line}")]
    UnexpectedCharacter { found: char, line: usize },

    #[error("Unterminated string literal at line {line}")]
    UnterminatedString { line: usize },

    #[error("Unterminated message at line {line}")]
    UnterminatedMessage { line: usize },

    #[error("Expected a value for field '{field}' at line {line}")]
    MissingValue { field: String, line: usize },

    #[error("Invalid number '{text}' at line {line}")]
    InvalidNumber { text: String, line: usize },

    #[error("Unknown field: {name}")]
    UnknownField { name: String },

    #[error("Field '{name}' expects a {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A record schema that can absorb parsed text-format fields.
///
/// Implementations own the schema: they decide which field names exist and
/// what value shapes they accept, and reject everything else.
pub trait MergeFromText {
    fn merge_field(&mut self, field: &TextField) -> Result<(), TextFormatError>;
}

/// Merge text-format `content` into `record`, field by field, in input order.
pub fn merge_from_str<M: MergeFromText>(
    content: &str,
    record: &mut M,
) -> Result<(), TextFormatError> {
    for field in parser::parse(content)? {
        record.merge_field(&field)?;
    }

    Ok(())
}

/// Read the full text content of `path` and merge it into the supplied
/// template, returning the populated record.
pub fn load_text_record<M: MergeFromText>(
    path: impl AsRef<Path>,
    mut record: M,
) -> Result<M, TextFormatError> {
    let content = fs::read_to_string(path)?;
    merge_from_str(&content, &mut record)?;
    Ok(record)
}
