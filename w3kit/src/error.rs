//! All error types for the w3kit crate.
//!
//! These are returned from all fallible operations (parsing, composition,
//! merging, encoder invocation).

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid menu markup: {0}")]
    MenuMarkup(String),

    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("expected 2 or 4 columns, got {0}")]
    ColumnCount(usize),

    #[error("failed to parse ID column `{0}` into a number")]
    IdParse(String),

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("unknown language metadata `{found}`; legal values are: {legal}")]
    UnknownMeta { found: String, legal: String },

    #[error("invalid id space `{0}`; expected an integer in 0..10000")]
    InvalidIdSpace(String),

    #[error("document contains no records")]
    EmptyDocument,

    #[error("duplicate string ID {0}")]
    DuplicateId(u32),

    #[error("multiple mod id spaces in one document: {0:?}")]
    MultipleIdSpaces(Vec<u32>),

    #[error("header declares id space {header} but records belong to id space {content}")]
    IdSpaceMismatch { header: u32, content: u32 },

    #[error("cannot allocate ids: no id space in the header and none derivable from records")]
    UnresolvedIdSpace,

    #[error("invalid target language `{0}`")]
    UnknownLanguage(String),

    #[error("encoder executable not found at `{0}`; place w3strings next to the binary or pass --encoder")]
    EncoderNotFound(PathBuf),

    #[error("encoder exited with status {0}")]
    EncoderFailed(i32),

    #[error("unsupported input `{0}`; expected a .csv file, a .w3strings file, or a directory")]
    UnsupportedInput(PathBuf),

    #[error("failed to process `{path}`: {source}")]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches a 1-based line number to a parse error.
    pub fn at_line(self, line: usize) -> Self {
        Error::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// Attaches a file path to an error as it unwinds out of a document.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Error::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_wrapping_keeps_cause() {
        let err = Error::ColumnCount(3).at_line(17);
        let display = err.to_string();
        assert!(display.contains("line 17"));
        let cause = std::error::Error::source(&err).unwrap();
        assert!(cause.to_string().contains("expected 2 or 4 columns"));
    }

    #[test]
    fn test_id_parse_display() {
        let err = Error::IdParse("20x0".into());
        assert_eq!(
            err.to_string(),
            "failed to parse ID column `20x0` into a number"
        );
    }

    #[test]
    fn test_multiple_spaces_names_values() {
        let err = Error::MultipleIdSpaces(vec![3, 7]);
        let display = err.to_string();
        assert!(display.contains('3'));
        assert!(display.contains('7'));
    }

    #[test]
    fn test_file_wrapping() {
        let err = Error::EmptyDocument.in_file("en.csv");
        assert!(err.to_string().contains("en.csv"));
    }
}
