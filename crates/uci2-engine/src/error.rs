use crate::io::IoError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a document operation can fail.
///
/// A failed operation never leaves a half-applied edit behind: all checks
/// run before the tree is touched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("Parser error: {0}")]
    Parse(#[from] ParseError),
    #[error("Node not found: {0}")]
    NotFound(String),
    #[error("Node type mismatch: {0}")]
    TypeMismatch(String),
    #[error("Node attribute missing: {0}")]
    AttributeMissing(&'static str),
    #[error("Node name already exists: {0}")]
    Duplicate(String),
    /// Returned by [`NodeIter::next_node`](crate::NodeIter::next_node) once
    /// the sequence is exhausted.
    #[error("Iterator reached the end")]
    IteratorEnd,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Io(IoError::NotFound(_)) => ErrorKind::FileNotFound,
            Error::Io(_) => ErrorKind::FileIo,
            Error::Parse(_) => ErrorKind::Parser,
            Error::NotFound(_) => ErrorKind::NodeNotFound,
            Error::TypeMismatch(_) => ErrorKind::NodeTypeMismatch,
            Error::AttributeMissing(_) => ErrorKind::NodeAttributeMissing,
            Error::Duplicate(_) => ErrorKind::NodeDuplicate,
            Error::IteratorEnd => ErrorKind::IteratorEnd,
        }
    }
}

/// Flat classification of [`Error`], with the stable numeric codes and
/// descriptions used by the command line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    FileNotFound,
    FileIo,
    Parser,
    NodeNotFound,
    NodeTypeMismatch,
    NodeAttributeMissing,
    NodeDuplicate,
    IteratorEnd,
}

impl ErrorKind {
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::InvalidArgument => -1,
            ErrorKind::FileNotFound => -2,
            ErrorKind::FileIo => -3,
            ErrorKind::Parser => -4,
            ErrorKind::NodeNotFound => -5,
            ErrorKind::NodeTypeMismatch => -6,
            ErrorKind::NodeAttributeMissing => -7,
            ErrorKind::NodeDuplicate => -8,
            ErrorKind::IteratorEnd => -9,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "Invalid argument",
            ErrorKind::FileNotFound => "File not found",
            ErrorKind::FileIo => "File I/O error",
            ErrorKind::Parser => "Parser error",
            ErrorKind::NodeNotFound => "Node not found",
            ErrorKind::NodeTypeMismatch => "Node type mismatch",
            ErrorKind::NodeAttributeMissing => "Node attribute missing",
            ErrorKind::NodeDuplicate => "Node name already exists",
            ErrorKind::IteratorEnd => "Iterator reached the end",
        }
    }
}

/// Where and why text could not be turned into a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    #[rstest]
    #[case(Error::InvalidArgument("x".into()), -1)]
    #[case(Error::Io(IoError::NotFound(PathBuf::from("/etc/config/x"))), -2)]
    #[case(Error::Io(IoError::NotAFile(PathBuf::from("/etc/config"))), -3)]
    #[case(Error::NotFound("x".into()), -5)]
    #[case(Error::TypeMismatch("x".into()), -6)]
    #[case(Error::AttributeMissing("name"), -7)]
    #[case(Error::Duplicate("x".into()), -8)]
    #[case(Error::IteratorEnd, -9)]
    fn error_codes(#[case] error: Error, #[case] code: i32) {
        assert_eq!(error.kind().code(), code);
    }

    #[test]
    fn duplicate_message() {
        let error = Error::Duplicate("lan".into());
        assert_eq!(error.to_string(), "Node name already exists: lan");
        assert_eq!(error.kind().description(), "Node name already exists");
    }

    #[test]
    fn parse_error_message() {
        let error = Error::from(ParseError {
            line: 3,
            column: 2,
            message: "expected option value".into(),
        });
        assert_eq!(
            error.to_string(),
            "Parser error: line 3, column 2: expected option value"
        );
        assert_eq!(error.kind(), ErrorKind::Parser);
    }
}
