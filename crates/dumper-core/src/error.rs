#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DumpError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DumpError {
    #[error("link name is empty")]
    EmptyName,

    #[error("link url is empty for {name:?}")]
    EmptyUrl { name: String },

    #[error("link name {name:?} is {len} bytes, rows hold at most {max}")]
    NameTooLong { name: String, len: usize, max: usize },

    #[error("link name {name:?} contains non-ASCII characters")]
    NonAsciiName { name: String },

    #[error("link name {name:?} needs exactly one non-empty line after its line break")]
    MalformedRemainder { name: String },

    #[error("malformed link {input:?}: expected NAME=URL")]
    MalformedLink { input: String },

    #[error("column {column} cannot hold a {len}-byte name in a {width}-column row")]
    SpanOverflow {
        column: usize,
        len: usize,
        width: usize,
    },

    #[error("column {position} is outside the row (0..{width})")]
    ColumnOutOfRange { position: usize, width: usize },

    #[error("column {position} rendered out of order, expected {expected}")]
    ColumnOutOfOrder { position: usize, expected: usize },
}
