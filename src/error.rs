//! Error types shared by every stage

use std::io;

use thiserror::Error;

/// Failure of a transform, a recoder or the stream around them.
/// None of these are transient; a block that failed once fails again.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing input or an unrecognised mode
    #[error("invalid argument: {0}")]
    Argument(String),

    /// An index, anchor or rank outside its domain
    #[error("{what} {index} out of range 0..{bound}")]
    Range {
        /// what kind of index was rejected
        what: &'static str,
        /// the offending value
        index: usize,
        /// exclusive upper bound of the domain
        bound: usize,
    },

    /// The stream does not follow the block format
    #[error("malformed input: {0}")]
    Format(String),

    /// Reading or writing the underlying stream failed
    #[error("IO error: {0}")]
    Resource(#[from] io::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn range(what: &'static str, index: usize, bound: usize) -> Error {
        Error::Range { what, index, bound }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Resource(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
