//! Error types for the encoder pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort an encoding run.
///
/// A coverage gap (an input character with no code) is not an error; it is
/// reported through [`crate::pipeline::Outcome::Incomplete`].
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened, created or inspected.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to an already open stream failed.
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// The output target already holds data and was left untouched.
    #[error("output file {} is not empty, specify an empty file or a new file name", .0.display())]
    OutputNotEmpty(PathBuf),

    /// The encoding file had no characters to build a tree from.
    #[error("encoding file contains no characters")]
    EmptyAlphabet,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
