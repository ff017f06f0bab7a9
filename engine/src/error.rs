//! Crate wide error type.

use std::{io, path::Path, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Stream(#[from] io::Error),
    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
    #[error("malformed room record: {0}")]
    MalformedRecord(String),
    #[error("room `{room}` has {count} connections, at most {max} are allowed")]
    TooManyConnections { room: String, count: usize, max: usize },
    #[error("room `{0}` is connected to itself")]
    SelfConnection(String),
    #[error("room `{room}` lists the connection to `{other}` more than once")]
    DuplicateConnection { room: String, other: String },
    #[error("room `{room}` is connected to unknown room `{other}`")]
    UnknownConnection { room: String, other: String },
    #[error("unknown room type `{0}`")]
    UnknownRoomType(String),
    #[error("room name `{0}` is used more than once")]
    DuplicateRoom(String),
    #[error("expected exactly one {role} but found {count}")]
    RoleCount { role: &'static str, count: usize },
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
    #[error("{} is not valid unicode", .path.display())]
    NonUnicodePath { path: PathBuf },
    #[error("no directory starting with `{prefix}` found in {}", .dir.display())]
    NoRunDirectory { dir: PathBuf, prefix: String },
    #[error("could not spawn the time worker: {0}")]
    SpawnWorker(#[source] io::Error),
    #[error("the time worker panicked")]
    WorkerPanicked,
    #[error("the time file lock is poisoned")]
    LockPoisoned,
    #[error("could not format the current time: {0}")]
    TimeFormat(#[from] time::ParseError),
    #[error("time file {} is empty", .path.display())]
    EmptyTimeFile { path: PathBuf },
    #[error("input closed before the end room was reached")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attach a path to an `io::Error`, for use with `map_err`.
pub fn at<P: AsRef<Path>>(path: P) -> impl FnOnce(io::Error) -> Error {
    move |source| Error::Io {
        path: path.as_ref().to_path_buf(),
        source,
    }
}

impl Error {
    /// Wrap this error with the file it was encountered in.
    pub fn in_file<P: AsRef<Path>>(self, path: P) -> Error {
        Error::InFile {
            path: path.as_ref().to_path_buf(),
            source: Box::new(self),
        }
    }
}
