use std::borrow::Cow;
use std::collections::TryReserveError;
use std::{error, fmt, io};

use crate::atom::Fourcc;

/// Type alias for the result of tag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Kinds of errors that may occur while performing metadata operations.
#[derive(Debug)]
pub enum ErrorKind {
    /// An error kind indicating that growing a buffer failed.
    Alloc(TryReserveError),
    /// An error kind indicating that an atom could not be found. Contains the atom's identifier.
    AtomNotFound(Fourcc),
    /// An error kind indicating that an atom grew too large to be written with a 32 bit length.
    /// Contains the size.
    AtomTooLarge(u64),
    /// An error kind indicating that an atom's length is invalid. Contains the length.
    InvalidAtomSize(u64),
    /// An error kind indicating that an IO error has occurred. Contains the original io::Error.
    Io(io::Error),
    /// An error kind indicating that the reader does not start with a filetype (`ftyp`) atom.
    NoTag,
    /// An error kind indicating that a chunk offset no longer fits into 32 bits.
    OffsetOverflow,
    /// An error kind indicating that an error accured during parsing.
    Parsing,
    /// An error kind indicating that the declared sizes of an atom and its children disagree.
    SizeMismatch,
    /// An error kind indicating that an atom's identifier is not recognized. Contains the
    /// identifier.
    UnknownAtom(Fourcc),
    /// An error kind indicating that image data is neither jpeg, png nor bmp.
    UnknownImageFormat,
}

/// Any error that may occur while performing metadata operations.
pub struct Error {
    /// The kind of error.
    pub kind: ErrorKind,
    /// A human readable string describing the error.
    pub description: Cow<'static, str>,
}

impl Error {
    /// Creates a new `Error` using the error kind and description.
    pub fn new(kind: ErrorKind, description: impl Into<Cow<'static, str>>) -> Self {
        Self { kind, description: description.into() }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(err) => Some(err),
            ErrorKind::Alloc(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::new(ErrorKind::Io(err), "")
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Self::new(ErrorKind::Alloc(err), "Error allocating memory")
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Self::new(ErrorKind::Io(err.error), "Error replacing the original file")
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{:?}", self.kind)
        } else {
            write!(f, "{:?}: {}", self.kind, self.description)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{:?}", self.kind)
        } else {
            write!(f, "{:?}: {}", self.kind, self.description)
        }
    }
}
