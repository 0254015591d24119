/// How atoms with unrecognized identifiers are handled while reading.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnknownAtoms {
    /// Fail to read the file. Only files that can be fully modeled are accepted.
    Reject,
    /// Treat the atom as an opaque payload and copy it through verbatim when writing.
    PassThrough,
}

impl Default for UnknownAtoms {
    fn default() -> Self {
        Self::Reject
    }
}

/// Configure how a file is read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReadConfig {
    /// How to treat atoms that aren't recognized.
    pub unknown_atoms: UnknownAtoms,
}

impl ReadConfig {
    /// The default configuration, rejecting any unrecognized atom.
    pub const DEFAULT: Self = Self { unknown_atoms: UnknownAtoms::Reject };
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configure how a file is written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WriteConfig {
    /// The size of the blocks in which data is copied from the original file. A size of `0` is
    /// treated as `1`.
    pub copy_block_size: usize,
}

impl WriteConfig {
    /// The default configuration, copying in blocks of 100 KiB.
    pub const DEFAULT: Self = Self { copy_block_size: 100 * 1024 };
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
