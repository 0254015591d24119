/// Where an atom originates from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// The atom was read from the file. Contains the position of its head.
    Existing(u64),
    /// The atom was created in memory.
    New,
}

impl Default for State {
    fn default() -> Self {
        Self::New
    }
}

impl State {
    /// Returns the position of the atom's head in the original file, if it was read from it.
    pub const fn pos(&self) -> Option<u64> {
        match self {
            Self::Existing(pos) => Some(*pos),
            Self::New => None,
        }
    }
}
