//! The atom tree of an MPEG-4 file and the operations reading, growing and writing it.
//!
//! Atoms are stored in an arena and addressed by [`AtomId`]. Every atom knows its parent and its
//! ordered children, and caches its total length. Any change to the tree propagates the exact
//! length difference up the parent chain, so the cached lengths always match what is written.
use std::io::{Read, Seek, SeekFrom, Write};

use crate::{ErrorKind, ReadConfig, UnknownAtoms, WriteConfig};

pub use data::ImgFmt;
pub use ident::*;
pub use read::read_tree;
pub use state::State;

pub(crate) use head::*;
pub(crate) use kind::*;
pub(crate) use util::*;

#[macro_use]
mod util;

pub mod data;
/// A module for working with identifiers.
pub mod ident;

mod head;
mod kind;
mod meta;
mod read;
mod state;
mod stco;
mod write;

pub(crate) use write::write_file;

/// The index of an atom inside an [`AtomTree`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AtomId(usize);

/// The payload of an atom.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Payload {
    /// No payload.
    Empty,
    /// A payload that has been read into, or created in memory.
    Loaded(Vec<u8>),
    /// A payload of the given length that is still only present in the original file.
    Deferred(u64),
}

/// A node of the atom tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Atom {
    name: Fourcc,
    /// The length including the head, the payload and all children.
    len: u64,
    parent: Option<AtomId>,
    children: Vec<AtomId>,
    payload: Payload,
    state: State,
}

impl Atom {
    const fn new(name: Fourcc, state: State) -> Self {
        Self {
            name,
            len: HEAD_LEN,
            parent: None,
            children: Vec::new(),
            payload: Payload::Empty,
            state,
        }
    }

    /// Returns the identifier.
    pub const fn name(&self) -> Fourcc {
        self.name
    }

    /// Returns the length of the atom in bytes, including the head, the payload and all
    /// children.
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Returns the length of the payload in bytes, whether it is loaded or not.
    pub fn data_len(&self) -> u64 {
        match &self.payload {
            Payload::Empty => 0,
            Payload::Loaded(d) => d.len() as u64,
            Payload::Deferred(len) => *len,
        }
    }

    /// Returns the payload, or `None` if it hasn't been loaded from the file yet.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Empty => Some(&[][..]),
            Payload::Loaded(d) => Some(d.as_slice()),
            Payload::Deferred(_) => None,
        }
    }

    /// Returns whether the payload is still only present in the original file.
    pub fn is_deferred(&self) -> bool {
        matches!(self.payload, Payload::Deferred(_))
    }

    /// Returns the parent atom, if this atom has been attached to one.
    pub const fn parent(&self) -> Option<AtomId> {
        self.parent
    }

    /// Returns the ordered children.
    pub fn children(&self) -> &[AtomId] {
        &self.children
    }

    /// Returns where the atom originates from.
    pub const fn state(&self) -> State {
        self.state
    }
}

/// An arena owning every atom of a file, along with the top level atoms.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AtomTree {
    atoms: Vec<Atom>,
    roots: Vec<AtomId>,
}

impl AtomTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the atom. Panics if the id doesn't belong to this tree.
    pub fn get(&self, id: AtomId) -> &Atom {
        &self.atoms[id.0]
    }

    fn get_mut(&mut self, id: AtomId) -> &mut Atom {
        &mut self.atoms[id.0]
    }

    /// Returns the top level atoms.
    pub fn roots(&self) -> &[AtomId] {
        &self.roots
    }

    /// Returns the ordered children of the atom.
    pub fn children(&self, id: AtomId) -> &[AtomId] {
        &self.get(id).children
    }

    /// Looks up an atom by a dot separated path of identifiers, starting at the top level atoms,
    /// e.g. `moov.udta.meta.ilst`. Returns `None` if any component doesn't match.
    pub fn find(&self, path: &str) -> Option<AtomId> {
        let idents = path
            .split('.')
            .map(Fourcc::from_path_component)
            .collect::<Option<Vec<Fourcc>>>()?;
        self.find_path(&idents)
    }

    /// Looks up an atom by a path of identifiers, starting at the top level atoms. The first
    /// matching atom on each level is followed.
    pub fn find_path(&self, path: &[Fourcc]) -> Option<AtomId> {
        let (first, rest) = path.split_first()?;
        let mut id = self.find_in(&self.roots, *first)?;

        for ident in rest {
            id = self.find_in(&self.get(id).children, *ident)?;
        }

        Some(id)
    }

    fn find_in(&self, ids: &[AtomId], ident: Fourcc) -> Option<AtomId> {
        ids.iter().copied().find(|id| self.get(*id).name == ident)
    }

    /// Creates a detached atom consisting only of its head.
    pub(crate) fn create(&mut self, name: Fourcc, state: State) -> AtomId {
        let id = AtomId(self.atoms.len());
        self.atoms.push(Atom::new(name, state));
        id
    }

    /// Appends a detached atom to the top level atoms.
    pub(crate) fn push_root(&mut self, id: AtomId) {
        debug_assert!(self.get(id).parent.is_none());
        self.roots.push(id);
    }

    /// Drops every atom created after the arena had `len` atoms. Only used to release partially
    /// parsed atoms, which are never referenced by older atoms.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.atoms.truncate(len);
        self.roots.retain(|id| id.0 < len);
    }

    pub(crate) fn arena_len(&self) -> usize {
        self.atoms.len()
    }

    /// Adds `delta` to the length of the atom and all of its ancestors.
    pub(crate) fn bump_size(&mut self, id: AtomId, delta: u64) {
        let mut current = Some(id);
        while let Some(id) = current {
            let atom = self.get_mut(id);
            atom.len += delta;
            current = atom.parent;
        }
    }

    /// Appends the detached `child` to the children of `parent`. The child's complete length,
    /// including its own descendants, is propagated up from `parent`.
    pub(crate) fn add_child(&mut self, parent: AtomId, child: AtomId) {
        debug_assert!(self.get(child).parent.is_none());
        debug_assert!(!self.roots.contains(&child));

        let child_len = self.get(child).len;
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.push(child);
        self.bump_size(parent, child_len);
    }

    /// Appends bytes to the payload of the atom, loading it from the reader first if necessary.
    pub(crate) fn append_data(
        &mut self,
        id: AtomId,
        bytes: &[u8],
        reader: &mut (impl Read + Seek),
    ) -> crate::Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }

        self.ensure_loaded(id, reader)?;

        let atom = self.get_mut(id);
        match &mut atom.payload {
            Payload::Loaded(d) => {
                d.try_reserve(bytes.len())?;
                d.extend_from_slice(bytes);
            }
            Payload::Empty => {
                let mut d = Vec::new();
                d.try_reserve_exact(bytes.len())?;
                d.extend_from_slice(bytes);
                atom.payload = Payload::Loaded(d);
            }
            Payload::Deferred(_) => unreachable!("payload was loaded above"),
        }
        atom.len += bytes.len() as u64;

        if let Some(parent) = atom.parent {
            self.bump_size(parent, bytes.len() as u64);
        }

        Ok(())
    }

    /// Reads a deferred payload of the atom from the reader. Does nothing if the payload is
    /// already in memory. The reader's position is restored afterwards.
    pub fn ensure_loaded(&mut self, id: AtomId, reader: &mut (impl Read + Seek)) -> crate::Result<()> {
        let atom = self.get(id);
        let (len, pos) = match (&atom.payload, atom.state) {
            (Payload::Deferred(len), State::Existing(pos)) => (*len, pos),
            (Payload::Deferred(_), State::New) => {
                return Err(crate::Error::new(
                    ErrorKind::Parsing,
                    format!("Deferred payload of '{}' has no position in the file", atom.name),
                ));
            }
            _ => return Ok(()),
        };

        let start = reader.stream_position()?;
        let data = read_at(reader, pos + HEAD_LEN, len);
        reader.seek(SeekFrom::Start(start))?;

        self.get_mut(id).payload = Payload::Loaded(data?);
        Ok(())
    }

    /// Returns a mutable reference to a loaded payload, whose length must not be changed.
    pub(crate) fn loaded_data_mut(&mut self, id: AtomId) -> Option<&mut [u8]> {
        match &mut self.get_mut(id).payload {
            Payload::Loaded(d) => Some(d.as_mut_slice()),
            _ => None,
        }
    }
}

fn read_at(reader: &mut (impl Read + Seek), pos: u64, len: u64) -> crate::Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(pos))?;
    reader.read_u8_vec(len)
}
