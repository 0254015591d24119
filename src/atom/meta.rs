//! Insertion of metadata items into the `moov.udta.meta.ilst` hierarchy.
use tracing::debug;

use super::*;

const MOVIE_PATH: [Fourcc; 1] = [MOVIE];
const USER_DATA_PATH: [Fourcc; 2] = [MOVIE, USER_DATA];
const METADATA_PATH: [Fourcc; 3] = [MOVIE, USER_DATA, METADATA];
const HANDLER_REFERENCE_PATH: [Fourcc; 4] = [MOVIE, USER_DATA, METADATA, HANDLER_REFERENCE];
const ITEM_LIST_PATH: [Fourcc; 4] = [MOVIE, USER_DATA, METADATA, ITEM_LIST];

impl AtomTree {
    /// Attaches the detached atom to the atom at `parent_path`, or to the top level atoms if the
    /// path is empty. If `update_offsets` is set, the chunk offsets are shifted by the atom's
    /// length.
    pub(crate) fn add_atom(
        &mut self,
        parent_path: &[Fourcc],
        atom: AtomId,
        update_offsets: bool,
        reader: &mut (impl Read + Seek),
    ) -> crate::Result<()> {
        match parent_path.last() {
            None => self.push_root(atom),
            Some(ident) => {
                let parent = self.find_path(parent_path).ok_or_else(|| {
                    crate::Error::new(
                        ErrorKind::AtomNotFound(*ident),
                        format!("No parent atom '{}' found to add '{}' to", ident, self.get(atom).name),
                    )
                })?;
                self.add_child(parent, atom);
            }
        }

        if update_offsets {
            let len = self.get(atom).len;
            self.update_chunk_offsets(len, reader)?;
        }

        Ok(())
    }

    /// Creates an atom with a payload and adds it to the atom at `parent_path`, shifting chunk
    /// offsets accordingly.
    fn add_new_atom(
        &mut self,
        parent_path: &[Fourcc],
        ident: Fourcc,
        payload: &[u8],
        reader: &mut (impl Read + Seek),
    ) -> crate::Result<()> {
        let atom = self.create(ident, State::New);
        self.append_data(atom, payload, reader)?;
        self.add_atom(parent_path, atom, true, reader)?;
        debug!("Created missing '{}' atom", ident);
        Ok(())
    }

    /// Creates whatever is missing of the `moov.udta.meta` hierarchy, the metadata handler
    /// reference (`hdlr`) and the item list (`ilst`), in this order.
    fn ensure_item_list(&mut self, reader: &mut (impl Read + Seek)) -> crate::Result<()> {
        if self.find_path(&ITEM_LIST_PATH).is_some() {
            return Ok(());
        }

        if self.find_path(&USER_DATA_PATH).is_none() {
            self.add_new_atom(&MOVIE_PATH, USER_DATA, &[], reader)?;
        }
        if self.find_path(&METADATA_PATH).is_none() {
            self.add_new_atom(&USER_DATA_PATH, METADATA, &data::META_PAYLOAD, reader)?;
        }
        if self.find_path(&HANDLER_REFERENCE_PATH).is_none() {
            self.add_new_atom(&METADATA_PATH, HANDLER_REFERENCE, &data::HDLR_PAYLOAD, reader)?;
        }
        self.add_new_atom(&METADATA_PATH, ITEM_LIST, &[], reader)
    }

    /// Adds a metadata item containing a single `data` atom with the type code and payload to
    /// the item list, creating the item list and its ancestors if necessary.
    ///
    /// On failure the tree may be left partially modified and has to be discarded.
    pub(crate) fn add_meta_atom(
        &mut self,
        ident: Fourcc,
        code: u32,
        payload: &[u8],
        reader: &mut (impl Read + Seek),
    ) -> crate::Result<AtomId> {
        self.ensure_item_list(reader)?;

        let content = data::data_content(code, payload)?;
        let item = self.create(ident, State::New);
        let data = self.create(DATA, State::New);
        self.append_data(data, &content, reader)?;
        self.add_child(item, data);
        self.add_atom(&ITEM_LIST_PATH, item, true, reader)?;

        debug!("Added '{}' item with type code {} and {} bytes", ident, code, payload.len());
        Ok(item)
    }
}
