use tracing::debug;

use super::*;

/// The path of the chunk offset table that is patched. Only the first track's table is found.
pub const CHUNK_OFFSET_PATH: [Fourcc; 6] = [
    MOVIE,
    TRACK,
    MEDIA,
    MEDIA_INFORMATION,
    SAMPLE_TABLE,
    SAMPLE_TABLE_CHUNK_OFFSET,
];

/// The version and flags preceding the entry count.
const HEADER_SIZE: usize = 4;
/// The position of the first entry.
const TABLE_POS: usize = 8;
const ENTRY_SIZE: usize = 4;

impl AtomTree {
    /// Adds `delta` to every entry of the chunk offset table (`stco`). Does nothing if the
    /// table doesn't exist.
    pub(crate) fn update_chunk_offsets(
        &mut self,
        delta: u64,
        reader: &mut (impl Read + Seek),
    ) -> crate::Result<()> {
        let stco = match self.find_path(&CHUNK_OFFSET_PATH) {
            Some(id) => id,
            None => {
                debug!("No chunk offset table (stco) found, skipping offset update");
                return Ok(());
            }
        };

        self.ensure_loaded(stco, reader)?;
        let data = match self.loaded_data_mut(stco) {
            Some(d) => d,
            None => return Ok(()),
        };

        shift_offsets(data, delta)?;
        debug!("Shifted chunk offsets by {}", delta);
        Ok(())
    }
}

/// Adds `delta` to every entry of a chunk offset table payload in place. Nothing is changed if
/// the table is malformed or an entry would overflow.
pub fn shift_offsets(data: &mut [u8], delta: u64) -> crate::Result<()> {
    let count = be_int!(data, HEADER_SIZE, u32).ok_or_else(|| {
        crate::Error::new(
            ErrorKind::Parsing,
            "Chunk offset table (stco) is missing its entry count",
        )
    })?;

    let table_len = count as u64 * ENTRY_SIZE as u64;
    if TABLE_POS as u64 + table_len > data.len() as u64 {
        return Err(crate::Error::new(
            ErrorKind::SizeMismatch,
            format!(
                "Chunk offset table (stco) with {} entries doesn't fit into {} bytes",
                count,
                data.len()
            ),
        ));
    }

    let table = &mut data[TABLE_POS..TABLE_POS + table_len as usize];
    let mut shifted = Vec::new();
    shifted.try_reserve_exact(count as usize)?;
    for entry in table.chunks_exact(ENTRY_SIZE) {
        let offset = be_int!(entry, 0, u32).unwrap_or_default();
        let new_offset = (offset as u64)
            .checked_add(delta)
            .filter(|o| *o <= u32::MAX as u64)
            .ok_or_else(|| {
                crate::Error::new(
                    ErrorKind::OffsetOverflow,
                    format!("Chunk offset {} shifted by {} doesn't fit into 32 bits", offset, delta),
                )
            })?;
        shifted.push(new_offset as u32);
    }

    for (entry, offset) in table.chunks_exact_mut(ENTRY_SIZE).zip(shifted) {
        entry.copy_from_slice(&offset.to_be_bytes());
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn table(offsets: &[u32]) -> Vec<u8> {
        let mut data = vec![0u8; 4];
        data.extend_from_slice(&(offsets.len() as u32).to_be_bytes());
        for o in offsets {
            data.extend_from_slice(&o.to_be_bytes());
        }
        data
    }

    #[test]
    fn shift() {
        let mut data = table(&[48, 1000, 70000]);
        shift_offsets(&mut data, 123).unwrap();
        assert_eq!(data, table(&[171, 1123, 70123]));
        assert_eq!(be_int!(data, 4, u32), Some(3));
    }

    #[test]
    fn shift_empty() {
        let mut data = table(&[]);
        shift_offsets(&mut data, 8).unwrap();
        assert_eq!(data, table(&[]));
    }

    #[test]
    fn count_exceeds_payload() {
        let mut data = table(&[1, 2]);
        data[4..8].copy_from_slice(&3u32.to_be_bytes());
        let before = data.clone();

        let err = shift_offsets(&mut data, 8).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::SizeMismatch));
        assert_eq!(data, before);
    }

    #[test]
    fn overflow_leaves_table_unchanged() {
        let mut data = table(&[10, u32::MAX - 4]);
        let before = data.clone();

        let err = shift_offsets(&mut data, 5).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::OffsetOverflow));
        assert_eq!(data, before);
    }

    #[test]
    fn missing_table_is_skipped() {
        let mut reader = std::io::Cursor::new(Vec::<u8>::new());
        let mut tree = AtomTree::new();
        let moov = tree.create(MOVIE, State::New);
        tree.push_root(moov);

        tree.update_chunk_offsets(100, &mut reader).unwrap();
        assert_eq!(tree.get(moov).len(), 8);
    }

    #[test]
    fn patch_in_tree() {
        let mut reader = std::io::Cursor::new(Vec::<u8>::new());
        let mut tree = AtomTree::new();

        let mut parent = tree.create(MOVIE, State::New);
        tree.push_root(parent);
        for ident in CHUNK_OFFSET_PATH[1..].iter() {
            let child = tree.create(*ident, State::New);
            tree.add_child(parent, child);
            parent = child;
        }
        tree.append_data(parent, &table(&[100, 200]), &mut reader).unwrap();

        tree.update_chunk_offsets(40, &mut reader).unwrap();
        assert_eq!(tree.get(parent).data(), Some(&table(&[140, 240])[..]));
        assert_eq!(tree.get(parent).len(), 8 + 16);
    }
}
