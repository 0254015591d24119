use tracing::trace;

use super::*;

impl AtomTree {
    /// Writes the atom's head, its payload and all of its children. Payloads that haven't been
    /// loaded are copied from the reader in blocks.
    pub(crate) fn render(
        &self,
        id: AtomId,
        reader: &mut (impl Read + Seek),
        writer: &mut impl Write,
        block_size: usize,
    ) -> crate::Result<()> {
        let atom = self.get(id);
        write_head(writer, Head::new(atom.len, atom.name))?;

        match (&atom.payload, atom.state) {
            (Payload::Empty, _) => (),
            (Payload::Loaded(d), _) => writer.write_all(d)?,
            (Payload::Deferred(len), State::Existing(pos)) => {
                reader.seek(SeekFrom::Start(pos + HEAD_LEN))?;
                copy_exact(reader, writer, *len, block_size)?;
            }
            (Payload::Deferred(_), State::New) => {
                return Err(crate::Error::new(
                    ErrorKind::Parsing,
                    format!("Deferred payload of '{}' has no position in the file", atom.name),
                ));
            }
        }

        for c in atom.children.iter() {
            self.render(*c, reader, writer, block_size)?;
        }

        Ok(())
    }
}

/// Writes the complete file: everything preceding the movie atom (`moov`) is copied from the
/// reader, the movie atom is rendered from the tree, and everything following the movie atom's
/// original extent is copied again.
pub(crate) fn write_file(
    tree: &AtomTree,
    moov: AtomId,
    reader: &mut (impl Read + Seek),
    writer: &mut impl Write,
    cfg: &WriteConfig,
) -> crate::Result<()> {
    let block_size = cfg.copy_block_size;
    let moov_pos = tree.get(moov).state.pos().ok_or_else(|| {
        crate::Error::new(
            ErrorKind::AtomNotFound(MOVIE),
            "Movie atom (moov) isn't present in the original file",
        )
    })?;

    reader.seek(SeekFrom::Start(0))?;
    copy_exact(reader, writer, moov_pos, block_size)?;

    tree.render(moov, reader, writer, block_size)?;

    // the original extent, not the grown one, has to be skipped
    reader.seek(SeekFrom::Start(moov_pos))?;
    let old_len = reader.read_be_u32()? as u64;
    reader.seek(SeekFrom::Start(moov_pos + old_len))?;
    let tail = copy_to_end(reader, writer, block_size)?;
    trace!(moov_pos, old_len, new_len = tree.get(moov).len, tail, "rendered file");

    writer.flush()?;
    Ok(())
}
