use tracing::trace;

use super::*;

impl AtomTree {
    /// Parses the atom at the reader's position, including all of its children, leaving the reader
    /// right after it. The atom may be at most `limit` bytes long.
    ///
    /// On failure the reader is moved back to where parsing began and every atom created for the
    /// partially parsed atom is released.
    pub(crate) fn parse_atom(
        &mut self,
        reader: &mut (impl Read + Seek),
        cfg: &ReadConfig,
        limit: u64,
    ) -> crate::Result<AtomId> {
        let start = reader.stream_position()?;
        let mark = self.arena_len();

        match self.parse_atom_at(reader, cfg, limit, start) {
            Ok(id) => Ok(id),
            Err(e) => {
                self.truncate(mark);
                reader.seek(SeekFrom::Start(start))?;
                Err(e)
            }
        }
    }

    fn parse_atom_at(
        &mut self,
        reader: &mut (impl Read + Seek),
        cfg: &ReadConfig,
        limit: u64,
        start: u64,
    ) -> crate::Result<AtomId> {
        let head = parse_head(reader)?;
        if head.len() > limit {
            return Err(crate::Error::new(
                ErrorKind::SizeMismatch,
                format!(
                    "Atom '{}' with a length of {} exceeds the {} remaining bytes",
                    head.fourcc(),
                    head.len(),
                    limit
                ),
            ));
        }

        let kind = match kind_of(head.fourcc()) {
            Some(k) => k,
            None if cfg.unknown_atoms == UnknownAtoms::PassThrough => Kind::Opaque,
            None => {
                return Err(crate::Error::new(
                    ErrorKind::UnknownAtom(head.fourcc()),
                    format!("Unknown atom '{}' at {}", head.fourcc(), start),
                ));
            }
        };

        let id = self.create(head.fourcc(), State::Existing(start));
        trace!(atom = %head.fourcc(), pos = start, len = head.len(), ?kind, "parsing atom");

        match kind {
            Kind::Container => (),
            Kind::Opaque => {
                let len = head.content_len();
                if len > 0 {
                    reader.skip(len as i64)?;
                    let atom = self.get_mut(id);
                    atom.payload = Payload::Deferred(len);
                    atom.len += len;
                }
            }
            Kind::Prefixed(prefix) => {
                if prefix > head.content_len() {
                    return Err(crate::Error::new(
                        ErrorKind::SizeMismatch,
                        format!(
                            "Atom '{}' with a length of {} is too short for its {} byte header",
                            head.fourcc(),
                            head.len(),
                            prefix
                        ),
                    ));
                }
                let data = reader.read_u8_vec(prefix)?;
                let atom = self.get_mut(id);
                atom.payload = Payload::Loaded(data);
                atom.len += prefix;
            }
        }

        let mut remaining = head.len() - self.get(id).len;
        while remaining > 0 {
            let child = match self.parse_atom(reader, cfg, remaining) {
                Ok(c) => c,
                Err(e) => {
                    return Err(crate::Error::new(
                        e.kind,
                        format!("Error reading {}: {}", head.fourcc(), e.description),
                    ));
                }
            };
            remaining -= self.get(child).len;
            self.add_child(id, child);
        }

        Ok(id)
    }
}

/// Reads the atom tree of an MPEG-4 file from the reader, which has to be positioned at the
/// filetype atom (`ftyp`), followed directly by the movie atom (`moov`).
///
/// The filetype atom is skipped. The returned tree has the movie atom as its only top level atom,
/// with the payloads of all data-only atoms left in the reader until they are needed.
pub fn read_tree(reader: &mut (impl Read + Seek), cfg: &ReadConfig) -> crate::Result<AtomTree> {
    let start = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(start))?;

    let ftyp = match parse_head(reader) {
        Ok(h) if h.fourcc() == FILETYPE => h,
        Ok(h) => {
            return Err(crate::Error::new(
                ErrorKind::NoTag,
                format!("Expected filetype atom (ftyp) found '{}'", h.fourcc()),
            ));
        }
        Err(e) => {
            return Err(crate::Error::new(
                ErrorKind::NoTag,
                format!("Error reading filetype atom (ftyp): {}", e.description),
            ));
        }
    };
    if start + ftyp.len() > end {
        return Err(crate::Error::new(
            ErrorKind::SizeMismatch,
            format!("Filetype atom (ftyp) with a length of {} exceeds the file", ftyp.len()),
        ));
    }
    reader.skip(ftyp.content_len() as i64)?;

    let moov_pos = start + ftyp.len();
    let moov_head = parse_head(reader)?;
    if moov_head.fourcc() != MOVIE {
        return Err(crate::Error::new(
            ErrorKind::AtomNotFound(MOVIE),
            format!("Expected movie atom (moov) found '{}'", moov_head.fourcc()),
        ));
    }
    reader.seek(SeekFrom::Start(moov_pos))?;

    let mut tree = AtomTree::new();
    let moov = tree.parse_atom(reader, cfg, end - moov_pos)?;
    tree.push_root(moov);

    Ok(tree)
}
