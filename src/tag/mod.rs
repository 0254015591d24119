use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::atom::{self, data, Atom, AtomId, AtomTree, Fourcc, ImgFmt};
use crate::{ErrorKind, ReadConfig, WriteConfig};

pub use metadata::Metadata;

mod metadata;

/// An open MPEG-4 audio file, to which metadata items are added before it is written back.
///
/// The file is read once when opening, leaving large payloads in the file. Every added item
/// grows the atom tree in memory. [`Tag::write`] replaces the file in a single atomic step.
#[derive(Debug)]
pub struct Tag {
    path: PathBuf,
    file: BufReader<File>,
    tree: AtomTree,
    moov: AtomId,
}

impl Tag {
    /// Attempts to open the MPEG-4 audio file at the path, which has to start with a filetype
    /// atom (`ftyp`) directly followed by the movie atom (`moov`). Unknown atoms are rejected.
    pub fn open(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::open_with(path, &ReadConfig::DEFAULT)
    }

    /// Attempts to open the MPEG-4 audio file at the path using the config.
    pub fn open_with(path: impl AsRef<Path>, cfg: &ReadConfig) -> crate::Result<Self> {
        let path = path.as_ref();
        let mut file = BufReader::new(File::open(path)?);
        let tree = atom::read_tree(&mut file, cfg)?;
        let moov = tree.find_path(&[atom::MOVIE]).ok_or_else(|| {
            crate::Error::new(ErrorKind::AtomNotFound(atom::MOVIE), "No movie atom (moov) found")
        })?;

        info!(path = %path.display(), moov_len = tree.get(moov).len(), "opened file");
        Ok(Self { path: path.to_path_buf(), file, tree, moov })
    }

    /// Returns the path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the atom tree, with the movie atom (`moov`) as its only top level atom.
    pub fn tree(&self) -> &AtomTree {
        &self.tree
    }

    /// Returns the atom at the dot separated path, e.g. `moov.udta.meta.ilst`.
    pub fn find_atom(&self, path: &str) -> Option<&Atom> {
        self.tree.find(path).map(|id| self.tree.get(id))
    }

    /// Returns the payload of the atom at the dot separated path, reading it from the file if it
    /// hasn't been yet.
    pub fn load_data(&mut self, path: &str) -> crate::Result<Option<&[u8]>> {
        let id = match self.tree.find(path) {
            Some(id) => id,
            None => return Ok(None),
        };
        self.tree.ensure_loaded(id, &mut self.file)?;
        Ok(self.tree.get(id).data())
    }

    /// Adds a metadata item with the type code and payload.
    fn add_meta_atom(&mut self, ident: Fourcc, code: u32, payload: &[u8]) -> crate::Result<()> {
        self.tree.add_meta_atom(ident, code, payload, &mut self.file)?;
        Ok(())
    }
}

// ## Text
m4atag_proc::text_field_adder!("album", "©alb");
m4atag_proc::text_field_adder!("artist", "©ART");
m4atag_proc::text_field_adder!("grouping", "©grp");
m4atag_proc::text_field_adder!("title", "©nam");

// ## Numbers
m4atag_proc::index_field_adder!("disc", "disk");
m4atag_proc::index_field_adder!("track", "trkn");

/// ### Year
impl Tag {
    /// Adds the year (©day) as its decimal string. A year of `0` is written as is.
    ///
    /// This must only be called once per tag, a second call adds a second year item.
    pub fn add_year(&mut self, year: u16) -> crate::Result<()> {
        let year = data::year_payload(year);
        self.add_meta_atom(atom::YEAR, data::UTF8, year.as_bytes())
    }
}

/// ### Artwork
impl Tag {
    /// Adds cover art (covr). The image format is detected from its first bytes, only jpeg, png
    /// and bmp images are accepted.
    ///
    /// This must only be called once per tag, a second call adds a second artwork item.
    pub fn add_cover_art(&mut self, image: &[u8]) -> crate::Result<()> {
        let fmt = ImgFmt::sniff(image).ok_or_else(|| {
            crate::Error::new(
                ErrorKind::UnknownImageFormat,
                "Cover art is neither a jpeg, png nor bmp image",
            )
        })?;
        self.add_meta_atom(atom::ARTWORK, fmt.code(), image)
    }
}

/// ### Writing
impl Tag {
    /// Attempts to write the file back to its path, consuming the tag.
    ///
    /// The file is rendered to a temporary file in the same directory, which then replaces the
    /// original file. On failure the original file is left untouched and the temporary file is
    /// removed.
    pub fn write(self) -> crate::Result<()> {
        self.write_with(&WriteConfig::DEFAULT)
    }

    /// Attempts to write the file back to its path using the config, consuming the tag.
    pub fn write_with(self, cfg: &WriteConfig) -> crate::Result<()> {
        self.write_via(cfg, BufWriter::new)
    }

    /// Writes through the writer created by `wrap` from the temporary file.
    pub(crate) fn write_via<W: Write>(
        self,
        cfg: &WriteConfig,
        wrap: impl FnOnce(File) -> W,
    ) -> crate::Result<()> {
        let Self { path, mut file, tree, moov } = self;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let permissions = file.get_ref().metadata()?.permissions();
        let tmp = tempfile::Builder::new().prefix(".m4atag").tempfile_in(dir)?;

        let written = tmp.reopen().map_err(crate::Error::from).and_then(|f| {
            let mut writer = wrap(f);
            atom::write_file(&tree, moov, &mut file, &mut writer, cfg)
        });
        let written = written.and_then(|_| {
            tmp.as_file().set_permissions(permissions)?;
            Ok(())
        });
        if let Err(e) = written {
            warn!(path = %path.display(), error = %e, "abandoned write, discarding temporary file");
            return Err(e);
        }

        drop(file);
        if let Err(e) = tmp.persist(&path) {
            warn!(path = %path.display(), error = %e.error, "failed to replace file");
            return Err(e.into());
        }

        info!(path = %path.display(), len = tree.get(moov).len(), "wrote file");
        Ok(())
    }

    /// Releases the tag without writing. Dropping the tag is equivalent.
    pub fn close(self) {}
}
