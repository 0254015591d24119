use std::path::Path;

use super::Tag;

/// The metadata of a song, as added to a file in one go.
///
/// Numbers of `0` and a missing grouping or cover are treated as absent and not written.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Metadata {
    /// The artist (`©ART`).
    pub artist: String,
    /// The album (`©alb`).
    pub album: String,
    /// The title (`©nam`).
    pub title: String,
    /// The grouping (`©grp`).
    pub grouping: Option<String>,
    /// The release year (`©day`).
    pub year: u16,
    /// The track number (`trkn`).
    pub track: u16,
    /// The disc number (`disk`).
    pub disc: u16,
    /// The jpeg, png or bmp cover art image (`covr`).
    pub cover: Option<Vec<u8>>,
}

impl Metadata {
    /// Adds every present field to the tag.
    ///
    /// On failure the tag may contain some of the fields and should be discarded.
    pub fn apply(&self, tag: &mut Tag) -> crate::Result<()> {
        tag.add_artist(&self.artist)?;
        tag.add_album(&self.album)?;
        tag.add_title(&self.title)?;
        if let Some(grouping) = &self.grouping {
            tag.add_grouping(grouping)?;
        }
        if self.year != 0 {
            tag.add_year(self.year)?;
        }
        if self.track != 0 {
            tag.add_track(self.track)?;
        }
        if self.disc != 0 {
            tag.add_disc(self.disc)?;
        }
        if let Some(cover) = &self.cover {
            tag.add_cover_art(cover)?;
        }
        Ok(())
    }

    /// Attempts to open the file at the path, add every present field and write it back.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let mut tag = Tag::open(path)?;
        self.apply(&mut tag)?;
        tag.write()
    }
}
