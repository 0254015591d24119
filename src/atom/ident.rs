use std::convert::TryFrom;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// (`ftyp`) Identifier of an atom containing information about the filetype.
pub const FILETYPE: Fourcc = Fourcc(*b"ftyp");
/// (`mdat`)
pub const MEDIA_DATA: Fourcc = Fourcc(*b"mdat");
/// (`moov`) Identifier of an atom containing a structure of children storing metadata.
pub const MOVIE: Fourcc = Fourcc(*b"moov");
/// (`mvhd`) Identifier of an atom containing information about the whole movie (or audio file).
pub const MOVIE_HEADER: Fourcc = Fourcc(*b"mvhd");
/// (`iods`)
pub const INITIAL_OBJECT_DESCRIPTOR: Fourcc = Fourcc(*b"iods");
/// (`trak`) Identifier of an atom containing information about a single track.
pub const TRACK: Fourcc = Fourcc(*b"trak");
/// (`tkhd`)
pub const TRACK_HEADER: Fourcc = Fourcc(*b"tkhd");
/// (`mdia`) Identifier of an atom containing information about a tracks media type and data.
pub const MEDIA: Fourcc = Fourcc(*b"mdia");
/// (`mdhd`)
pub const MEDIA_HEADER: Fourcc = Fourcc(*b"mdhd");
/// (`minf`)
pub const MEDIA_INFORMATION: Fourcc = Fourcc(*b"minf");
/// (`smhd`)
pub const SOUND_MEDIA_HEADER: Fourcc = Fourcc(*b"smhd");
/// (`dinf`)
pub const DATA_INFORMATION: Fourcc = Fourcc(*b"dinf");
/// (`dref`)
pub const DATA_REFERENCE: Fourcc = Fourcc(*b"dref");
/// (`stbl`)
pub const SAMPLE_TABLE: Fourcc = Fourcc(*b"stbl");
/// (`stsd`)
pub const SAMPLE_TABLE_SAMPLE_DESCRIPTION: Fourcc = Fourcc(*b"stsd");
/// (`mp4a`)
pub const MP4_AUDIO: Fourcc = Fourcc(*b"mp4a");
/// (`esds`)
pub const ELEMENTARY_STREAM_DESCRIPTION: Fourcc = Fourcc(*b"esds");
/// (`stts`)
pub const SAMPLE_TABLE_TIME_TO_SAMPLE: Fourcc = Fourcc(*b"stts");
/// (`stsc`)
pub const SAMPLE_TABLE_SAMPLE_TO_CHUNK: Fourcc = Fourcc(*b"stsc");
/// (`stsz`)
pub const SAMPLE_TABLE_SAMPLE_SIZE: Fourcc = Fourcc(*b"stsz");
/// (`stco`)
pub const SAMPLE_TABLE_CHUNK_OFFSET: Fourcc = Fourcc(*b"stco");
/// (`udta`) Identifier of an atom containing user metadata.
pub const USER_DATA: Fourcc = Fourcc(*b"udta");
/// (`meta`) Identifier of an atom containing a metadata item list.
pub const METADATA: Fourcc = Fourcc(*b"meta");
/// (`hdlr`) Identifier of an atom specifying the handler component that should interpret the
/// medias data.
pub const HANDLER_REFERENCE: Fourcc = Fourcc(*b"hdlr");
/// (`ilst`) Identifier of an atom containing a list of metadata atoms.
pub const ITEM_LIST: Fourcc = Fourcc(*b"ilst");
/// (`data`) Identifier of an atom containing typed data.
pub const DATA: Fourcc = Fourcc(*b"data");

// iTunes 4.0 atoms
/// (`rtng`)
pub const ADVISORY_RATING: Fourcc = Fourcc(*b"rtng");
/// (`©alb`)
pub const ALBUM: Fourcc = Fourcc(*b"\xa9alb");
/// (`aART`)
pub const ALBUM_ARTIST: Fourcc = Fourcc(*b"aART");
/// (`©ART`)
pub const ARTIST: Fourcc = Fourcc(*b"\xa9ART");
/// (`covr`)
pub const ARTWORK: Fourcc = Fourcc(*b"covr");
/// (`tmpo`)
pub const BPM: Fourcc = Fourcc(*b"tmpo");
/// (`©cmt`)
pub const COMMENT: Fourcc = Fourcc(*b"\xa9cmt");
/// (`cpil`)
pub const COMPILATION: Fourcc = Fourcc(*b"cpil");
/// (`©wrt`)
pub const COMPOSER: Fourcc = Fourcc(*b"\xa9wrt");
/// (`cprt`)
pub const COPYRIGHT: Fourcc = Fourcc(*b"cprt");
/// (`©gen`)
pub const CUSTOM_GENRE: Fourcc = Fourcc(*b"\xa9gen");
/// (`disk`)
pub const DISC_NUMBER: Fourcc = Fourcc(*b"disk");
/// (`©too`)
pub const ENCODER: Fourcc = Fourcc(*b"\xa9too");
/// (`gnre`)
pub const STANDARD_GENRE: Fourcc = Fourcc(*b"gnre");
/// (`©nam`)
pub const TITLE: Fourcc = Fourcc(*b"\xa9nam");
/// (`trkn`)
pub const TRACK_NUMBER: Fourcc = Fourcc(*b"trkn");
/// (`©day`)
pub const YEAR: Fourcc = Fourcc(*b"\xa9day");

// iTunes 4.2 atoms
/// (`©grp`)
pub const GROUPING: Fourcc = Fourcc(*b"\xa9grp");
/// (`stik`)
pub const MEDIA_TYPE: Fourcc = Fourcc(*b"stik");

// iTunes 5.0
/// (`©lyr`)
pub const LYRICS: Fourcc = Fourcc(*b"\xa9lyr");

// iTunes 7.0
/// (`pgap`)
pub const GAPLESS_PLAYBACK: Fourcc = Fourcc(*b"pgap");

/// A 4 byte atom identifier (four character code).
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Fourcc(pub [u8; 4]);

impl Deref for Fourcc {
    type Target = [u8; 4];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Fourcc {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Fourcc {
    /// Converts a single component of a dotted atom path into an identifier. The `©` character
    /// is mapped to its latin-1 byte `0xa9`, as used by iTunes item identifiers. Returns `None`
    /// if the component doesn't consist of exactly 4 latin-1 characters.
    pub fn from_path_component(component: &str) -> Option<Self> {
        let mut ident = [0u8; 4];
        let mut len = 0;

        for c in component.chars() {
            let b = u8::try_from(u32::from(c)).ok()?;
            *ident.get_mut(len)? = b;
            len += 1;
        }

        match len {
            4 => Some(Self(ident)),
            _ => None,
        }
    }
}

impl fmt::Debug for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fourcc({})", self.0.iter().map(|b| char::from(*b)).collect::<String>())
    }
}

impl fmt::Display for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().map(|b| char::from(*b)).collect::<String>())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn path_component() {
        assert_eq!(Fourcc::from_path_component("moov"), Some(MOVIE));
        assert_eq!(Fourcc::from_path_component("©ART"), Some(ARTIST));
        assert_eq!(Fourcc::from_path_component("moo"), None);
        assert_eq!(Fourcc::from_path_component("moovs"), None);
        assert_eq!(Fourcc::from_path_component("m€ov"), None);
    }

    #[test]
    fn display() {
        assert_eq!(TITLE.to_string(), "©nam");
        assert_eq!(format!("{:?}", MOVIE), "Fourcc(moov)");
    }
}
