//! Classification of atom identifiers by how their content is laid out.
//!
//! ```md
//! container  8 byte head, children only
//! opaque     8 byte head, payload only (deferred until needed)
//! prefixed   8 byte head, fixed size payload, children
//! ```
use std::collections::HashMap;

use lazy_static::lazy_static;

use super::*;

/// The layout of an atom's content.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// The atom only contains children.
    Container,
    /// The atom only contains a payload, which is left in the file until needed.
    Opaque,
    /// The atom contains a payload of a fixed length followed by children.
    Prefixed(u64),
}

/// The iTunes metadata items, each one containing a single `data` atom.
const ITEM_IDENTS: [Fourcc; 21] = [
    ADVISORY_RATING,
    ALBUM,
    ALBUM_ARTIST,
    ARTIST,
    ARTWORK,
    BPM,
    COMMENT,
    COMPILATION,
    COMPOSER,
    COPYRIGHT,
    CUSTOM_GENRE,
    DISC_NUMBER,
    ENCODER,
    GAPLESS_PLAYBACK,
    GROUPING,
    LYRICS,
    MEDIA_TYPE,
    STANDARD_GENRE,
    TITLE,
    TRACK_NUMBER,
    YEAR,
];

lazy_static! {
    /// Lazily initialized static lookup table of all recognized atom identifiers.
    static ref ATOM_KINDS: HashMap<Fourcc, Kind> = atom_kinds();
}

#[rustfmt::skip]
fn atom_kinds() -> HashMap<Fourcc, Kind> {
    let mut kinds = HashMap::new();

    for &ident in [
        MOVIE,
        TRACK,
        MEDIA,
        MEDIA_INFORMATION,
        SAMPLE_TABLE,
        DATA_INFORMATION,
        USER_DATA,
        ITEM_LIST,
    ].iter() {
        kinds.insert(ident, Kind::Container);
    }

    for &ident in [
        MEDIA_HEADER,
        MOVIE_HEADER,
        TRACK_HEADER,
        HANDLER_REFERENCE,
        SAMPLE_TABLE_TIME_TO_SAMPLE,
        SAMPLE_TABLE_SAMPLE_TO_CHUNK,
        SAMPLE_TABLE_SAMPLE_SIZE,
        SAMPLE_TABLE_CHUNK_OFFSET,
        DATA_REFERENCE,
        ELEMENTARY_STREAM_DESCRIPTION,
        INITIAL_OBJECT_DESCRIPTOR,
        SOUND_MEDIA_HEADER,
        DATA,
    ].iter() {
        kinds.insert(ident, Kind::Opaque);
    }

    kinds.insert(SAMPLE_TABLE_SAMPLE_DESCRIPTION, Kind::Prefixed(8));
    kinds.insert(MP4_AUDIO, Kind::Prefixed(28));
    kinds.insert(METADATA, Kind::Prefixed(4));

    for &ident in ITEM_IDENTS.iter() {
        kinds.insert(ident, Kind::Container);
    }

    kinds
}

/// Returns the kind of a recognized atom identifier, or `None` for unknown identifiers.
pub fn kind_of(fourcc: Fourcc) -> Option<Kind> {
    ATOM_KINDS.get(&fourcc).copied()
}
