use std::fs;
use std::path::Path;

use m4atag::{atom, Metadata, ReadConfig, Tag, WriteConfig};
use walkdir::WalkDir;

mod common;

#[track_caller]
fn read_tag(path: &Path) -> Tag {
    println!("reading from `{}`...", path.display());
    Tag::open(path).unwrap()
}

#[track_caller]
fn item_data(tag: &mut Tag, ident: &str) -> Vec<u8> {
    let path = format!("moov.udta.meta.ilst.{}.data", ident);
    tag.load_data(&path).unwrap().unwrap().to_vec()
}

/// Asserts that the directory only contains the file.
#[track_caller]
fn assert_single_file(dir: &Path, path: &Path) {
    let files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    assert_eq!(files, vec![path.to_path_buf()]);
}

#[test]
fn metadata_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let original = common::untagged_file();
    let path = common::write_sample_file(dir.path(), "song.m4a", &original);

    let mut tag = read_tag(&path);
    tag.add_artist("A").unwrap();
    tag.add_album("B").unwrap();
    tag.add_title("C").unwrap();
    tag.add_year(1999).unwrap();
    tag.add_track(3).unwrap();
    tag.add_disc(1).unwrap();
    tag.add_cover_art(&common::JPEG).unwrap();
    println!("writing to `{}`...", path.display());
    tag.write().unwrap();

    let mut tag = read_tag(&path);
    let ilst = tag.find_atom("moov.udta.meta.ilst").unwrap();
    let names: Vec<_> =
        ilst.children().iter().map(|c| tag.tree().get(*c).name().to_string()).collect();
    assert_eq!(names, ["©ART", "©alb", "©nam", "©day", "trkn", "disk", "covr"]);

    assert_eq!(item_data(&mut tag, "©ART"), b"\x00\x00\x00\x01\x00\x00\x00\x00A");
    assert_eq!(item_data(&mut tag, "©alb"), b"\x00\x00\x00\x01\x00\x00\x00\x00B");
    assert_eq!(item_data(&mut tag, "©nam"), b"\x00\x00\x00\x01\x00\x00\x00\x00C");
    assert_eq!(item_data(&mut tag, "©day"), b"\x00\x00\x00\x01\x00\x00\x00\x001999");
    assert_eq!(item_data(&mut tag, "trkn"), [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0]);
    assert_eq!(item_data(&mut tag, "disk"), [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]);

    let covr = item_data(&mut tag, "covr");
    assert_eq!(covr[..8], [0, 0, 0, 13, 0, 0, 0, 0]);
    assert_eq!(covr[8..], common::JPEG);

    let hdlr = tag.load_data("moov.udta.meta.hdlr").unwrap().unwrap();
    assert_eq!(&hdlr[8..16], b"mdirappl");
    tag.close();

    assert_single_file(dir.path(), &path);
}

#[test]
fn media_data_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let original = common::untagged_file();
    let path = common::write_sample_file(dir.path(), "song.m4a", &original);
    let old_offsets = common::chunk_offsets(&original);

    let metadata = Metadata {
        artist: "artist".to_owned(),
        album: "album".to_owned(),
        title: "title".to_owned(),
        grouping: Some("grouping".to_owned()),
        year: 2012,
        track: 7,
        disc: 2,
        cover: Some(common::JPEG.to_vec()),
    };
    metadata.write_to_path(&path).unwrap();

    let written = fs::read(&path).unwrap();
    let delta = written.len() - original.len();
    assert!(delta > 0);

    // everything before moov and everything after it is unchanged
    assert_eq!(written[..24], original[..24]);
    let media_start = common::media_start(&original);
    assert_eq!(written[media_start + delta - 8..], original[media_start - 8..]);

    let new_offsets = common::chunk_offsets(&written);
    assert_eq!(new_offsets.len(), old_offsets.len());
    for (new, old) in new_offsets.iter().zip(old_offsets.iter()) {
        assert_eq!(*new as usize, *old as usize + delta);
        assert_eq!(
            written[*new as usize..*new as usize + 16],
            original[*old as usize..*old as usize + 16]
        );
    }

    let tag = read_tag(&path);
    let moov = tag.find_atom("moov").unwrap();
    let ftyp_len = 24;
    assert_eq!(moov.len() as usize, media_start - 8 - ftyp_len + delta);
    assert_eq!(tag.find_atom("moov.udta.meta.ilst").unwrap().children().len(), 8);
}

#[test]
fn untouched_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let original = common::untagged_file();
    let path = common::write_sample_file(dir.path(), "song.m4a", &original);

    for block_size in [1, 13, 4096].iter() {
        let tag = read_tag(&path);
        tag.write_with(&WriteConfig { copy_block_size: *block_size }).unwrap();
        assert_eq!(fs::read(&path).unwrap(), original);
    }

    assert_single_file(dir.path(), &path);
}

#[test]
fn written_file_can_be_tagged_again() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_sample_file(dir.path(), "song.m4a", &common::untagged_file());

    let mut tag = read_tag(&path);
    tag.add_artist("first").unwrap();
    tag.write().unwrap();
    let once = fs::read(&path).unwrap();
    let offsets = common::chunk_offsets(&once);

    let mut tag = read_tag(&path);
    tag.add_title("second").unwrap();
    tag.write().unwrap();
    let twice = fs::read(&path).unwrap();

    // only the item is added, the hierarchy exists already
    let delta = 8 + 8 + 8 + "second".len();
    assert_eq!(twice.len(), once.len() + delta);
    let shifted: Vec<u32> = offsets.iter().map(|o| o + delta as u32).collect();
    assert_eq!(common::chunk_offsets(&twice), shifted);

    let tag = read_tag(&path);
    let ilst = tag.find_atom("moov.udta.meta.ilst").unwrap();
    assert_eq!(ilst.children().len(), 2);
    assert_eq!(tag.find_atom("moov.udta.meta").unwrap().children().len(), 2);
}

#[test]
fn read_tree_in_memory() {
    let original = common::untagged_file();
    let mut reader = std::io::Cursor::new(&original);
    let tree = atom::read_tree(&mut reader, &ReadConfig::DEFAULT).unwrap();

    let moov = tree.roots()[0];
    assert_eq!(tree.roots().len(), 1);
    assert_eq!(tree.get(moov).name(), atom::MOVIE);

    let stco = tree.find("moov.trak.mdia.minf.stbl.stco").unwrap();
    assert!(tree.get(stco).is_deferred());
    assert_eq!(tree.get(stco).data_len(), 8 + 4 * 3);

    let mp4a = tree.find("moov.trak.mdia.minf.stbl.stsd.mp4a").unwrap();
    assert_eq!(tree.get(mp4a).data().map(|d| d.len()), Some(28));
    assert_eq!(tree.children(mp4a).len(), 1);
}
