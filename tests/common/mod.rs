#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// The offsets of the media chunks relative to the start of the `mdat` payload.
pub const CHUNKS: [u32; 3] = [0, 1024, 3000];
pub const MEDIA_LEN: usize = 4096;

pub const JPEG: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0xD9];

pub fn atom(ident: &[u8; 4], content: &[u8]) -> Vec<u8> {
    let mut buf = ((content.len() + 8) as u32).to_be_bytes().to_vec();
    buf.extend_from_slice(ident);
    buf.extend_from_slice(content);
    buf
}

fn container(ident: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    atom(ident, &children.concat())
}

fn stco(offsets: &[u32]) -> Vec<u8> {
    let mut content = vec![0, 0, 0, 0];
    content.extend_from_slice(&(offsets.len() as u32).to_be_bytes());
    for o in offsets {
        content.extend_from_slice(&o.to_be_bytes());
    }
    atom(b"stco", &content)
}

fn mp4a() -> Vec<u8> {
    let mut content = vec![0, 0, 0, 0, 0, 0, 0, 1];
    content.extend_from_slice(&[0; 8]);
    content.extend_from_slice(&[0, 2, 0, 16, 0, 0, 0, 0, 0xAC, 0x44, 0, 0]);
    content.extend(atom(b"esds", &[0x03; 30]));
    atom(b"mp4a", &content)
}

fn moov(media_start: u32) -> Vec<u8> {
    let offsets: Vec<u32> = CHUNKS.iter().map(|c| c + media_start).collect();

    let mut stsd = vec![0, 0, 0, 0, 0, 0, 0, 1];
    stsd.extend(mp4a());

    let stbl = container(b"stbl", &[
        atom(b"stsd", &stsd),
        atom(b"stts", &[0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 3, 0, 0, 4, 0]),
        atom(b"stsc", &[0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1]),
        atom(b"stsz", &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        stco(&offsets),
    ]);
    let dinf = container(b"dinf", &[atom(b"dref", &[0, 0, 0, 0, 0, 0, 0, 0])]);
    let minf = container(b"minf", &[atom(b"smhd", &[0; 8]), dinf, stbl]);
    let mut hdlr = vec![0; 8];
    hdlr.extend_from_slice(b"soun");
    hdlr.extend_from_slice(&[0; 13]);
    let mdia = container(b"mdia", &[atom(b"mdhd", &[0; 24]), atom(b"hdlr", &hdlr), minf]);
    let trak = container(b"trak", &[atom(b"tkhd", &[0; 84]), mdia]);

    container(b"moov", &[atom(b"mvhd", &[0; 100]), atom(b"iods", &[0; 16]), trak])
}

/// Builds an untagged audio file: `ftyp`, `moov` and `mdat`, with the chunk offset table
/// pointing into the media data.
pub fn untagged_file() -> Vec<u8> {
    let ftyp = atom(b"ftyp", b"M4A \x00\x00\x02\x00isomiso2");
    // the length of moov doesn't depend on the offsets
    let moov_len = moov(0).len();
    let media_start = (ftyp.len() + moov_len + 8) as u32;

    let media: Vec<u8> = (0..MEDIA_LEN).map(|i| (i % 251) as u8).collect();
    [ftyp, moov(media_start), atom(b"mdat", &media)].concat()
}

/// Returns the position of the media data payload.
pub fn media_start(file: &[u8]) -> usize {
    file.len() - MEDIA_LEN
}

/// Reads the entries of the chunk offset table from the raw file.
pub fn chunk_offsets(file: &[u8]) -> Vec<u32> {
    let pos = file.windows(4).position(|w| w == b"stco").unwrap() + 4;
    let count = u32::from_be_bytes([file[pos + 4], file[pos + 5], file[pos + 6], file[pos + 7]]);
    (0..count as usize)
        .map(|i| {
            let p = pos + 8 + i * 4;
            u32::from_be_bytes([file[p], file[p + 1], file[p + 2], file[p + 3]])
        })
        .collect()
}

#[track_caller]
pub fn write_sample_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    println!("writing sample file `{}`...", path.display());
    fs::write(&path, content).unwrap();
    path
}
