//! The payloads of metadata item `data` atoms.
//!
//! ```md
//! 4 bytes data type code
//! 4 bytes reserved (zero)
//! n bytes payload
//! ```
use std::fmt;

// [Table 3-5 Well-known data types](https://developer.apple.com/library/archive/documentation/QuickTime/QTFF/Metadata/Metadata.html#//apple_ref/doc/uid/TP40000939-CH1-SW34) codes
/// Reserved for use where no type needs to be indicated.
pub const RESERVED: u32 = 0;
/// UTF-8 without any count or NULL terminator.
pub const UTF8: u32 = 1;
/// JPEG in a JFIF wrapper.
pub const JPEG: u32 = 13;
/// PNG in a PNG wrapper.
pub const PNG: u32 = 14;
/// Windows bitmap format graphics.
pub const BMP: u32 = 27;

/// The length of the type code and the reserved field preceding the payload.
pub const DATA_HEADER_LEN: usize = 8;

/// The payload of a newly created `meta` atom, its version and flags.
pub static META_PAYLOAD: [u8; 4] = [0; 4];

/// The payload of a newly created metadata handler reference atom (`hdlr`).
#[rustfmt::skip]
pub static HDLR_PAYLOAD: [u8; 25] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    b'm', b'd', b'i', b'r', b'a', b'p', b'p', b'l',
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00,
];

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];
const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const BMP_MAGIC: [u8; 2] = [b'B', b'M'];

/// The format of cover art image data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImgFmt {
    /// Windows bitmap.
    Bmp,
    /// JPEG.
    Jpeg,
    /// PNG.
    Png,
}

impl fmt::Display for ImgFmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bmp => write!(f, "bmp"),
            Self::Jpeg => write!(f, "jpeg"),
            Self::Png => write!(f, "png"),
        }
    }
}

impl ImgFmt {
    /// Detects the format from the magic bytes at the start of the image data.
    pub fn sniff(image: &[u8]) -> Option<Self> {
        if image.starts_with(&JPEG_MAGIC) {
            Some(Self::Jpeg)
        } else if image.starts_with(&PNG_MAGIC) {
            Some(Self::Png)
        } else if image.starts_with(&BMP_MAGIC) {
            Some(Self::Bmp)
        } else {
            None
        }
    }

    /// Returns the data type code.
    pub const fn code(&self) -> u32 {
        match self {
            Self::Bmp => BMP,
            Self::Jpeg => JPEG,
            Self::Png => PNG,
        }
    }
}

/// Renders a track or disc number: a big endian 16 bit integer at offset 2 of an otherwise
/// zeroed 8 byte buffer.
pub fn index_payload(number: u16) -> [u8; 8] {
    let mut buf = [0u8; 8];
    buf[2..4].copy_from_slice(&number.to_be_bytes());
    buf
}

/// Renders a year as its decimal string, cut to at most 4 digits.
pub fn year_payload(year: u16) -> String {
    let mut year = year.to_string();
    year.truncate(4);
    year
}

/// Renders the content of a `data` atom.
pub fn data_content(code: u32, payload: &[u8]) -> crate::Result<Vec<u8>> {
    let mut content = Vec::new();
    content.try_reserve_exact(DATA_HEADER_LEN + payload.len())?;
    content.extend_from_slice(&code.to_be_bytes());
    content.extend_from_slice(&[0; 4]);
    content.extend_from_slice(payload);
    Ok(content)
}
