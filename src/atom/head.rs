use super::*;

/// The length of an atom head, a 32 bit length followed by the 4 byte identifier.
pub const HEAD_LEN: u64 = 8;

/// A head specifying the size and type of an atom.
///
/// ```md
/// 4 bytes length
/// 4 bytes identifier
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Head {
    /// The length including this head.
    len: u64,
    /// The identifier.
    fourcc: Fourcc,
}

impl Head {
    pub const fn new(len: u64, fourcc: Fourcc) -> Self {
        Self { len, fourcc }
    }

    pub const fn len(&self) -> u64 {
        self.len
    }

    pub const fn content_len(&self) -> u64 {
        self.len - HEAD_LEN
    }

    pub const fn fourcc(&self) -> Fourcc {
        self.fourcc
    }
}

/// Attempts to parse the atom's head containing a 32 bit unsigned integer determining the size of
/// the atom in bytes and the following 4 byte identifier from the reader.
///
/// Extended 64 bit lengths (a length of `1`) and to-end-of-file lengths (a length of `0`) aren't
/// supported and are rejected like any other length smaller than the head itself.
pub fn parse_head(reader: &mut impl Read) -> crate::Result<Head> {
    let len = match reader.read_be_u32() {
        Ok(l) => l as u64,
        Err(e) => {
            return Err(crate::Error::new(ErrorKind::Io(e), "Error reading atom length"));
        }
    };
    let mut ident = Fourcc([0u8; 4]);
    if let Err(e) = reader.read_exact(&mut *ident) {
        return Err(crate::Error::new(ErrorKind::Io(e), "Error reading atom identifier"));
    }

    if len < HEAD_LEN {
        return Err(crate::Error::new(
            ErrorKind::InvalidAtomSize(len),
            format!("Read length of '{}' which is less than 8 bytes: {}", ident, len),
        ));
    }

    Ok(Head::new(len, ident))
}

pub fn write_head(writer: &mut impl Write, head: Head) -> crate::Result<()> {
    if head.len() > u32::MAX as u64 {
        return Err(crate::Error::new(
            ErrorKind::AtomTooLarge(head.len()),
            format!("Length of '{}' doesn't fit into 32 bits: {}", head.fourcc(), head.len()),
        ));
    }

    writer.write_be_u32(head.len() as u32)?;
    writer.write_all(&*head.fourcc())?;
    Ok(())
}
