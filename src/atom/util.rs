use std::io::{self, Read, Seek, SeekFrom, Write};

pub trait ReadUtil: Read {
    /// Attempts to read an unsigned 32 bit big endian integer from the reader.
    fn read_be_u32(&mut self) -> io::Result<u32> {
        let mut buf = [0; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Attempts to read 8 bit unsigned integers from the reader to a vector of size length.
    fn read_u8_vec(&mut self, len: u64) -> crate::Result<Vec<u8>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len as usize)?;
        buf.resize(len as usize, 0);
        self.read_exact(&mut buf)?;
        Ok(buf)
    }
}

impl<T: Read> ReadUtil for T {}

pub trait SeekUtil: Seek {
    fn skip(&mut self, offset: i64) -> io::Result<()> {
        self.seek(SeekFrom::Current(offset))?;
        Ok(())
    }
}

impl<T: Seek> SeekUtil for T {}

pub trait WriteUtil: Write {
    fn write_be_u32(&mut self, val: u32) -> io::Result<()> {
        self.write_all(&val.to_be_bytes())
    }
}

impl<T: Write> WriteUtil for T {}

/// Copies exactly `len` bytes from the reader to the writer in blocks of at most `block_size`
/// bytes. Fails if the reader ends early.
pub fn copy_exact(
    reader: &mut impl Read,
    writer: &mut impl Write,
    mut len: u64,
    block_size: usize,
) -> io::Result<()> {
    let mut buf = vec![0u8; block_size.max(1)];

    while len > 0 {
        let n = (buf.len() as u64).min(len) as usize;
        reader.read_exact(&mut buf[..n])?;
        writer.write_all(&buf[..n])?;
        len -= n as u64;
    }

    Ok(())
}

/// Copies everything up to the end of the reader to the writer in blocks of at most
/// `block_size` bytes. Returns the number of copied bytes.
pub fn copy_to_end(
    reader: &mut impl Read,
    writer: &mut impl Write,
    block_size: usize,
) -> io::Result<u64> {
    let mut buf = vec![0u8; block_size.max(1)];
    let mut copied = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(copied),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        copied += n as u64;
    }
}

/// Attempts to read a big endian integer at the specified index from a byte slice.
macro_rules! be_int {
    ($bytes:expr, $index:expr, $type:ty) => {{
        use std::convert::TryFrom;

        const SIZE: usize = std::mem::size_of::<$type>();
        let bytes_start = ($index);
        let bytes_end = ($index) + SIZE;

        if $bytes.len() < bytes_end {
            None
        } else {
            let be_bytes = <[u8; SIZE]>::try_from(&$bytes[bytes_start..bytes_end]);

            match be_bytes {
                Ok(b) => Some(<$type>::from_be_bytes(b)),
                Err(_) => None,
            }
        }
    }};
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn be_int() {
        let bytes = [0x00, 0x00, 0x00, 0x00, 0x2D, 0x34, 0xD0, 0x5E];
        let int = be_int!(bytes, 4, u32);
        assert_eq!(int, Some(758435934u32));
        assert_eq!(be_int!(bytes, 6, u32), None);
    }

    #[test]
    fn copy_exact_in_blocks() {
        let src: Vec<u8> = (0..=255).collect();
        let mut reader = Cursor::new(&src);
        let mut out = Vec::new();

        copy_exact(&mut reader, &mut out, 100, 7).unwrap();
        assert_eq!(out, &src[..100]);
        assert_eq!(reader.position(), 100);

        let copied = copy_to_end(&mut reader, &mut out, 7).unwrap();
        assert_eq!(copied, 156);
        assert_eq!(out, src);
    }

    #[test]
    fn copy_exact_short_reader() {
        let mut reader = Cursor::new(vec![1u8; 10]);
        let mut out = Vec::new();

        let err = copy_exact(&mut reader, &mut out, 11, 4).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
