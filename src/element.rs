use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, ErrorKind, Read, Write};

use super::icontype::OSType;

/// The length of an icon element header, in bytes:
pub const ICON_ELEMENT_HEADER_LENGTH: u32 = 8;

/// The size of the block buffer used when streaming element payloads:
const COPY_BUFFER_SIZE: usize = 1024;

/// Reads a 4-byte big-endian unsigned integer.  Fails with
/// `ErrorKind::UnexpectedEof` if fewer than four bytes are available.
pub fn read_u32_be<R: Read>(mut reader: R) -> io::Result<u32> {
    reader.read_u32::<BigEndian>()
}

/// Writes a 4-byte big-endian unsigned integer.
pub fn write_u32_be<W: Write>(value: u32, mut writer: W) -> io::Result<()> {
    writer.write_u32::<BigEndian>(value)
}

/// Reads a 4-byte OSType.  Returns `None` if the stream ends before all four
/// bytes could be read, which is how the end of an ICNS file is detected.
pub fn read_ostype<R: Read>(mut reader: R) -> io::Result<Option<OSType>> {
    let mut raw = [0u8; 4];
    let mut filled = 0;
    while filled < raw.len() {
        match reader.read(&mut raw[filled..]) {
            Ok(0) => break,
            Ok(count) => filled += count,
            Err(ref err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    if filled == raw.len() {
        Ok(Some(OSType(raw)))
    } else {
        if filled > 0 {
            tracing::warn!("ignoring {} trailing byte(s) after last element",
                           filled);
        }
        Ok(None)
    }
}

/// The eight bytes that precede each element's payload within an ICNS file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ElementHeader {
    /// The OSType identifying the element (e.g. `ic08`).
    pub ostype: OSType,
    /// The encoded length of the element, in bytes, including the header.
    pub length: u32,
}

impl ElementHeader {
    /// Creates the header for an element with a payload of the given length.
    /// Returns an error if the total length does not fit in the header.
    pub fn for_payload(ostype: OSType,
                       data_length: u64)
                       -> io::Result<ElementHeader> {
        let length = data_length + u64::from(ICON_ELEMENT_HEADER_LENGTH);
        if length > u64::from(u32::MAX) {
            invalid_input!("element payload too large ({} bytes)",
                           data_length);
        }
        Ok(ElementHeader { ostype, length: length as u32 })
    }

    /// Returns the length of the payload that follows this header.
    pub fn data_length(&self) -> u32 {
        self.length - ICON_ELEMENT_HEADER_LENGTH
    }

    /// Reads an element header from within an ICNS file.  Returns `None` at
    /// the end of the file, and an error if the declared length leaves no
    /// room for a payload.
    pub fn read<R: Read>(mut reader: R) -> io::Result<Option<ElementHeader>> {
        let ostype = match read_ostype(reader.by_ref())? {
            Some(ostype) => ostype,
            None => return Ok(None),
        };
        let length = read_u32_be(reader.by_ref())?;
        if length <= ICON_ELEMENT_HEADER_LENGTH {
            invalid_data!("invalid element length ({}) for '{}' element",
                          length,
                          ostype);
        }
        Ok(Some(ElementHeader { ostype, length }))
    }

    /// Writes the element header to within an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let OSType(ref raw_ostype) = self.ostype;
        writer.write_all(raw_ostype)?;
        write_u32_be(self.length, writer)
    }
}

/// Copies exactly `length` bytes from `reader` to `writer` in fixed-size
/// blocks.  Running out of input before `length` bytes is an error.
pub fn copy_exact<R: Read, W: Write>(mut reader: R,
                                     mut writer: W,
                                     length: u64)
                                     -> io::Result<()> {
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut remaining = length;
    while remaining > 0 {
        let chunk = remaining.min(COPY_BUFFER_SIZE as u64) as usize;
        reader.read_exact(&mut buffer[..chunk]).map_err(|err| {
            if err.kind() == ErrorKind::UnexpectedEof {
                let msg = format!("element payload truncated ({} of {} \
                                   bytes missing)",
                                  remaining,
                                  length);
                io::Error::new(ErrorKind::UnexpectedEof, msg)
            } else {
                err
            }
        })?;
        writer.write_all(&buffer[..chunk])?;
        remaining -= chunk as u64;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::icontype::OSType;
    use std::io::{Cursor, ErrorKind};

    #[test]
    fn u32_big_endian() {
        let mut output = Vec::new();
        write_u32_be(0x0102_0304, &mut output).unwrap();
        assert_eq!(b"\x01\x02\x03\x04", &output as &[u8]);
        let value = read_u32_be(Cursor::new(&output)).unwrap();
        assert_eq!(0x0102_0304, value);
    }

    #[test]
    fn short_u32_read_fails() {
        let err = read_u32_be(Cursor::new(b"\x00\x01")).unwrap_err();
        assert_eq!(ErrorKind::UnexpectedEof, err.kind());
    }

    #[test]
    fn read_header() {
        let input = Cursor::new(b"ic08\0\0\0\x0apayload");
        let header = ElementHeader::read(input).unwrap().unwrap();
        assert_eq!(OSType(*b"ic08"), header.ostype);
        assert_eq!(10, header.length);
        assert_eq!(2, header.data_length());
    }

    #[test]
    fn read_header_at_end_of_file() {
        assert_eq!(None, ElementHeader::read(Cursor::new(b"")).unwrap());
        assert_eq!(None, ElementHeader::read(Cursor::new(b"ic")).unwrap());
    }

    #[test]
    fn read_header_with_missing_length() {
        let err = ElementHeader::read(Cursor::new(b"ic08\0\0")).unwrap_err();
        assert_eq!(ErrorKind::UnexpectedEof, err.kind());
    }

    #[test]
    fn reject_undersized_header() {
        for length in 0..9u32 {
            let mut input = b"ic08".to_vec();
            write_u32_be(length, &mut input).unwrap();
            let err = ElementHeader::read(Cursor::new(input)).unwrap_err();
            assert_eq!(ErrorKind::InvalidData, err.kind());
        }
    }

    #[test]
    fn write_header() {
        let header = ElementHeader::for_payload(OSType(*b"icp4"), 1).unwrap();
        let mut output = Vec::new();
        header.write(&mut output).unwrap();
        assert_eq!(b"icp4\0\0\0\x09", &output as &[u8]);
    }

    #[test]
    fn oversized_payload() {
        let err = ElementHeader::for_payload(OSType(*b"icp4"),
                                             u64::from(u32::MAX))
            .unwrap_err();
        assert_eq!(ErrorKind::InvalidInput, err.kind());
    }

    #[test]
    fn copy_exact_spans_blocks() {
        let data: Vec<u8> = (0..3000u32).map(|i| i as u8).collect();
        let mut reader = Cursor::new(&data);
        let mut output = Vec::new();
        copy_exact(&mut reader, &mut output, 2500).unwrap();
        assert_eq!(&data[..2500], &output as &[u8]);
        assert_eq!(2500, reader.position());
    }

    #[test]
    fn copy_exact_truncated() {
        let mut output = Vec::new();
        let err = copy_exact(Cursor::new(vec![7u8; 1500]), &mut output, 2000)
            .unwrap_err();
        assert_eq!(ErrorKind::UnexpectedEof, err.kind());
        assert_eq!(1024, output.len());
    }
}
