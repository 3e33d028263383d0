use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};

use super::element::{self, ElementHeader, ICON_ELEMENT_HEADER_LENGTH};
use super::icontype::OSType;

/// The first four bytes of an ICNS file:
const ICNS_MAGIC_LITERAL: &[u8; 4] = b"icns";

/// The length of an icon family header, in bytes:
const ICON_FAMILY_HEADER_LENGTH: u32 = 8;

/// The offset of the total-length field within an ICNS file:
const FILE_LENGTH_OFFSET: u64 = 4;

/// Streams the elements of an ICNS file one at a time, without ever holding
/// a whole payload in memory.
///
/// By default the total length recorded in the file header is only checked
/// for being non-zero; [`strict`](#method.strict) additionally requires it to
/// agree with the elements actually present.
pub struct IconFamilyReader<R> {
    reader: R,
    file_length: u32,
    position: u64,
    pending: u64,
    strict: bool,
}

impl<R: Read> IconFamilyReader<R> {
    /// Reads and validates the ICNS file header.  Returns an error if the
    /// magic literal is wrong or the recorded file length is zero.
    pub fn new(mut reader: R) -> io::Result<IconFamilyReader<R>> {
        let mut magic = [0u8; 4];
        if let Err(err) = reader.read_exact(&mut magic) {
            if err.kind() == ErrorKind::UnexpectedEof {
                invalid_data!("not an icns file (too short for header)");
            }
            return Err(err);
        }
        if magic != *ICNS_MAGIC_LITERAL {
            invalid_data!("not an icns file (wrong magic literal)");
        }
        let file_length = match element::read_u32_be(reader.by_ref()) {
            Ok(length) => length,
            Err(ref err) if err.kind() == ErrorKind::UnexpectedEof => 0,
            Err(err) => return Err(err),
        };
        if file_length == 0 {
            invalid_data!("empty icns file (file length is zero)");
        }
        Ok(IconFamilyReader {
            reader,
            file_length,
            position: u64::from(ICON_FAMILY_HEADER_LENGTH),
            pending: 0,
            strict: false,
        })
    }

    /// Enables or disables cross-checking of the file length recorded in the
    /// header against the elements that follow it.
    pub fn strict(mut self, strict: bool) -> IconFamilyReader<R> {
        self.strict = strict;
        self
    }

    /// Returns the total file length recorded in the header, in bytes.
    pub fn file_length(&self) -> u32 {
        self.file_length
    }

    /// Reads the header of the next element.  Returns `None` once the end of
    /// the file is reached.  If the payload of the previous element was not
    /// consumed, it is skipped first.
    pub fn next_element(&mut self) -> io::Result<Option<ElementHeader>> {
        if self.pending > 0 {
            self.skip_payload()?;
        }
        let at_declared_end = self.position == u64::from(self.file_length);
        let header = match ElementHeader::read(self.reader.by_ref())? {
            Some(header) => header,
            None => {
                if self.strict && !at_declared_end {
                    invalid_data!("icns file ends after {} bytes, but its \
                                   header declares {} bytes",
                                  self.position,
                                  self.file_length);
                }
                return Ok(None);
            }
        };
        let element_end = self.position + u64::from(header.length);
        if self.strict && element_end > u64::from(self.file_length) {
            invalid_data!("'{}' element at offset {} extends past the \
                           declared file length ({} bytes)",
                          header.ostype,
                          self.position,
                          self.file_length);
        }
        tracing::debug!("element '{}' at offset {} ({} byte payload)",
                        header.ostype,
                        self.position,
                        header.data_length());
        self.position = element_end;
        self.pending = u64::from(header.data_length());
        Ok(Some(header))
    }

    /// Copies the payload of the current element to `writer`.
    pub fn copy_payload<W: Write>(&mut self, writer: W) -> io::Result<u64> {
        let length = self.pending;
        self.pending = 0;
        element::copy_exact(self.reader.by_ref(), writer, length)?;
        Ok(length)
    }

    /// Discards the payload of the current element.
    pub fn skip_payload(&mut self) -> io::Result<()> {
        self.copy_payload(io::sink()).map(|_| ())
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Writes an ICNS file one element at a time.  The total file length in the
/// header is written as zero at first and filled in by
/// [`finish`](#method.finish).
pub struct IconFamilyWriter<W: Write + Seek> {
    writer: W,
    num_elements: usize,
}

impl<W: Write + Seek> IconFamilyWriter<W> {
    /// Writes the ICNS file header, with a placeholder file length.
    pub fn new(mut writer: W) -> io::Result<IconFamilyWriter<W>> {
        writer.write_all(ICNS_MAGIC_LITERAL)?;
        element::write_u32_be(0, writer.by_ref())?;
        Ok(IconFamilyWriter { writer, num_elements: 0 })
    }

    /// Writes an element whose payload is the next `data_length` bytes of
    /// `reader`.  Returns an error if the reader runs out early.
    pub fn write_element<R: Read>(&mut self,
                                  ostype: OSType,
                                  reader: R,
                                  data_length: u64)
                                  -> io::Result<()> {
        let header = ElementHeader::for_payload(ostype, data_length)?;
        header.write(self.writer.by_ref())?;
        element::copy_exact(reader, self.writer.by_ref(), data_length)?;
        self.num_elements += 1;
        Ok(())
    }

    /// Returns the number of elements written so far.
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Records the final file length in the header and returns the
    /// underlying writer, positioned just after the length field.
    pub fn finish(mut self) -> io::Result<W> {
        let file_length = self.writer.stream_position()?;
        if file_length > u64::from(u32::MAX) {
            invalid_input!("icns file too large ({} bytes)", file_length);
        }
        debug_assert!(file_length >=
                      u64::from(ICON_FAMILY_HEADER_LENGTH) +
                      self.num_elements as u64 *
                      u64::from(ICON_ELEMENT_HEADER_LENGTH));
        self.writer.seek(SeekFrom::Start(FILE_LENGTH_OFFSET))?;
        element::write_u32_be(file_length as u32, self.writer.by_ref())?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}
