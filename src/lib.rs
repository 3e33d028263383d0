//! Library for losslessly converting between Apple Icon Image (.icns) files
//! and `.iconset` directories.
//!
//! An ICNS file is an 8-byte header (the magic literal `icns` and the total
//! file length) followed by a sequence of elements, each an OSType, a length,
//! and a payload.  An iconset is a directory holding one file per icon size
//! (`icon_16x16.png`, `icon_16x16@2x.png`, and so on).  This crate moves the
//! payloads between the two forms without ever decoding or re-encoding the
//! images they contain.
//!
//! See https://en.wikipedia.org/wiki/Apple_Icon_Image_format for more
//! information about the file format.
//!
//! # Example
//!
//! ```no_run
//! use icnsutil::{pack, unpack, UnpackOptions};
//!
//! // Creates ./App.iconset from the icons stored in resources/App.icns:
//! let report = unpack("resources/App.icns", ".", &UnpackOptions::default())
//!     .expect("failed to unpack ICNS file");
//! println!("extracted {} icon(s)", report.icons.len());
//!
//! // ...and packs them back up into ./App.icns:
//! pack("App.iconset", ".").expect("failed to pack iconset");
//! ```

#![warn(missing_docs)]

macro_rules! invalid_data {
    ($e:expr) => {
        return Err(::std::io::Error::new(::std::io::ErrorKind::InvalidData,
                                         $e))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err(::std::io::Error::new(::std::io::ErrorKind::InvalidData,
                                         format!($fmt, $($arg)+)))
    };
}

macro_rules! invalid_input {
    ($e:expr) => {
        return Err(::std::io::Error::new(::std::io::ErrorKind::InvalidInput,
                                         $e))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err(::std::io::Error::new(::std::io::ErrorKind::InvalidInput,
                                         format!($fmt, $($arg)+)))
    };
}

mod element;
mod family;
mod icontype;
mod pack;
mod paths;
mod unpack;

pub use element::{ElementHeader, ICON_ELEMENT_HEADER_LENGTH, copy_exact,
                  read_ostype, read_u32_be, write_u32_be};
pub use family::{IconFamilyReader, IconFamilyWriter};
pub use icontype::{IconType, OSType};
pub use pack::{PackReport, PackedIcon, pack};
pub use paths::{ICNS_EXTENSION, ICONSET_EXTENSION, icns_name_for_iconset,
                iconset_name_for_icns};
pub use unpack::{UnpackOptions, UnpackReport, UnpackedIcon, unpack};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn single_icon_file_layout() {
        let mut family = IconFamilyWriter::new(Cursor::new(Vec::new()))
            .unwrap();
        let ostype = IconType::from_filename("icon_16x16.png")
            .unwrap()
            .ostype();
        family.write_element(ostype, &[0xabu8][..], 1).unwrap();
        let output = family.finish().unwrap().into_inner();
        assert_eq!(vec![0x69, 0x63, 0x6e, 0x73, 0x00, 0x00, 0x00, 0x11,
                        0x69, 0x63, 0x70, 0x34, 0x00, 0x00, 0x00, 0x09,
                        0xab],
                   output);
    }

    #[test]
    fn every_icon_type_survives_stream_round_trip() {
        let mut family = IconFamilyWriter::new(Cursor::new(Vec::new()))
            .unwrap();
        for (index, icon_type) in IconType::ALL.iter().enumerate() {
            let data = vec![index as u8; index + 1];
            family.write_element(icon_type.ostype(), &data[..],
                                 data.len() as u64)
                .unwrap();
        }
        let output = family.finish().unwrap().into_inner();

        let mut family = IconFamilyReader::new(Cursor::new(&output))
            .unwrap()
            .strict(true);
        assert_eq!(output.len() as u32, family.file_length());
        let mut index = 0;
        while let Some(header) = family.next_element().unwrap() {
            assert_eq!(Some(IconType::ALL[index]),
                       IconType::from_ostype(header.ostype));
            let mut data = Vec::new();
            family.copy_payload(&mut data).unwrap();
            assert_eq!(vec![index as u8; index + 1], data);
            index += 1;
        }
        assert_eq!(IconType::ALL.len(), index);
    }
}
