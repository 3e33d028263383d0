use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::family::IconFamilyReader;
use super::icontype::OSType;
use super::paths::iconset_name_for_icns;

/// Options controlling how an ICNS file is unpacked.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UnpackOptions {
    /// Require the file length recorded in the ICNS header to match the
    /// elements actually present, instead of only checking it is non-zero.
    pub strict: bool,
}

/// One file written while unpacking an ICNS file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnpackedIcon {
    /// The OSType of the element the file was extracted from.
    pub ostype: OSType,
    /// The path of the extracted file.
    pub path: PathBuf,
    /// The number of payload bytes written.
    pub length: u64,
}

/// The result of a successful [`unpack`](fn.unpack.html).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnpackReport {
    /// The iconset directory that was created.
    pub iconset_path: PathBuf,
    /// The files written into the iconset, in file order.
    pub icons: Vec<UnpackedIcon>,
}

/// Unpacks the ICNS file at `icns_path` into a new iconset directory inside
/// `dest_dir`, named after the ICNS file (`x.icns` becomes `x.iconset`).
///
/// Each element's payload is copied verbatim into a file named after its
/// icon type; elements of unknown type are kept under a name derived from
/// their OSType.  The ICNS header is validated before the directory is
/// created.  On failure, anything already written is left in place.
pub fn unpack<P: AsRef<Path>, Q: AsRef<Path>>(icns_path: P,
                                              dest_dir: Q,
                                              options: &UnpackOptions)
                                              -> io::Result<UnpackReport> {
    let icns_path = icns_path.as_ref();
    let file = File::open(icns_path).map_err(|err| {
        with_path_context(err, "failed to open", icns_path)
    })?;
    let mut family = IconFamilyReader::new(BufReader::new(file))?
        .strict(options.strict);
    let iconset_path =
        dest_dir.as_ref().join(iconset_name_for_icns(icns_path)?);
    fs::create_dir(&iconset_path).map_err(|err| {
        with_path_context(err, "failed to create", &iconset_path)
    })?;
    tracing::debug!("unpacking {:?} into {:?}", icns_path, iconset_path);

    let mut icons = Vec::new();
    while let Some(header) = family.next_element()? {
        let path = iconset_path.join(header.ostype.iconset_filename());
        let file = File::create(&path).map_err(|err| {
            with_path_context(err, "failed to create", &path)
        })?;
        let mut writer = BufWriter::new(file);
        let length = family.copy_payload(&mut writer).map_err(|err| {
            with_path_context(err, "error copying icns data to", &path)
        })?;
        writer.flush()?;
        tracing::debug!("wrote {} bytes to {:?}", length, path);
        icons.push(UnpackedIcon { ostype: header.ostype, path, length });
    }
    tracing::info!("unpacked {} icon(s) from {:?} into {:?}",
                   icons.len(),
                   icns_path,
                   iconset_path);
    Ok(UnpackReport { iconset_path, icons })
}

/// Wraps an I/O error with a description of the operation and path that
/// caused it, keeping the original error kind.
pub(crate) fn with_path_context(err: io::Error,
                                action: &str,
                                path: &Path)
                                -> io::Error {
    io::Error::new(err.kind(), format!("{} {:?}: {}", action, path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use std::path::Path;

    #[test]
    fn path_context_keeps_kind() {
        let err = io::Error::new(ErrorKind::NotFound, "gone");
        let err = with_path_context(err, "failed to open", Path::new("a"));
        assert_eq!(ErrorKind::NotFound, err.kind());
        assert_eq!("failed to open \"a\": gone", err.to_string());
    }

    #[test]
    fn default_options_are_lenient() {
        assert!(!UnpackOptions::default().strict);
    }
}
