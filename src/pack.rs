use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::family::IconFamilyWriter;
use super::icontype::IconType;
use super::paths::icns_name_for_iconset;
use super::unpack::with_path_context;

/// One file copied into an ICNS file while packing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackedIcon {
    /// The icon type the file was stored as.
    pub icon_type: IconType,
    /// The path of the source file.
    pub path: PathBuf,
    /// The number of payload bytes copied.
    pub length: u64,
}

/// The result of a successful [`pack`](fn.pack.html).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackReport {
    /// The ICNS file that was created.
    pub icns_path: PathBuf,
    /// The files stored in the ICNS file, in file order.
    pub icons: Vec<PackedIcon>,
    /// Names of directory entries that were skipped because they don't match
    /// any known icon type.  Hidden entries are not listed.
    pub skipped: Vec<String>,
    /// The total length of the ICNS file, in bytes.
    pub file_length: u64,
}

/// Packs the iconset directory at `iconset_path` into a new ICNS file inside
/// `dest_dir`, named after the iconset (`x.iconset` becomes `x.icns`).
///
/// Every entry whose name matches a known icon type is copied verbatim into
/// the ICNS file, in name order.  Hidden entries (names starting with `.`)
/// are ignored, and entries with any other name are skipped with a warning.
/// On failure, the partially written ICNS file is left in place.
pub fn pack<P: AsRef<Path>, Q: AsRef<Path>>(iconset_path: P,
                                            dest_dir: Q)
                                            -> io::Result<PackReport> {
    let iconset_path = iconset_path.as_ref();
    let entries = fs::read_dir(iconset_path).map_err(|err| {
        with_path_context(err, "failed to open", iconset_path)
    })?;
    let mut names = Vec::new();
    for entry in entries {
        names.push(entry?.file_name());
    }
    names.sort();

    let icns_path =
        dest_dir.as_ref().join(icns_name_for_iconset(iconset_path)?);
    let file = File::create(&icns_path).map_err(|err| {
        with_path_context(err, "failed to create", &icns_path)
    })?;
    let mut family = IconFamilyWriter::new(BufWriter::new(file))?;
    tracing::debug!("packing {:?} into {:?}", iconset_path, icns_path);

    let mut icons = Vec::new();
    let mut skipped = Vec::new();
    for name in names {
        let name = name.to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let icon_type = match IconType::from_filename(&name) {
            Some(icon_type) => icon_type,
            None => {
                tracing::warn!("don't know icon type for {}, skipping", name);
                skipped.push(name);
                continue;
            }
        };
        let path = iconset_path.join(&name);
        let length = write_icon(&mut family, icon_type, &path)
            .map_err(|err| with_path_context(err, "failed to pack", &path))?;
        tracing::debug!("packed {:?} as '{}' ({} bytes)",
                        path,
                        icon_type.ostype(),
                        length);
        icons.push(PackedIcon { icon_type, path, length });
    }

    let mut writer = family.finish()?;
    let file_length = writer.seek(SeekFrom::End(0))?;
    tracing::info!("packed {} icon(s) from {:?} into {:?} ({} bytes)",
                   icons.len(),
                   iconset_path,
                   icns_path,
                   file_length);
    Ok(PackReport { icns_path, icons, skipped, file_length })
}

/// Copies one iconset file into the ICNS file, returning its length.
fn write_icon<W: io::Write + Seek>(family: &mut IconFamilyWriter<W>,
                                   icon_type: IconType,
                                   path: &Path)
                                   -> io::Result<u64> {
    let mut file = File::open(path)?;
    let length = file.seek(SeekFrom::End(0))?;
    file.seek(SeekFrom::Start(0))?;
    family.write_element(icon_type.ostype(), BufReader::new(file), length)?;
    Ok(length)
}
