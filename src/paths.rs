use std::io;
use std::path::{Path, PathBuf};

/// The filename extension of an ICNS file.
pub const ICNS_EXTENSION: &str = ".icns";

/// The filename extension of an iconset directory.
pub const ICONSET_EXTENSION: &str = ".iconset";

/// Returns the final component of `path` as a string, ignoring any trailing
/// separators.
fn basename(path: &Path) -> io::Result<&str> {
    let name = match path.file_name() {
        Some(name) => name,
        None => invalid_input!("can't determine name of {:?}", path),
    };
    match name.to_str() {
        Some(name) => Ok(name),
        None => invalid_input!("name of {:?} is not valid UTF-8", path),
    }
}

/// Derives the name of the iconset directory to unpack an ICNS file into.
/// The basename of `icns_path` must contain `.icns`; everything from its
/// first occurrence onwards is replaced by `.iconset`.  The result is a bare
/// name, with no directory components.
///
/// # Examples
/// ```
/// use icnsutil::iconset_name_for_icns;
/// use std::path::{Path, PathBuf};
/// assert_eq!(iconset_name_for_icns(Path::new("res/App.icns")).unwrap(),
///            PathBuf::from("App.iconset"));
/// assert!(iconset_name_for_icns(Path::new("App.png")).is_err());
/// ```
pub fn iconset_name_for_icns(icns_path: &Path) -> io::Result<PathBuf> {
    let name = basename(icns_path)?;
    match name.find(ICNS_EXTENSION) {
        Some(index) => {
            Ok(PathBuf::from(format!("{}{}", &name[..index], ICONSET_EXTENSION)))
        }
        None => {
            invalid_input!("can't find {} extension on input file {:?}",
                           ICNS_EXTENSION,
                           icns_path)
        }
    }
}

/// Derives the name of the ICNS file to pack an iconset directory into.  The
/// basename of `iconset_path` must end in `.iconset` (and be longer than
/// that); the extension is replaced by `.icns`.  The result is a bare name,
/// with no directory components.
///
/// # Examples
/// ```
/// use icnsutil::icns_name_for_iconset;
/// use std::path::{Path, PathBuf};
/// assert_eq!(icns_name_for_iconset(Path::new("build/App.iconset/")).unwrap(),
///            PathBuf::from("App.icns"));
/// assert!(icns_name_for_iconset(Path::new(".iconset")).is_err());
/// ```
pub fn icns_name_for_iconset(iconset_path: &Path) -> io::Result<PathBuf> {
    let name = basename(iconset_path)?;
    match name.strip_suffix(ICONSET_EXTENSION) {
        Some(stem) if !stem.is_empty() => {
            Ok(PathBuf::from(format!("{}{}", stem, ICNS_EXTENSION)))
        }
        _ => {
            invalid_input!("need {} directory as input (got {:?})",
                           ICONSET_EXTENSION,
                           iconset_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    #[test]
    fn iconset_name_uses_basename() {
        assert_eq!(PathBuf::from("x.iconset"),
                   iconset_name_for_icns(Path::new("x.icns")).unwrap());
        assert_eq!(PathBuf::from("x.iconset"),
                   iconset_name_for_icns(Path::new("/a/b/x.icns")).unwrap());
        assert_eq!(PathBuf::from("x.iconset"),
                   iconset_name_for_icns(Path::new("a/x.icns/")).unwrap());
    }

    #[test]
    fn iconset_name_truncates_at_first_extension() {
        assert_eq!(PathBuf::from("x.iconset"),
                   iconset_name_for_icns(Path::new("x.icns.bak")).unwrap());
        assert_eq!(PathBuf::from("x.iconset"),
                   iconset_name_for_icns(Path::new("x.icns.icns")).unwrap());
    }

    #[test]
    fn iconset_name_failures() {
        for path in &["x.png", "x.ICNS", "icns", "", "/", "a/.."] {
            let err = iconset_name_for_icns(Path::new(path)).unwrap_err();
            assert_eq!(ErrorKind::InvalidInput, err.kind(), "{:?}", path);
        }
    }

    #[test]
    fn icns_name_uses_basename() {
        assert_eq!(PathBuf::from("x.icns"),
                   icns_name_for_iconset(Path::new("x.iconset")).unwrap());
        assert_eq!(PathBuf::from("x.icns"),
                   icns_name_for_iconset(Path::new("/tmp/x.iconset/"))
                       .unwrap());
        assert_eq!(PathBuf::from("a.iconset.icns"),
                   icns_name_for_iconset(Path::new("a.iconset.iconset"))
                       .unwrap());
    }

    #[test]
    fn icns_name_failures() {
        for path in &[".iconset", "x.iconsets", "x.icns", "iconset", ""] {
            let err = icns_name_for_iconset(Path::new(path)).unwrap_err();
            assert_eq!(ErrorKind::InvalidInput, err.kind(), "{:?}", path);
        }
    }
}
