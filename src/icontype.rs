use std::fmt;

/// Prefix for the names of files holding elements with no known icon type.
const UNKNOWN_TYPE_FILENAME_PREFIX: &str = "icon_data_";

/// Types of icon elements that have a canonical filename within an iconset.
/// Every one of these is stored as a PNG (or JPEG 2000) payload, which is
/// copied verbatim in both directions.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IconType {
    /// 16x16 32-bit icon.
    RGBA32_16x16,
    /// 16x16 32-bit icon at 2x "retina" density (so, 32 by 32 pixels).
    RGBA32_16x16_2x,
    /// 32x32 32-bit icon.
    RGBA32_32x32,
    /// 32x32 32-bit icon at 2x "retina" density (so, 64 by 64 pixels).
    RGBA32_32x32_2x,
    /// 64x64 32-bit icon.
    RGBA32_64x64,
    /// 128x128 32-bit icon.
    RGBA32_128x128,
    /// 128x128 32-bit icon at 2x "retina" density (so, 256 by 256 pixels).
    RGBA32_128x128_2x,
    /// 256x256 32-bit icon.
    RGBA32_256x256,
    /// 256x256 32-bit icon at 2x "retina" density (so, 512 by 512 pixels).
    RGBA32_256x256_2x,
    /// 512x512 32-bit icon.
    RGBA32_512x512,
    /// 512x512 32-bit icon at 2x "retina" density (so, 1024 by 1024 pixels).
    RGBA32_512x512_2x,
}

impl IconType {
    /// Every icon type, in the order used for iconset listings.
    pub const ALL: [IconType; 11] = [
        IconType::RGBA32_16x16,
        IconType::RGBA32_16x16_2x,
        IconType::RGBA32_32x32,
        IconType::RGBA32_32x32_2x,
        IconType::RGBA32_64x64,
        IconType::RGBA32_128x128,
        IconType::RGBA32_128x128_2x,
        IconType::RGBA32_256x256,
        IconType::RGBA32_256x256_2x,
        IconType::RGBA32_512x512,
        IconType::RGBA32_512x512_2x,
    ];

    /// Get the icon type associated with the given OSType, if any.
    pub fn from_ostype(ostype: OSType) -> Option<IconType> {
        IconType::ALL.iter().copied().find(|icon_type| {
            icon_type.ostype() == ostype
        })
    }

    /// Get the icon type stored under the given filename inside an iconset,
    /// if any.  The comparison is exact (and so case-sensitive).
    ///
    /// # Examples
    /// ```
    /// use icnsutil::IconType;
    /// assert_eq!(IconType::from_filename("icon_32x32@2x.png"),
    ///            Some(IconType::RGBA32_32x32_2x));
    /// assert_eq!(IconType::from_filename("Icon_32x32.png"), None);
    /// ```
    pub fn from_filename(filename: &str) -> Option<IconType> {
        IconType::ALL.iter().copied().find(|icon_type| {
            icon_type.filename() == filename
        })
    }

    /// Get the OSType that represents this icon type.
    pub fn ostype(self) -> OSType {
        match self {
            IconType::RGBA32_16x16 => OSType(*b"icp4"),
            IconType::RGBA32_16x16_2x => OSType(*b"ic11"),
            IconType::RGBA32_32x32 => OSType(*b"icp5"),
            IconType::RGBA32_32x32_2x => OSType(*b"ic12"),
            IconType::RGBA32_64x64 => OSType(*b"icp6"),
            IconType::RGBA32_128x128 => OSType(*b"ic07"),
            IconType::RGBA32_128x128_2x => OSType(*b"ic13"),
            IconType::RGBA32_256x256 => OSType(*b"ic08"),
            IconType::RGBA32_256x256_2x => OSType(*b"ic14"),
            IconType::RGBA32_512x512 => OSType(*b"ic09"),
            IconType::RGBA32_512x512_2x => OSType(*b"ic10"),
        }
    }

    /// Get the name of the file that holds this icon type inside an iconset.
    pub fn filename(self) -> &'static str {
        match self {
            IconType::RGBA32_16x16 => "icon_16x16.png",
            IconType::RGBA32_16x16_2x => "icon_16x16@2x.png",
            IconType::RGBA32_32x32 => "icon_32x32.png",
            IconType::RGBA32_32x32_2x => "icon_32x32@2x.png",
            IconType::RGBA32_64x64 => "icon_64x64.png",
            IconType::RGBA32_128x128 => "icon_128x128.png",
            IconType::RGBA32_128x128_2x => "icon_128x128@2x.png",
            IconType::RGBA32_256x256 => "icon_256x256.png",
            IconType::RGBA32_256x256_2x => "icon_256x256@2x.png",
            IconType::RGBA32_512x512 => "icon_512x512.png",
            IconType::RGBA32_512x512_2x => "icon_512x512@2x.png",
        }
    }

    /// Returns the pixel data width of this icon type.  Normally this is the
    /// same as the screen width, but for 2x "retina" density icons, this will
    /// be twice that value.
    ///
    /// # Examples
    /// ```
    /// use icnsutil::IconType;
    /// assert_eq!(IconType::RGBA32_64x64.pixel_width(), 64);
    /// assert_eq!(IconType::RGBA32_256x256.pixel_width(), 256);
    /// assert_eq!(IconType::RGBA32_256x256_2x.pixel_width(), 512);
    /// ```
    pub fn pixel_width(self) -> u32 {
        self.screen_width() * self.pixel_density()
    }

    /// Returns the pixel data height of this icon type.
    pub fn pixel_height(self) -> u32 {
        self.screen_height() * self.pixel_density()
    }

    /// Returns the pixel density for this icon type -- that is, 2 for 2x
    /// "retina" density icons, or 1 for other icon types.
    pub fn pixel_density(self) -> u32 {
        match self {
            IconType::RGBA32_16x16_2x |
            IconType::RGBA32_32x32_2x |
            IconType::RGBA32_128x128_2x |
            IconType::RGBA32_256x256_2x |
            IconType::RGBA32_512x512_2x => 2,
            _ => 1,
        }
    }

    /// Returns the screen width of this icon type.  Normally this is the same
    /// as the pixel width, but for 2x "retina" density icons, this will be
    /// half that value.
    pub fn screen_width(self) -> u32 {
        match self {
            IconType::RGBA32_16x16 | IconType::RGBA32_16x16_2x => 16,
            IconType::RGBA32_32x32 | IconType::RGBA32_32x32_2x => 32,
            IconType::RGBA32_64x64 => 64,
            IconType::RGBA32_128x128 | IconType::RGBA32_128x128_2x => 128,
            IconType::RGBA32_256x256 | IconType::RGBA32_256x256_2x => 256,
            IconType::RGBA32_512x512 | IconType::RGBA32_512x512_2x => 512,
        }
    }

    /// Returns the screen height of this icon type.  All supported icon
    /// types are square.
    pub fn screen_height(self) -> u32 {
        self.screen_width()
    }
}

/// A Macintosh OSType (also known as a ResType), used in ICNS files to
/// identify the type of each icon element.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OSType(pub [u8; 4]);

impl OSType {
    /// Returns the name of the file that holds an element of this type inside
    /// an iconset: the canonical filename for known icon types, or a name
    /// derived from the raw OSType bytes otherwise (see
    /// [`fallback_filename`](#method.fallback_filename)).
    pub fn iconset_filename(self) -> String {
        match IconType::from_ostype(self) {
            Some(icon_type) => icon_type.filename().to_string(),
            None => self.fallback_filename(),
        }
    }

    /// Returns the filename used to preserve an element whose OSType has no
    /// canonical iconset filename.  Printable ASCII bytes are kept as-is;
    /// `/`, `%`, and any other byte are written as `%XX`, so that distinct
    /// OSTypes always map to distinct, single-component filenames.
    ///
    /// # Examples
    /// ```
    /// use icnsutil::OSType;
    /// assert_eq!(OSType(*b"info").fallback_filename(), "icon_data_info");
    /// assert_eq!(OSType(*b"a/b\0").fallback_filename(),
    ///            "icon_data_a%2Fb%00");
    /// ```
    pub fn fallback_filename(self) -> String {
        let OSType(raw) = self;
        let mut name = String::from(UNKNOWN_TYPE_FILENAME_PREFIX);
        for &byte in &raw {
            if byte.is_ascii_graphic() && byte != b'/' && byte != b'%' {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("%{:02X}", byte));
            }
        }
        name
    }
}

impl fmt::Display for OSType {
    fn fmt(&self, out: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let &OSType(raw) = self;
        for &byte in &raw {
            write!(out, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl std::str::FromStr for OSType {
    type Err = String;

    fn from_str(input: &str) -> Result<OSType, String> {
        let bytes = input.as_bytes();
        if bytes.len() != 4 {
            Err(format!("OSType string must be 4 bytes (was {})", bytes.len()))
        } else {
            let mut raw = [0u8; 4];
            raw.clone_from_slice(bytes);
            Ok(OSType(raw))
        }
    }
}
