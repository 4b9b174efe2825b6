use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Unknown,
    Jpeg,
    Png,
    Gif,
    Bmp,
    Psd,
}

impl ImageFormat {
    /// Short code used for file extensions and mime subtypes.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::Jpeg => Some("jpg"),
            Self::Png => Some("png"),
            Self::Gif => Some("gif"),
            Self::Bmp => Some("bmp"),
            Self::Psd => Some("psd"),
        }
    }

    pub fn mime_type(self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::Jpeg => Some("image/jpeg"),
            Self::Png => Some("image/png"),
            Self::Gif => Some("image/gif"),
            Self::Bmp => Some("image/bmp"),
            Self::Psd => Some("image/vnd.adobe.photoshop"),
        }
    }

    #[inline]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::Bmp => "BMP",
            Self::Psd => "PSD",
        };
        f.pad(name)
    }
}

/// PNG IHDR color type. Discriminants are the raw header byte.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorType {
    Grayscale = 0,
    GrayscaleIndexed = 1,
    Truecolor = 2,
    Indexed = 3,
    GrayscaleAlpha = 4,
    GrayscaleAlphaIndexed = 5,
    TruecolorAlpha = 6,
    IndexedAlpha = 7,
    #[default]
    Unknown = 0xFF,
}

impl ColorType {
    pub fn from_png_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Grayscale,
            1 => Self::GrayscaleIndexed,
            2 => Self::Truecolor,
            3 => Self::Indexed,
            4 => Self::GrayscaleAlpha,
            5 => Self::GrayscaleAlphaIndexed,
            6 => Self::TruecolorAlpha,
            7 => Self::IndexedAlpha,
            _ => Self::Unknown,
        }
    }

    /// Samples stored per pixel; indexed and unknown types count as one.
    pub fn samples_per_pixel(self) -> u32 {
        match self {
            Self::GrayscaleAlpha => 2,
            Self::Truecolor => 3,
            Self::TruecolorAlpha => 4,
            _ => 1,
        }
    }
}

/// Everything a probe learned about one image.
///
/// Numeric fields stay `None` until a parser reads them. A failed probe may
/// leave some of them filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    pub format: ImageFormat,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub bits_per_pixel: Option<u32>,
    pub color_type: ColorType,
    pub progressive: bool,
    pub physical_width_dpi: Option<u32>,
    pub physical_height_dpi: Option<u32>,
    pub comments: Vec<String>,
    /// Frame count; only GIF counts frames, everything else reports 1.
    pub number_of_images: u32,
    /// Set by the caller-facing wrapper, never by the parsers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for ImageMetadata {
    fn default() -> Self {
        Self {
            format: ImageFormat::Unknown,
            width: None,
            height: None,
            bits_per_pixel: None,
            color_type: ColorType::Unknown,
            progressive: false,
            physical_width_dpi: None,
            physical_height_dpi: None,
            comments: Vec::new(),
            number_of_images: 1,
            error: None,
        }
    }
}

impl ImageMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width?, self.height?))
    }

    pub fn mime_type(&self) -> Option<&'static str> {
        self.format.mime_type()
    }
}
