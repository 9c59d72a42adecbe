//! Output encoding configuration types

use std::str::FromStr;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::types::Endianness;

/// Container an in-memory grid is written as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// 16-bit grayscale or 8-bit RGB PNG
    #[default]
    Png,
    /// 8-bit RGB JPEG, previews only
    Jpeg,
    /// Gray16 or RGB8 TIFF
    Tiff,
    /// Headerless 16-bit samples, planes only
    Plain16,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Plain16 => "raw16",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "tif" | "tiff" => Ok(OutputFormat::Tiff),
            "raw16" | "plain16" => Ok(OutputFormat::Plain16),
            _ => Err(ConversionError::UnsupportedOutputFormat(s.to_string())),
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Encoder settings shared by every written file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// TIFF compression method
    pub compression: TiffCompression,
    /// TIFF predictor (2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Byte order of plain16 output
    pub endianness: Endianness,
    /// JPEG quality, 1..=100
    pub jpeg_quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
            endianness: Endianness::Little,
            jpeg_quality: 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!(".jpeg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("tif".parse::<OutputFormat>().unwrap(), OutputFormat::Tiff);
        assert_eq!("raw16".parse::<OutputFormat>().unwrap(), OutputFormat::Plain16);
        assert!(matches!(
            "bmp".parse::<OutputFormat>(),
            Err(ConversionError::UnsupportedOutputFormat(_))
        ));
    }
}
