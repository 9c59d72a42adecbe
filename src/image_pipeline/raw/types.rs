//! RAW image data types

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Packing family of a raw sensor dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// One byte per sample
    Raw8,
    /// MIPI-style packing: 4 samples in 5 bytes
    Raw10,
    /// MIPI-style packing: 2 samples in 3 bytes
    Raw12,
    /// Two bytes per sample, byte order from the descriptor
    Raw16,
}

impl Encoding {
    /// Identifiers matched (case-insensitive containment) in this order.
    pub const SUPPORTED: [(&'static str, Encoding); 4] = [
        ("raw8", Encoding::Raw8),
        ("raw10", Encoding::Raw10),
        ("raw12", Encoding::Raw12),
        ("raw16", Encoding::Raw16),
    ];

    /// Finds the packing family named anywhere inside `identifier`,
    /// e.g. a file extension like `.RAW10`.
    pub fn detect(identifier: &str) -> Option<Self> {
        let lower = identifier.to_ascii_lowercase();
        Self::SUPPORTED
            .iter()
            .find(|(name, _)| lower.contains(name))
            .map(|&(_, encoding)| encoding)
    }

    /// Number of bits each sample occupies in the packed stream.
    pub fn container_bits(self) -> u32 {
        match self {
            Encoding::Raw8 => 8,
            Encoding::Raw10 => 10,
            Encoding::Raw12 => 12,
            Encoding::Raw16 => 16,
        }
    }

    /// Bytes needed for `width` packed samples, before any padding.
    pub fn packed_row_bytes(self, width: usize) -> usize {
        match self {
            Encoding::Raw8 => width,
            Encoding::Raw10 => (width * 10).div_ceil(8),
            Encoding::Raw12 => (width * 12).div_ceil(8),
            Encoding::Raw16 => width * 2,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Raw8 => f.write_str("raw8"),
            Encoding::Raw10 => f.write_str("raw10"),
            Encoding::Raw12 => f.write_str("raw12"),
            Encoding::Raw16 => f.write_str("raw16"),
        }
    }
}

/// Byte order of 16-bit samples, both when reading raw16 and when
/// persisting a decoded plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

impl FromStr for Endianness {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "le" | "little" => Ok(Endianness::Little),
            "be" | "big" => Ok(Endianness::Big),
            _ => Err(ConversionError::UnsupportedEndianness(s.to_string())),
        }
    }
}

/// Height x width grid of 16-bit samples, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plane16 {
    /// Width of the plane in pixels
    pub width: usize,
    /// Height of the plane in pixels
    pub height: usize,
    /// Sample data, `width * height` entries
    pub data: Vec<u16>,
}

impl Plane16 {
    /// Zero-filled plane.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn from_samples(width: usize, height: usize, data: Vec<u16>) -> Result<Self> {
        if data.len() != width * height {
            return Err(ConversionError::InvalidDimension(width, height));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn get(&self, y: usize, x: usize) -> Option<u16> {
        if y >= self.height || x >= self.width {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    pub fn row(&self, y: usize) -> Option<&[u16]> {
        if y >= self.height {
            return None;
        }
        self.data.get(y * self.width..(y + 1) * self.width)
    }

    /// Serializes the samples as a plain 16-bit buffer in the given byte order.
    pub fn to_bytes(&self, endianness: Endianness) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|&v| match endianness {
                Endianness::Little => v.to_le_bytes(),
                Endianness::Big => v.to_be_bytes(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_is_case_insensitive_containment() {
        assert_eq!(Encoding::detect(".RAW10"), Some(Encoding::Raw10));
        assert_eq!(Encoding::detect("frame_raw12_le"), Some(Encoding::Raw12));
        assert_eq!(Encoding::detect("raw8"), Some(Encoding::Raw8));
        assert_eq!(Encoding::detect(".Raw16"), Some(Encoding::Raw16));
        assert_eq!(Encoding::detect(".raw14"), None);
        assert_eq!(Encoding::detect(".bin"), None);
    }

    #[test]
    fn test_packed_row_bytes_rounds_up() {
        assert_eq!(Encoding::Raw8.packed_row_bytes(7), 7);
        assert_eq!(Encoding::Raw10.packed_row_bytes(8), 10);
        assert_eq!(Encoding::Raw10.packed_row_bytes(6), 8);
        assert_eq!(Encoding::Raw12.packed_row_bytes(4), 6);
        assert_eq!(Encoding::Raw12.packed_row_bytes(3), 5);
        assert_eq!(Encoding::Raw16.packed_row_bytes(5), 10);
    }

    #[test]
    fn test_endianness_parsing() {
        assert_eq!("le".parse::<Endianness>().unwrap(), Endianness::Little);
        assert_eq!("BE".parse::<Endianness>().unwrap(), Endianness::Big);
        assert!(matches!(
            "middle".parse::<Endianness>(),
            Err(ConversionError::UnsupportedEndianness(_))
        ));
    }

    #[test]
    fn test_plane_accessors() {
        let plane = Plane16::from_samples(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(plane.get(1, 2), Some(6));
        assert_eq!(plane.get(2, 0), None);
        assert_eq!(plane.get(0, 3), None);
        assert_eq!(plane.row(1), Some(&[4, 5, 6][..]));
        assert!(Plane16::from_samples(3, 2, vec![0; 5]).is_err());
    }

    #[test]
    fn test_plane_to_bytes_respects_endianness() {
        let plane = Plane16::from_samples(2, 1, vec![0x1234, 0xABCD]).unwrap();
        assert_eq!(plane.to_bytes(Endianness::Little), vec![0x34, 0x12, 0xCD, 0xAB]);
        assert_eq!(plane.to_bytes(Endianness::Big), vec![0x12, 0x34, 0xAB, 0xCD]);
    }
}
