//! Sensor dump layout description
//!
//! A [`FormatDescriptor`] is built once per input file and carries everything
//! the unpacker needs to address a sample: packing family, significant bits,
//! per-row stride and the bytes to skip around each row.

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::types::BayerOrder;
use crate::image_pipeline::raw::types::{Encoding, Endianness};

/// Bit depth assumed when the identifier names no known depth.
pub const DEFAULT_BITS_PER_PIXEL: u32 = 16;

/// Significant bits per sample: an explicit override (> 0) wins, otherwise
/// the depth named inside `encoding`.
pub fn bits_per_pixel_for(encoding: &str, override_bpp: u32) -> u32 {
    if override_bpp > 0 {
        return override_bpp;
    }
    const DEPTHS: [(&str, u32); 5] = [
        ("raw8", 8),
        ("raw10", 10),
        ("raw12", 12),
        ("raw14", 14),
        ("raw16", 16),
    ];
    let lower = encoding.to_ascii_lowercase();
    DEPTHS
        .iter()
        .find(|(name, _)| lower.contains(name))
        .map(|&(_, bpp)| bpp)
        .unwrap_or(DEFAULT_BITS_PER_PIXEL)
}

/// Immutable layout of one raw sensor dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDescriptor {
    width: usize,
    height: usize,
    encoding: Encoding,
    bits_per_pixel: u32,
    bayer_order: BayerOrder,
    header_bytes: usize,
    left_pad_bytes: usize,
    right_pad_bytes: usize,
    endianness: Endianness,
    stride: usize,
}

impl FormatDescriptor {
    pub fn builder(width: usize, height: usize) -> FormatDescriptorBuilder {
        FormatDescriptorBuilder::new(width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_pixel
    }

    pub fn bayer_order(&self) -> BayerOrder {
        self.bayer_order
    }

    pub fn header_bytes(&self) -> usize {
        self.header_bytes
    }

    pub fn left_pad_bytes(&self) -> usize {
        self.left_pad_bytes
    }

    pub fn right_pad_bytes(&self) -> usize {
        self.right_pad_bytes
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Bytes per row including left and right padding.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes holding the packed samples of one row.
    pub fn packed_row_bytes(&self) -> usize {
        self.encoding.packed_row_bytes(self.width)
    }

    /// Minimum input length: header plus `height` full strides.
    pub fn required_len(&self) -> usize {
        self.header_bytes + self.height * self.stride
    }
}

/// Builder for FormatDescriptor
#[derive(Debug, Clone)]
pub struct FormatDescriptorBuilder {
    width: usize,
    height: usize,
    encoding: String,
    bits_per_pixel: u32,
    bayer_order: BayerOrder,
    header_bytes: usize,
    left_pad_bytes: usize,
    right_pad_bytes: usize,
    endianness: Endianness,
}

impl FormatDescriptorBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            encoding: String::new(),
            bits_per_pixel: 0,
            bayer_order: BayerOrder::default(),
            header_bytes: 0,
            left_pad_bytes: 0,
            right_pad_bytes: 0,
            endianness: Endianness::default(),
        }
    }

    /// Encoding identifier, e.g. `raw10` or a file extension such as `.RAW12`.
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Explicit significant bit depth; 0 infers it from the encoding.
    pub fn bits_per_pixel(mut self, bpp: u32) -> Self {
        self.bits_per_pixel = bpp;
        self
    }

    pub fn bayer_order(mut self, order: BayerOrder) -> Self {
        self.bayer_order = order;
        self
    }

    pub fn header_bytes(mut self, bytes: usize) -> Self {
        self.header_bytes = bytes;
        self
    }

    pub fn left_pad_bytes(mut self, bytes: usize) -> Self {
        self.left_pad_bytes = bytes;
        self
    }

    pub fn right_pad_bytes(mut self, bytes: usize) -> Self {
        self.right_pad_bytes = bytes;
        self
    }

    pub fn endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    pub fn build(self) -> Result<FormatDescriptor> {
        if self.width == 0 || self.height == 0 {
            return Err(ConversionError::InvalidDimension(self.width, self.height));
        }

        // Unknown identifiers fall back to a 16-bit container, but only when
        // the caller says how many of those bits are significant.
        let encoding = match Encoding::detect(&self.encoding) {
            Some(encoding) => encoding,
            None if self.bits_per_pixel > 0 => Encoding::Raw16,
            None => return Err(ConversionError::UnsupportedEncoding(self.encoding)),
        };

        let bits_per_pixel = bits_per_pixel_for(&self.encoding, self.bits_per_pixel);
        let container = encoding.container_bits();
        if bits_per_pixel > container {
            return Err(ConversionError::InvalidBitDepth {
                bpp: bits_per_pixel,
                container,
            });
        }

        // Widest packing is 16 bits per sample; guard the row byte math once.
        let stride = self
            .width
            .checked_mul(16)
            .map(|_| encoding.packed_row_bytes(self.width))
            .and_then(|row| row.checked_add(self.left_pad_bytes))
            .and_then(|row| row.checked_add(self.right_pad_bytes))
            .ok_or(ConversionError::InvalidDimension(self.width, self.height))?;
        stride
            .checked_mul(self.height)
            .and_then(|body| body.checked_add(self.header_bytes))
            .ok_or(ConversionError::InvalidDimension(self.width, self.height))?;

        debug!(
            width = self.width,
            height = self.height,
            %encoding,
            bits_per_pixel,
            stride,
            bayer_order = %self.bayer_order,
            "Format descriptor built"
        );

        Ok(FormatDescriptor {
            width: self.width,
            height: self.height,
            encoding,
            bits_per_pixel,
            bayer_order: self.bayer_order,
            header_bytes: self.header_bytes,
            left_pad_bytes: self.left_pad_bytes,
            right_pad_bytes: self.right_pad_bytes,
            endianness: self.endianness,
            stride,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_per_pixel_inference() {
        assert_eq!(bits_per_pixel_for("raw8", 0), 8);
        assert_eq!(bits_per_pixel_for(".RAW10", 0), 10);
        assert_eq!(bits_per_pixel_for("img.raw12", 0), 12);
        assert_eq!(bits_per_pixel_for("raw14", 0), 14);
        assert_eq!(bits_per_pixel_for("raw16", 0), 16);
        assert_eq!(bits_per_pixel_for("whatever", 0), DEFAULT_BITS_PER_PIXEL);
        assert_eq!(bits_per_pixel_for("raw16", 10), 10);
    }

    #[test]
    fn test_stride_per_encoding() {
        let stride = |enc: &str, width| {
            FormatDescriptor::builder(width, 2)
                .encoding(enc)
                .build()
                .unwrap()
                .stride()
        };
        assert_eq!(stride("raw8", 10), 10);
        assert_eq!(stride("raw10", 8), 10);
        assert_eq!(stride("raw10", 10), 13);
        assert_eq!(stride("raw12", 10), 15);
        assert_eq!(stride("raw12", 3), 5);
        assert_eq!(stride("raw16", 10), 20);
    }

    #[test]
    fn test_padding_added_to_stride() {
        let format = FormatDescriptor::builder(8, 4)
            .encoding("raw10")
            .header_bytes(16)
            .left_pad_bytes(2)
            .right_pad_bytes(4)
            .build()
            .unwrap();
        assert_eq!(format.packed_row_bytes(), 10);
        assert_eq!(format.stride(), 16);
        assert_eq!(format.required_len(), 16 + 4 * 16);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        for (w, h) in [(0, 4), (4, 0), (0, 0)] {
            let result = FormatDescriptor::builder(w, h).encoding("raw8").build();
            assert!(matches!(result, Err(ConversionError::InvalidDimension(_, _))));
        }
    }

    #[test]
    fn test_unknown_encoding_needs_override() {
        let result = FormatDescriptor::builder(4, 4).encoding(".bin").build();
        assert!(matches!(result, Err(ConversionError::UnsupportedEncoding(_))));

        let result = FormatDescriptor::builder(4, 4).encoding(".raw14").build();
        assert!(matches!(result, Err(ConversionError::UnsupportedEncoding(_))));

        let format = FormatDescriptor::builder(4, 4)
            .encoding(".raw14")
            .bits_per_pixel(14)
            .build()
            .unwrap();
        assert_eq!(format.encoding(), Encoding::Raw16);
        assert_eq!(format.bits_per_pixel(), 14);
        assert_eq!(format.stride(), 8);
    }

    #[test]
    fn test_override_wider_than_container_rejected() {
        let result = FormatDescriptor::builder(4, 4)
            .encoding("raw8")
            .bits_per_pixel(10)
            .build();
        assert!(matches!(
            result,
            Err(ConversionError::InvalidBitDepth { bpp: 10, container: 8 })
        ));
    }

    #[test]
    fn test_override_narrower_than_container_kept() {
        let format = FormatDescriptor::builder(4, 4)
            .encoding("raw16")
            .bits_per_pixel(12)
            .build()
            .unwrap();
        assert_eq!(format.encoding(), Encoding::Raw16);
        assert_eq!(format.bits_per_pixel(), 12);
        assert_eq!(format.stride(), 8);
    }
}
