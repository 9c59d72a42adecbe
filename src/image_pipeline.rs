//! Raw sensor dump decoding pipeline
//!
//! Packed raw8/raw10/raw12/raw16 bayer dumps are unpacked into a full-range
//! 16-bit plane, split into their four bayer channels and reduced to a
//! half-resolution RGB preview. Output adapters write any of those products
//! to disk.

pub mod common;
pub mod conversions;
pub mod debayer;
pub mod output;
pub mod raw;

pub use common::{ConversionError, Result};

pub use raw::{
    Encoding, Endianness, FormatDescriptor, FormatDescriptorBuilder, PackedRawReader, Plane16,
    RawImageReader,
};

pub use debayer::{
    BayerOrder, Boundary, Channel, ChannelSet, Gains, PreviewConfig, RgbPreview, Rounding,
};

pub use output::{ImageWriter, OutputFormat, StandardImageWriter, TiffCompression, WriteOptions};

pub use conversions::{BatchReport, DecodedImage, DumpConfig, RawDumpPipeline};
