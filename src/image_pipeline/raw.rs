//! RAW image reading module
//!
//! This module describes packed sensor dump layouts and unpacks them into
//! canonical 16-bit planes.

pub mod format;
mod reader;
pub mod types;
pub mod unpacker;

pub use format::{FormatDescriptor, FormatDescriptorBuilder, bits_per_pixel_for};
pub use reader::RawImageReader;
pub use types::{Encoding, Endianness, Plane16};
pub use unpacker::{PackedRawReader, decode, rescale_to_16bit, unpack};
