//! Output writing module
//!
//! Encodes decoded planes, bayer channels and RGB previews to PNG, JPEG, TIFF
//! or plain 16-bit binary files.

mod standard_writer;
pub mod types;
mod writer;

pub use standard_writer::StandardImageWriter;
pub use types::{OutputFormat, TiffCompression, WriteOptions};
pub use writer::ImageWriter;
