use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::format::FormatDescriptor;
use crate::image_pipeline::raw::types::Plane16;

/// Source of decoded 16-bit planes; the pipeline is generic over it so
/// tests can substitute a canned plane.
pub trait RawImageReader {
    fn read_raw(&self, data: &[u8], format: &FormatDescriptor) -> Result<Plane16>;
}
