use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::debayer::types::RgbPreview;
use crate::image_pipeline::output::types::{OutputFormat, WriteOptions};
use crate::image_pipeline::raw::types::Plane16;

pub trait ImageWriter {
    fn write_plane(
        &self,
        plane: &Plane16,
        output: &mut dyn Write,
        format: OutputFormat,
        options: &WriteOptions,
    ) -> Result<()>;

    fn write_rgb(
        &self,
        preview: &RgbPreview,
        output: &mut dyn Write,
        format: OutputFormat,
        options: &WriteOptions,
    ) -> Result<()>;
}
