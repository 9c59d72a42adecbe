//! Pipeline configuration and result types

use std::path::PathBuf;

use crate::image_pipeline::common::error::ConversionError;
use crate::image_pipeline::debayer::{ChannelSet, PreviewConfig, RgbPreview};
use crate::image_pipeline::output::{OutputFormat, WriteOptions};
use crate::image_pipeline::raw::Plane16;

/// Which products are written per input file, and how
#[derive(Debug, Clone)]
pub struct DumpConfig {
    /// Write the decoded 16-bit plane as `<stem>.<ext>`
    pub plane: bool,
    /// Write the decoded plane as headerless 16-bit samples, `<stem>.raw16`
    pub plain16: bool,
    /// Write each bayer channel as `<stem>_<channel>.<ext>`
    pub components: bool,
    /// Write the half-resolution preview as `<stem>_rgb.<ext>`
    pub rgb: bool,
    /// Container for plane, components and preview images
    pub image_format: OutputFormat,
    /// Gains, rounding and boundary handling of the preview
    pub preview: PreviewConfig,
    /// Encoder settings; plain16 byte order always follows the input descriptor
    pub write: WriteOptions,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            plane: false,
            plain16: false,
            components: false,
            rgb: false,
            image_format: OutputFormat::Png,
            preview: PreviewConfig::default(),
            write: WriteOptions::default(),
        }
    }
}

impl DumpConfig {
    pub fn builder() -> DumpConfigBuilder {
        DumpConfigBuilder::default()
    }

    pub(crate) fn needs_channels(&self) -> bool {
        self.components || self.rgb
    }
}

/// Builder for DumpConfig
#[derive(Default)]
pub struct DumpConfigBuilder {
    plane: Option<bool>,
    plain16: Option<bool>,
    components: Option<bool>,
    rgb: Option<bool>,
    image_format: Option<OutputFormat>,
    preview: Option<PreviewConfig>,
    write: Option<WriteOptions>,
}

impl DumpConfigBuilder {
    pub fn plane(mut self, enable: bool) -> Self {
        self.plane = Some(enable);
        self
    }

    pub fn plain16(mut self, enable: bool) -> Self {
        self.plain16 = Some(enable);
        self
    }

    pub fn components(mut self, enable: bool) -> Self {
        self.components = Some(enable);
        self
    }

    pub fn rgb(mut self, enable: bool) -> Self {
        self.rgb = Some(enable);
        self
    }

    pub fn image_format(mut self, format: OutputFormat) -> Self {
        self.image_format = Some(format);
        self
    }

    pub fn preview(mut self, preview: PreviewConfig) -> Self {
        self.preview = Some(preview);
        self
    }

    pub fn write_options(mut self, options: WriteOptions) -> Self {
        self.write = Some(options);
        self
    }

    pub fn build(self) -> DumpConfig {
        let default = DumpConfig::default();
        DumpConfig {
            plane: self.plane.unwrap_or(default.plane),
            plain16: self.plain16.unwrap_or(default.plain16),
            components: self.components.unwrap_or(default.components),
            rgb: self.rgb.unwrap_or(default.rgb),
            image_format: self.image_format.unwrap_or(default.image_format),
            preview: self.preview.unwrap_or(default.preview),
            write: self.write.unwrap_or(default.write),
        }
    }
}

/// Everything derived from one input buffer
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub plane: Plane16,
    /// Present when components or a preview were requested
    pub channels: Option<ChannelSet>,
    /// Present when a preview was requested
    pub preview: Option<RgbPreview>,
}

/// Outcome of a batch run; one failed file never stops the others
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Input path and the files written for it
    pub converted: Vec<(PathBuf, Vec<PathBuf>)>,
    pub failed: Vec<(PathBuf, ConversionError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
