//! Half-resolution RGB preview from split bayer channels

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::types::{ChannelSet, RgbPreview};

/// Manual per-channel multipliers applied after the 16 to 8 bit reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gains {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Gains {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    fn validate(&self) -> Result<()> {
        for gain in [self.r, self.g, self.b] {
            if !gain.is_finite() || gain < 0.0 {
                return Err(ConversionError::InvalidGain(gain));
            }
        }
        Ok(())
    }
}

impl Default for Gains {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// How the /256 and /512 reductions treat the fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// No bias; the scaled value is truncated
    #[default]
    Truncate,
    /// Adds 128 (R, B) and 256 (G) before dividing
    Nearest,
}

impl Rounding {
    /// Bias added to (R or B, Gr + Gb) before dividing.
    fn bias(self) -> (f64, f64) {
        match self {
            Rounding::Truncate => (0.0, 0.0),
            Rounding::Nearest => (128.0, 256.0),
        }
    }
}

/// Which channel pixels produce output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Last row and last column are left black
    #[default]
    ZeroLastRowColumn,
    /// Every pixel is computed
    Full,
}

/// Configuration for RGB preview reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PreviewConfig {
    pub gains: Gains,
    pub rounding: Rounding,
    pub boundary: Boundary,
}

impl PreviewConfig {
    pub fn builder() -> PreviewConfigBuilder {
        PreviewConfigBuilder::default()
    }
}

/// Builder for PreviewConfig
#[derive(Default)]
pub struct PreviewConfigBuilder {
    gains: Option<Gains>,
    rounding: Option<Rounding>,
    boundary: Option<Boundary>,
}

impl PreviewConfigBuilder {
    pub fn gains(mut self, gains: Gains) -> Self {
        self.gains = Some(gains);
        self
    }

    pub fn rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = Some(rounding);
        self
    }

    pub fn boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn build(self) -> PreviewConfig {
        let default = PreviewConfig::default();
        PreviewConfig {
            gains: self.gains.unwrap_or(default.gains),
            rounding: self.rounding.unwrap_or(default.rounding),
            boundary: self.boundary.unwrap_or(default.boundary),
        }
    }
}

/// Builds an 8-bit RGB preview the size of the channel planes.
///
/// Per pixel: `r = (R + bias) / 256 * gain_r`, `g = (Gr + Gb + bias) / 512 * gain_g`,
/// `b = (B + bias) / 256 * gain_b`, each clamped to 0..=255 and truncated.
pub fn reconstruct(channels: &ChannelSet, config: &PreviewConfig) -> Result<RgbPreview> {
    config.gains.validate()?;

    let mut width = usize::MAX;
    let mut height = usize::MAX;
    for (_, plane) in channels.iter() {
        if plane.data.len() != plane.width * plane.height {
            return Err(ConversionError::InvalidDimension(plane.width, plane.height));
        }
        width = width.min(plane.width);
        height = height.min(plane.height);
    }

    debug!(
        width,
        height,
        rounding = ?config.rounding,
        boundary = ?config.boundary,
        "Reconstructing RGB preview"
    );

    let mut preview = RgbPreview::new(width, height);
    if width == 0 || height == 0 {
        return Ok(preview);
    }
    let (rows, cols) = match config.boundary {
        Boundary::ZeroLastRowColumn => (height.saturating_sub(1), width.saturating_sub(1)),
        Boundary::Full => (height, width),
    };

    let (bias_rb, bias_g) = config.rounding.bias();
    let gains = config.gains;
    let to_u8 = |v: f64| v.clamp(0.0, 255.0) as u8;

    let ChannelSet { r, gr, gb, b } = channels;
    for (y, out_row) in preview.data.chunks_exact_mut(width * 3).take(rows).enumerate() {
        for (x, px) in out_row.chunks_exact_mut(3).take(cols).enumerate() {
            let red = f64::from(r.data[y * r.width + x]);
            let green = f64::from(gr.data[y * gr.width + x]) + f64::from(gb.data[y * gb.width + x]);
            let blue = f64::from(b.data[y * b.width + x]);

            px[0] = to_u8((red + bias_rb) / 256.0 * gains.r);
            px[1] = to_u8((green + bias_g) / 512.0 * gains.g);
            px[2] = to_u8((blue + bias_rb) / 256.0 * gains.b);
        }
    }

    Ok(preview)
}
