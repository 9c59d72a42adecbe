//! Types for bayer channel splitting and preview reconstruction

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::types::Plane16;

/// Physical sensor role of a subsampled channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red
    R,
    /// Green on red rows
    Gr,
    /// Green on blue rows
    Gb,
    /// Blue
    B,
}

impl Channel {
    /// Short lowercase name used in output file names.
    pub fn suffix(self) -> &'static str {
        match self {
            Channel::R => "r",
            Channel::Gr => "gr",
            Channel::Gb => "gb",
            Channel::B => "b",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::R => f.write_str("R"),
            Channel::Gr => f.write_str("Gr"),
            Channel::Gb => f.write_str("Gb"),
            Channel::B => f.write_str("B"),
        }
    }
}

/// 2x2 color filter arrangement, named by its top-left row then bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BayerOrder {
    Grbg,
    Rggb,
    #[default]
    Bggr,
    Gbrg,
}

impl BayerOrder {
    /// Channels at quadrants (0,0), (0,1), (1,0), (1,1).
    pub fn layout(self) -> [Channel; 4] {
        use Channel::*;
        match self {
            BayerOrder::Grbg => [Gr, R, B, Gb],
            BayerOrder::Rggb => [R, Gr, Gb, B],
            BayerOrder::Bggr => [B, Gb, Gr, R],
            BayerOrder::Gbrg => [Gb, B, R, Gr],
        }
    }
}

impl FromStr for BayerOrder {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        const ORDERS: [(&str, BayerOrder); 4] = [
            ("grbg", BayerOrder::Grbg),
            ("rggb", BayerOrder::Rggb),
            ("bggr", BayerOrder::Bggr),
            ("gbrg", BayerOrder::Gbrg),
        ];
        let lower = s.to_ascii_lowercase();
        ORDERS
            .iter()
            .find(|(name, _)| lower.contains(name))
            .map(|&(_, order)| order)
            .ok_or_else(|| ConversionError::UnsupportedBayerOrder(s.to_string()))
    }
}

impl fmt::Display for BayerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BayerOrder::Grbg => f.write_str("GRBG"),
            BayerOrder::Rggb => f.write_str("RGGB"),
            BayerOrder::Bggr => f.write_str("BGGR"),
            BayerOrder::Gbrg => f.write_str("GBRG"),
        }
    }
}

/// The four half-resolution channels of a bayer plane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelSet {
    pub r: Plane16,
    pub gr: Plane16,
    pub gb: Plane16,
    pub b: Plane16,
}

impl ChannelSet {
    pub fn width(&self) -> usize {
        self.r.width
    }

    pub fn height(&self) -> usize {
        self.r.height
    }

    pub fn channel(&self, channel: Channel) -> &Plane16 {
        match channel {
            Channel::R => &self.r,
            Channel::Gr => &self.gr,
            Channel::Gb => &self.gb,
            Channel::B => &self.b,
        }
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut Plane16 {
        match channel {
            Channel::R => &mut self.r,
            Channel::Gr => &mut self.gr,
            Channel::Gb => &mut self.gb,
            Channel::B => &mut self.b,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &Plane16)> {
        [Channel::R, Channel::Gr, Channel::Gb, Channel::B]
            .into_iter()
            .map(move |c| (c, self.channel(c)))
    }
}

/// Half-resolution 8-bit RGB preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbPreview {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...]
    pub data: Vec<u8>,
}

impl RgbPreview {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    pub fn get(&self, y: usize, x: usize) -> Option<[u8; 3]> {
        if y >= self.height || x >= self.width {
            return None;
        }
        let i = (y * self.width + x) * 3;
        let px = self.data.get(i..i + 3)?;
        Some([px[0], px[1], px[2]])
    }
}
