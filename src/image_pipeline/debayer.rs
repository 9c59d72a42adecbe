//! Bayer channel splitting and half-resolution RGB preview
//!
//! Only nearest-neighbour subsampling is done here: each 2x2 cell becomes one
//! preview pixel. There is no interpolation.

pub mod preview;
pub mod splitter;
pub mod types;

pub use preview::{Boundary, Gains, PreviewConfig, PreviewConfigBuilder, Rounding, reconstruct};
pub use splitter::split;
pub use types::{BayerOrder, Channel, ChannelSet, RgbPreview};
