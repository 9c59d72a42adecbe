//! Pipeline conversions module
//!
//! This module contains orchestration logic for decoding raw dumps and
//! writing their derived products, one file or a whole directory at a time.

pub mod discovery;
mod raw_dump;
pub mod types;


pub use discovery::{discover_raw_files, encoding_for, is_supported_raw};
pub use raw_dump::RawDumpPipeline;
pub use types::{BatchReport, DecodedImage, DumpConfig, DumpConfigBuilder};
