use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode output image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimension(usize, usize),

    #[error("Unsupported raw encoding '{0}' (supply an explicit bits-per-pixel)")]
    UnsupportedEncoding(String),

    #[error("Unsupported bayer order: {0}")]
    UnsupportedBayerOrder(String),

    #[error("Unsupported endianness '{0}' (expected le or be)")]
    UnsupportedEndianness(String),

    #[error("Invalid bit depth {bpp} for a {container}-bit container")]
    InvalidBitDepth { bpp: u32, container: u32 },

    #[error("Truncated input: expected at least {expected} bytes, got {actual}")]
    TruncatedInput { expected: usize, actual: usize },

    #[error("Invalid gain {0}: must be finite and non-negative")]
    InvalidGain(f64),

    #[error("Unsupported output format: {0}")]
    UnsupportedOutputFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
