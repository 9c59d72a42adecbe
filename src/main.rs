use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use rawdecode_rs::image_pipeline::conversions::{discover_raw_files, encoding_for};
use rawdecode_rs::image_pipeline::{
    BayerOrder, Boundary, DumpConfig, Endianness, FormatDescriptor, Gains, OutputFormat,
    PreviewConfig, RawDumpPipeline, Rounding, TiffCompression, WriteOptions,
};
use rawdecode_rs::logger;

use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "rawdecode", about = "Raw bayer sensor dump decoder")]
struct Cli {
    /// Input file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Input directory, scanned for files with a raw8/raw10/raw12/raw16 extension
    #[arg(long)]
    dir: Option<PathBuf>,

    #[arg(long, default_value_t = 0)]
    width: usize,

    #[arg(long, default_value_t = 0)]
    height: usize,

    /// Bayer order: GRBG, RGGB, BGGR or GBRG
    #[arg(long = "bayerorder", default_value = "BGGR")]
    bayer_order: BayerOrder,

    /// Raw format: raw8, raw10, raw12, raw16. Default: read from extension
    #[arg(long)]
    encoding: Option<String>,

    /// Significant bits per pixel if different than the encoding; 0 infers it
    #[arg(long, default_value_t = 0)]
    bpp: u32,

    /// Bytes to skip before the first row
    #[arg(long, default_value_t = 0)]
    header: usize,

    /// Bytes to skip before the samples of every row
    #[arg(long, default_value_t = 0)]
    left_pad: usize,

    /// Bytes to skip after the samples of every row
    #[arg(long, default_value_t = 0)]
    right_pad: usize,

    /// Byte order of raw16 input and plain16 output: le or be
    #[arg(long, default_value = "le")]
    endianness: Endianness,

    /// Save the decoded 16-bit plane
    #[arg(long = "png", visible_alias = "plane")]
    plane: bool,

    /// Save Gr, R, B, Gb components as separate images
    #[arg(long)]
    components: bool,

    /// Save the half-resolution RGB preview
    #[arg(long)]
    rgb: bool,

    /// Save the decoded plane as headerless 16-bit binary
    #[arg(long)]
    plain16: bool,

    /// Image container for plane, components and preview: png, tiff or jpeg
    #[arg(long, default_value = "png")]
    format: OutputFormat,

    #[arg(long, default_value_t = 1.0)]
    gain_r: f64,

    #[arg(long, default_value_t = 1.0)]
    gain_g: f64,

    #[arg(long, default_value_t = 1.0)]
    gain_b: f64,

    /// Round the preview reduction to nearest instead of truncating
    #[arg(long)]
    round_nearest: bool,

    /// Also compute the last preview row and column
    #[arg(long)]
    full_preview: bool,

    /// LZW-compress TIFF output
    #[arg(long)]
    tiff_lzw: bool,

    #[arg(long, default_value = "./output")]
    outdir: PathBuf,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn preview_config(&self) -> PreviewConfig {
        PreviewConfig::builder()
            .gains(Gains::new(self.gain_r, self.gain_g, self.gain_b))
            .rounding(if self.round_nearest {
                Rounding::Nearest
            } else {
                Rounding::Truncate
            })
            .boundary(if self.full_preview {
                Boundary::Full
            } else {
                Boundary::ZeroLastRowColumn
            })
            .build()
    }

    fn dump_config(&self) -> DumpConfig {
        let write = WriteOptions {
            compression: if self.tiff_lzw {
                TiffCompression::Lzw
            } else {
                TiffCompression::None
            },
            ..WriteOptions::default()
        };

        DumpConfig::builder()
            .plane(self.plane)
            .plain16(self.plain16)
            .components(self.components)
            .rgb(self.rgb)
            .image_format(self.format)
            .preview(self.preview_config())
            .write_options(write)
            .build()
    }

    /// Descriptor for one input; the encoding comes from `--encoding` or the extension.
    fn format_for(&self, path: &Path) -> rawdecode_rs::image_pipeline::Result<FormatDescriptor> {
        FormatDescriptor::builder(self.width, self.height)
            .encoding(encoding_for(path, self.encoding.as_deref()))
            .bits_per_pixel(self.bpp)
            .bayer_order(self.bayer_order)
            .header_bytes(self.header)
            .left_pad_bytes(self.left_pad)
            .right_pad_bytes(self.right_pad)
            .endianness(self.endianness)
            .build()
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    info!("Starting rawdecode...");

    let inputs = match (&cli.file, &cli.dir) {
        (Some(file), _) => vec![file.clone()],
        (None, Some(dir)) => discover_raw_files(dir)
            .with_context(|| format!("scanning {}", dir.display()))?,
        (None, None) => bail!("must define --file and/or --dir"),
    };
    info!("Processing {} supported raw images", inputs.len());

    let pipeline = RawDumpPipeline::new(cli.dump_config());
    let config = pipeline.config();
    info!(
        format = ?config.image_format,
        plane = config.plane,
        plain16 = config.plain16,
        components = config.components,
        rgb = config.rgb,
        "Output selection"
    );

    let report = pipeline.convert_batch(&inputs, |path: &Path| cli.format_for(path), &cli.outdir);

    info!(
        converted = report.converted.len(),
        failed = report.failed.len(),
        "Batch finished"
    );

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
