use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{error, info, instrument};

use crate::image_pipeline::{
    common::{
        error::{ConversionError, Result},
        timing::PipelineTimings,
    },
    conversions::types::{BatchReport, DecodedImage, DumpConfig},
    debayer::{reconstruct, split},
    output::{ImageWriter, OutputFormat, StandardImageWriter, WriteOptions},
    raw::{FormatDescriptor, PackedRawReader, RawImageReader},
};

/// Decodes raw sensor dumps and writes the products selected in [`DumpConfig`].
pub struct RawDumpPipeline<R: RawImageReader, W: ImageWriter> {
    reader: R,
    writer: W,
    config: DumpConfig,
}

impl RawDumpPipeline<PackedRawReader, StandardImageWriter> {
    pub fn new(config: DumpConfig) -> Self {
        Self {
            reader: PackedRawReader,
            writer: StandardImageWriter,
            config,
        }
    }
}

impl<R: RawImageReader, W: ImageWriter> RawDumpPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: DumpConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// Decodes `input_data` and derives the channels and preview the
    /// configuration asks for.
    #[instrument(skip(self, input_data, format), fields(input_size = input_data.len()))]
    pub fn process(&self, input_data: &[u8], format: &FormatDescriptor) -> Result<DecodedImage> {
        self.process_timed(input_data, format, &mut PipelineTimings::new())
    }

    fn process_timed(
        &self,
        input_data: &[u8],
        format: &FormatDescriptor,
        timings: &mut PipelineTimings,
    ) -> Result<DecodedImage> {
        let plane = timings.time("decode", || self.reader.read_raw(input_data, format))?;

        let channels = self
            .config
            .needs_channels()
            .then(|| timings.time("split", || split(&plane, format.bayer_order())));

        let preview = match (&channels, self.config.rgb) {
            (Some(channels), true) => Some(timings.time("reconstruct", || {
                reconstruct(channels, &self.config.preview)
            })?),
            _ => None,
        };

        Ok(DecodedImage {
            plane,
            channels,
            preview,
        })
    }

    /// Decodes one file and writes every requested product into `output_dir`,
    /// returning the written paths.
    #[instrument(skip(self, input_path, format, output_dir))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        format: &FormatDescriptor,
        output_dir: Q,
    ) -> Result<Vec<PathBuf>> {
        let input_path = input_path.as_ref();
        let output_dir = output_dir.as_ref();

        info!(
            input = %input_path.display(),
            output_dir = %output_dir.display(),
            "Converting file"
        );

        let mut timings = PipelineTimings::new();
        let input_data = timings
            .time("read_input_file", || std::fs::read(input_path))
            .map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?;

        let decoded = self.process_timed(&input_data, format, &mut timings)?;

        let canonical_dir = std::fs::create_dir_all(output_dir)
            .and_then(|()| std::fs::canonicalize(output_dir))
            .map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_dir.display(), e))
            })?;
        let canonical_input = std::fs::canonicalize(input_path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;

        let stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let ext = self.config.image_format.extension();
        let options = WriteOptions {
            endianness: format.endianness(),
            ..self.config.write
        };
        let image_format = self.config.image_format;

        let mut written = Vec::new();
        let mut emit = |name: String, write: &dyn Fn(&mut dyn Write) -> Result<()>| -> Result<()> {
            let path = output_dir.join(&name);
            // Resolves `..` and symlinks in the directory and in an existing output file
            let target = std::fs::canonicalize(&path).unwrap_or_else(|_| canonical_dir.join(&name));
            if target == canonical_input {
                return Err(ConversionError::OutputWriteError(format!(
                    "{}: refusing to overwrite the input file",
                    path.display()
                )));
            }
            timings.time("write", || write_file(&path, write))?;
            info!(path = %path.display(), "Saved");
            written.push(path);
            Ok(())
        };

        if self.config.plane {
            emit(format!("{stem}.{ext}"), &|out| {
                self.writer.write_plane(&decoded.plane, out, image_format, &options)
            })?;
        }

        if self.config.plain16 {
            emit(format!("{stem}.{}", OutputFormat::Plain16.extension()), &|out| {
                self.writer
                    .write_plane(&decoded.plane, out, OutputFormat::Plain16, &options)
            })?;
        }

        if let (true, Some(channels)) = (self.config.components, &decoded.channels) {
            for (channel, plane) in channels.iter() {
                emit(format!("{stem}_{}.{ext}", channel.suffix()), &|out| {
                    self.writer.write_plane(plane, out, image_format, &options)
                })?;
            }
        }

        if let Some(preview) = &decoded.preview {
            emit(format!("{stem}_rgb.{ext}"), &|out| {
                self.writer.write_rgb(preview, out, image_format, &options)
            })?;
        }

        timings.log_summary(&input_path.display().to_string());
        info!(
            width = decoded.plane.width,
            height = decoded.plane.height,
            files = written.len(),
            "Conversion complete"
        );
        Ok(written)
    }

    /// Converts every input, building its descriptor with `format_for`.
    /// A failing file is recorded in the report and the batch moves on.
    pub fn convert_batch<F>(
        &self,
        inputs: &[PathBuf],
        format_for: F,
        output_dir: impl AsRef<Path>,
    ) -> BatchReport
    where
        F: Fn(&Path) -> Result<FormatDescriptor>,
    {
        let output_dir = output_dir.as_ref();
        let mut report = BatchReport::default();
        for input in inputs {
            let result = format_for(input)
                .and_then(|format| self.convert_file(input, &format, output_dir));
            match result {
                Ok(written) => report.converted.push((input.clone(), written)),
                Err(e) => {
                    error!(input = %input.display(), "Conversion failed: {}", e);
                    report.failed.push((input.clone(), e));
                }
            }
        }
        report
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }
}

fn write_file(path: &Path, write: &dyn Fn(&mut dyn Write) -> Result<()>) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| {
        ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
    })?;
    let mut out = BufWriter::new(file);
    write(&mut out)?;
    out.flush()?;
    Ok(())
}
