use std::io::{Cursor, Write};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ImageBuffer, Luma, RgbImage};
use tiff::encoder::colortype::{ColorType, Gray16, RGB8};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder, TiffValue};
use tiff::tags::Predictor;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::types::RgbPreview;
use crate::image_pipeline::output::types::{OutputFormat, TiffCompression, WriteOptions};
use crate::image_pipeline::output::writer::ImageWriter;
use crate::image_pipeline::raw::types::Plane16;

/// Writes planes and previews with the `image` (PNG, JPEG) and `tiff` encoders.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardImageWriter;

impl ImageWriter for StandardImageWriter {
    fn write_plane(
        &self,
        plane: &Plane16,
        output: &mut dyn Write,
        format: OutputFormat,
        options: &WriteOptions,
    ) -> Result<()> {
        debug!(width = plane.width, height = plane.height, ?format, "Encoding 16-bit plane");

        match format {
            OutputFormat::Png => {
                let buffer: ImageBuffer<Luma<u16>, Vec<u16>> =
                    ImageBuffer::from_raw(plane.width as u32, plane.height as u32, plane.data.clone())
                        .ok_or_else(|| size_mismatch(plane.width, plane.height))?;
                buffer
                    .write_with_encoder(PngEncoder::new(&mut *output))
                    .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
            }
            OutputFormat::Tiff => {
                write_tiff::<Gray16>(plane.width, plane.height, &plane.data, output, options)?;
            }
            OutputFormat::Plain16 => {
                output.write_all(&plane.to_bytes(options.endianness))?;
            }
            OutputFormat::Jpeg => {
                return Err(ConversionError::UnsupportedOutputFormat(
                    "jpeg cannot hold a 16-bit plane".to_string(),
                ));
            }
        }

        debug!("Plane encoding complete");
        Ok(())
    }

    fn write_rgb(
        &self,
        preview: &RgbPreview,
        output: &mut dyn Write,
        format: OutputFormat,
        options: &WriteOptions,
    ) -> Result<()> {
        debug!(width = preview.width, height = preview.height, ?format, "Encoding RGB preview");

        match format {
            OutputFormat::Png | OutputFormat::Jpeg => {
                let buffer = RgbImage::from_raw(
                    preview.width as u32,
                    preview.height as u32,
                    preview.data.clone(),
                )
                .ok_or_else(|| size_mismatch(preview.width, preview.height))?;
                let encoded = if format == OutputFormat::Png {
                    buffer.write_with_encoder(PngEncoder::new(&mut *output))
                } else {
                    buffer.write_with_encoder(JpegEncoder::new_with_quality(
                        &mut *output,
                        options.jpeg_quality,
                    ))
                };
                encoded.map_err(|e| ConversionError::EncodeError(e.to_string()))?;
            }
            OutputFormat::Tiff => {
                write_tiff::<RGB8>(preview.width, preview.height, &preview.data, output, options)?;
            }
            OutputFormat::Plain16 => {
                return Err(ConversionError::UnsupportedOutputFormat(
                    "plain16 holds 16-bit planes only".to_string(),
                ));
            }
        }

        debug!("Preview encoding complete");
        Ok(())
    }
}

fn size_mismatch(width: usize, height: usize) -> ConversionError {
    ConversionError::EncodeError(format!("pixel buffer does not match {width}x{height}"))
}

fn write_tiff<C>(
    width: usize,
    height: usize,
    data: &[C::Inner],
    output: &mut dyn Write,
    options: &WriteOptions,
) -> Result<()>
where
    C: ColorType,
    [C::Inner]: TiffValue,
{
    let compression = match options.compression {
        TiffCompression::None => Compression::Uncompressed,
        TiffCompression::Lzw => Compression::Lzw,
        TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
        TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
    };

    // TiffEncoder needs Seek, so encode into memory first
    let mut buffer = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = options.predictor {
            let predictor = match predictor_val {
                2 => Predictor::Horizontal,
                _ => Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        encoder
            .write_image::<C>(width as u32, height as u32, data)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
    }

    output.write_all(&buffer)?;
    Ok(())
}
