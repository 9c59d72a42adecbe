//! Bit unpacking of packed sensor dumps into 16-bit planes.
//!
//! Every supported packing is decoded row by row into a [`Plane16`] holding
//! the raw sample values, then linearly stretched to the full 16-bit range.
//! Rows are independent, so both passes run over disjoint row chunks on the
//! rayon pool.

use rayon::prelude::*;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::format::FormatDescriptor;
use crate::image_pipeline::raw::reader::RawImageReader;
use crate::image_pipeline::raw::types::{Encoding, Endianness, Plane16};

/// Reader for headerless packed raw8/raw10/raw12/raw16 sensor dumps.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackedRawReader;

impl RawImageReader for PackedRawReader {
    fn read_raw(&self, data: &[u8], format: &FormatDescriptor) -> Result<Plane16> {
        decode(data, format)
    }
}

/// Unpacks and rescales `data` to a full-range 16-bit plane.
pub fn decode(data: &[u8], format: &FormatDescriptor) -> Result<Plane16> {
    let mut plane = unpack(data, format)?;
    let bpp = format.bits_per_pixel();
    if bpp < 16 {
        plane
            .data
            .par_iter_mut()
            .for_each(|sample| *sample = rescale_to_16bit(*sample, bpp));
    }
    Ok(plane)
}

/// Unpacks `data` into raw sample values without any rescaling.
///
/// Fails with `TruncatedInput` before touching a sample when `data` is
/// shorter than `header + height * stride`.
pub fn unpack(data: &[u8], format: &FormatDescriptor) -> Result<Plane16> {
    let required = format.required_len();
    if data.len() < required {
        return Err(ConversionError::TruncatedInput {
            expected: required,
            actual: data.len(),
        });
    }

    debug!(
        bytes = data.len(),
        width = format.width(),
        height = format.height(),
        stride = format.stride(),
        encoding = %format.encoding(),
        "Unpacking raw image"
    );

    let width = format.width();
    let left = format.left_pad_bytes();
    let packed_len = format.packed_row_bytes();
    let encoding = format.encoding();
    let endianness = format.endianness();
    let body = &data[format.header_bytes()..required];

    let mut plane = Plane16::new(width, format.height());
    plane
        .data
        .par_chunks_mut(width)
        .zip(body.par_chunks(format.stride()))
        .try_for_each(|(dst, row)| {
            let packed = row
                .get(left..left + packed_len)
                .ok_or(ConversionError::TruncatedInput {
                    expected: required,
                    actual: data.len(),
                })?;
            unpack_row(encoding, endianness, packed, dst);
            Ok::<_, ConversionError>(())
        })?;

    Ok(plane)
}

/// Stretches a `bpp`-bit sample to 0..=65535, rounding to nearest.
///
/// Values above `2^bpp - 1` saturate to 65535.
pub fn rescale_to_16bit(sample: u16, bpp: u32) -> u16 {
    if bpp >= 16 {
        return sample;
    }
    let max = (1u32 << bpp) - 1;
    let s = u32::from(sample).min(max);
    // max is odd, so s * 65535 / max never lands exactly on .5
    ((s * 65535 + max / 2) / max) as u16
}

fn unpack_row(encoding: Encoding, endianness: Endianness, src: &[u8], dst: &mut [u16]) {
    match encoding {
        Encoding::Raw8 => unpack_raw8_row(src, dst),
        Encoding::Raw10 => unpack_raw10_row(src, dst),
        Encoding::Raw12 => unpack_raw12_row(src, dst),
        Encoding::Raw16 => unpack_raw16_row(src, dst, endianness),
    }
}

fn unpack_raw8_row(src: &[u8], dst: &mut [u16]) {
    for (d, &b) in dst.iter_mut().zip(src) {
        *d = u16::from(b);
    }
}

/// 4 samples in 5 bytes: four high bytes, then one byte of 2-bit lows with
/// sample 0 in bits 1:0 up to sample 3 in bits 7:6. A trailing partial group
/// of n samples is n high bytes followed by its low-bits byte.
fn unpack_raw10_row(src: &[u8], dst: &mut [u16]) {
    let mut groups = dst.chunks_exact_mut(4);
    let packed = src.chunks_exact(5);
    let tail_src = packed.remainder();
    for (px, bytes) in (&mut groups).zip(packed) {
        let lsbs = u16::from(bytes[4]);
        for (i, (d, &msb)) in px.iter_mut().zip(&bytes[..4]).enumerate() {
            *d = (u16::from(msb) << 2) | ((lsbs >> (2 * i)) & 0x3);
        }
    }

    let tail_dst = groups.into_remainder();
    if let Some((&lsbs, msbs)) = tail_src.split_last() {
        let lsbs = u16::from(lsbs);
        for (i, (d, &msb)) in tail_dst.iter_mut().zip(msbs).enumerate() {
            *d = (u16::from(msb) << 2) | ((lsbs >> (2 * i)) & 0x3);
        }
    }
}

/// 2 samples in 3 bytes: two high bytes, then sample 0's low nibble in
/// bits 3:0 and sample 1's in bits 7:4.
fn unpack_raw12_row(src: &[u8], dst: &mut [u16]) {
    let mut pairs = dst.chunks_exact_mut(2);
    let packed = src.chunks_exact(3);
    let tail_src = packed.remainder();
    for (px, bytes) in (&mut pairs).zip(packed) {
        let lows = u16::from(bytes[2]);
        px[0] = (u16::from(bytes[0]) << 4) | (lows & 0xF);
        px[1] = (u16::from(bytes[1]) << 4) | (lows >> 4);
    }

    if let ([d], [hi, lo]) = (pairs.into_remainder(), tail_src) {
        *d = (u16::from(*hi) << 4) | (u16::from(*lo) & 0xF);
    }
}

fn unpack_raw16_row(src: &[u8], dst: &mut [u16], endianness: Endianness) {
    for (d, bytes) in dst.iter_mut().zip(src.chunks_exact(2)) {
        let pair = [bytes[0], bytes[1]];
        *d = match endianness {
            Endianness::Little => u16::from_le_bytes(pair),
            Endianness::Big => u16::from_be_bytes(pair),
        };
    }
}
