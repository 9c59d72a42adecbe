//! Nearest-neighbour bayer channel splitting
//!
//! Each 2x2 cell of the mosaic contributes one sample to each of four
//! half-resolution planes. Which plane is R, Gr, Gb or B depends only on the
//! bayer order; the geometry is the same for all of them.

use tracing::debug;

use crate::image_pipeline::debayer::types::{BayerOrder, ChannelSet};
use crate::image_pipeline::raw::types::Plane16;

/// Splits `plane` into its four bayer channels, each `width / 2` by
/// `height / 2`. An odd trailing row or column is dropped.
pub fn split(plane: &Plane16, order: BayerOrder) -> ChannelSet {
    debug!(
        width = plane.width,
        height = plane.height,
        bayer_order = %order,
        "Splitting bayer channels"
    );

    let mut channels = ChannelSet::default();
    for (i, channel) in order.layout().into_iter().enumerate() {
        *channels.channel_mut(channel) = quadrant(plane, i / 2, i % 2);
    }
    channels
}

/// Samples at rows `row_off, row_off + 2, ...` and columns `col_off, col_off + 2, ...`.
fn quadrant(plane: &Plane16, row_off: usize, col_off: usize) -> Plane16 {
    let width = plane.width / 2;
    let height = plane.height / 2;
    if width == 0 || height == 0 {
        return Plane16::new(width, height);
    }

    let data = plane
        .data
        .chunks_exact(plane.width)
        .skip(row_off)
        .step_by(2)
        .take(height)
        .flat_map(|row| row.iter().skip(col_off).step_by(2).take(width).copied())
        .collect();

    Plane16 {
        width,
        height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::debayer::types::Channel;

    const ORDERS: [BayerOrder; 4] = [
        BayerOrder::Grbg,
        BayerOrder::Rggb,
        BayerOrder::Bggr,
        BayerOrder::Gbrg,
    ];

    fn sequential(width: usize, height: usize) -> Plane16 {
        Plane16::from_samples(width, height, (0..(width * height) as u16).collect()).unwrap()
    }

    #[test]
    fn test_rggb_quadrant_assignment() {
        let plane = sequential(4, 4);
        let channels = split(&plane, BayerOrder::Rggb);

        assert_eq!(channels.r.data, vec![0, 2, 8, 10]);
        assert_eq!(channels.gr.data, vec![1, 3, 9, 11]);
        assert_eq!(channels.gb.data, vec![4, 6, 12, 14]);
        assert_eq!(channels.b.data, vec![5, 7, 13, 15]);
    }

    #[test]
    fn test_top_left_sample_per_order() {
        // 4x4 mosaic; each channel's first sample is its position in the top-left cell
        let plane = sequential(4, 4);
        let cases = [
            (BayerOrder::Grbg, [1, 0, 5, 4]),
            (BayerOrder::Rggb, [0, 1, 4, 5]),
            (BayerOrder::Bggr, [5, 4, 1, 0]),
            (BayerOrder::Gbrg, [4, 5, 0, 1]),
        ];
        for (order, [r, gr, gb, b]) in cases {
            let channels = split(&plane, order);
            assert_eq!(channels.r.data[0], r, "{order}");
            assert_eq!(channels.gr.data[0], gr, "{order}");
            assert_eq!(channels.gb.data[0], gb, "{order}");
            assert_eq!(channels.b.data[0], b, "{order}");
        }
    }

    #[test]
    fn test_every_channel_assigned() {
        let plane = sequential(6, 4);
        for order in ORDERS {
            let channels = split(&plane, order);
            for (channel, p) in channels.iter() {
                assert_eq!((p.width, p.height), (3, 2), "{order} {channel}");
            }
        }
    }

    #[test]
    fn test_geometry_independent_of_order() {
        for (width, height) in [(4, 4), (5, 7), (8, 2), (1, 6)] {
            let plane = sequential(width, height);
            for order in ORDERS {
                let channels = split(&plane, order);
                for (channel, p) in channels.iter() {
                    assert_eq!((p.height, p.width), (height / 2, width / 2), "{order} {channel}");
                    assert_eq!(p.data.len(), (height / 2) * (width / 2));
                }
            }
        }
    }

    #[test]
    fn test_odd_trailing_row_and_column_dropped() {
        let plane = sequential(5, 3);
        let channels = split(&plane, BayerOrder::Bggr);
        // rows 0..2 only, columns 0..4 only
        assert_eq!(channels.b.data, vec![0, 2]);
        assert_eq!(channels.gb.data, vec![1, 3]);
        assert_eq!(channels.gr.data, vec![5, 7]);
        assert_eq!(channels.r.data, vec![6, 8]);
    }

    #[test]
    fn test_iter_order() {
        let channels = split(&sequential(2, 2), BayerOrder::Grbg);
        let names: Vec<Channel> = channels.iter().map(|(c, _)| c).collect();
        assert_eq!(names, vec![Channel::R, Channel::Gr, Channel::Gb, Channel::B]);
        assert_eq!(channels.r.data, vec![1]);
        assert_eq!(channels.gr.data, vec![0]);
    }
}
