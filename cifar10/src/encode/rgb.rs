//! Planar to interleaved conversion: every pixel becomes three consecutive `r, g, b` bytes, rows
//! stay top to bottom.

use crate::{consts::PAYLOAD_LEN, utils::pixel_count, CifarImage, PlanarRgb};
use itertools::izip;
use snafu::{OptionExt, Snafu};

#[cfg(feature = "alloc")]
use alloc::{vec, vec::Vec};

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(module)]
pub enum InterleaveError {
    #[snafu(display("{width}x{height} image does not match the length of its planes"))]
    InvalidDimensions { width: usize, height: usize },
    #[snafu(display("output buffer holds {len} bytes, but {needed} are needed"))]
    OutputTooSmall { len: usize, needed: usize },
}

/// Interleaves the planes into `out`.
///
/// Returns the number of bytes written, always `3 * width * height`.
pub fn interleave_to_slice<P: PlanarRgb + ?Sized>(
    image: &P,
    out: &mut [u8],
) -> Result<usize, InterleaveError> {
    let needed = interleaved_len(image)?;
    let len = out.len();
    let out = out
        .get_mut(..needed)
        .context(interleave_error::OutputTooSmallSnafu { len, needed })?;

    for (pixel, &r, &g, &b) in izip!(
        out.chunks_exact_mut(3),
        image.red(),
        image.green(),
        image.blue()
    ) {
        pixel.copy_from_slice(&[r, g, b]);
    }

    Ok(needed)
}

#[cfg(feature = "alloc")]
pub fn interleave_to_vec<P: PlanarRgb + ?Sized>(image: &P) -> Result<Vec<u8>, InterleaveError> {
    let mut out = vec![0; interleaved_len(image)?];
    interleave_to_slice(image, &mut out)?;
    Ok(out)
}

fn interleaved_len<P: PlanarRgb + ?Sized>(image: &P) -> Result<usize, InterleaveError> {
    pixel_count(image)
        .and_then(|count| count.checked_mul(3))
        .context(interleave_error::InvalidDimensionsSnafu {
            width: image.width(),
            height: image.height(),
        })
}

impl CifarImage {
    /// The image as `RGBRGB...` bytes.
    pub fn to_interleaved_rgb(&self) -> [u8; PAYLOAD_LEN] {
        let mut out = [0; PAYLOAD_LEN];
        let [red, green, blue] = self.planes();

        for (pixel, &r, &g, &b) in izip!(out.chunks_exact_mut(3), red, green, blue) {
            pixel.copy_from_slice(&[r, g, b]);
        }

        out
    }

    #[cfg(feature = "std")]
    pub fn write_interleaved_rgb<W: std::io::Write>(&self, mut w: W) -> std::io::Result<()> {
        w.write_all(&self.to_interleaved_rgb())
    }
}
