//! 24-bit uncompressed BMP output.
//!
//! # Layout
//!
//! ```plain
//! .- file header (14 bytes) ------------------------------------.
//! | 0..2 "BM" | 2..6 file size | 6..10 reserved | 10..14 offset  |
//! `-------------------------------------------------------------`
//! .- info header (40 bytes) ------------------------------------.
//! | 0..4 header size (40) | 4..8 width (i32) | 8..12 height (i32)|
//! | 12..14 planes (1)     | 14..16 bits per pixel (24)           |
//! | 16..40 compression, image size, resolution, palette: all 0   |
//! `-------------------------------------------------------------`
//! .- pixel rows ------------------------------------------------.
//! | bottom row first, `b g r` per pixel, each row zero-padded    |
//! | to a multiple of 4 bytes                                     |
//! `-------------------------------------------------------------`
//! ```
//!
//! All multi-byte fields are little-endian. The file size field covers the padded rows.

use crate::{
    utils::{pixel_count, ByteOrder, LittleEndian},
    PlanarRgb,
};
use itertools::izip;
use snafu::{ensure, OptionExt, Snafu};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "std")]
mod std_api;
#[cfg(feature = "std")]
pub use std_api::*;

pub const FILE_HEADER_LEN: usize = 14;
pub const INFO_HEADER_LEN: usize = 40;
/// Combined header size, which is also the offset of the pixel data.
pub const HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;
pub const BITS_PER_PIXEL: u16 = 24;
pub const MAGIC: &[u8; 2] = b"BM";

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(module)]
pub enum BmpError {
    #[snafu(display("can not allocate {size} bytes for the BMP image"))]
    EncodingFailed { size: usize },
    #[snafu(display("output buffer holds {len} bytes, but the BMP image needs {needed}"))]
    OutputTooSmall { len: usize, needed: usize },
    #[snafu(display("{width}x{height} image does not match the length of its planes"))]
    InvalidDimensions { width: usize, height: usize },
    #[snafu(display("{width}x{height} image can not be stored as BMP"))]
    UnsupportedDimensions { width: usize, height: usize },
}

/// Zero bytes appended to every row of `width` pixels to keep rows 4-byte aligned.
#[inline]
pub const fn row_padding(width: usize) -> usize {
    (4 - (width * 3) % 4) % 4
}

/// Size of one stored row, padding included.
#[inline]
pub const fn row_stride(width: usize) -> usize {
    width * 3 + row_padding(width)
}

/// Size of the complete file for an image of the given dimensions.
#[inline]
pub const fn encoded_size(width: usize, height: usize) -> usize {
    HEADER_LEN + height * row_stride(width)
}

/// Validated dimensions of a BMP image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    width: usize,
    height: usize,
    file_size: u32,
}

impl BmpHeader {
    /// Fails for empty images, dimensions beyond `i32::MAX` and files larger than 4 GiB.
    pub fn new(width: usize, height: usize) -> Result<Self, BmpError> {
        let file_size = Self::checked_file_size(width, height)
            .context(bmp_error::UnsupportedDimensionsSnafu { width, height })?;

        Ok(Self {
            width,
            height,
            file_size,
        })
    }

    /// Header for `image`, after checking its planes against its dimensions.
    pub fn for_image<P: PlanarRgb + ?Sized>(image: &P) -> Result<Self, BmpError> {
        let (width, height) = (image.width(), image.height());
        ensure!(
            pixel_count(image).is_some(),
            bmp_error::InvalidDimensionsSnafu { width, height }
        );

        Self::new(width, height)
    }

    fn checked_file_size(width: usize, height: usize) -> Option<u32> {
        if width == 0 || height == 0 {
            return None;
        }
        i32::try_from(width).ok()?;
        i32::try_from(height).ok()?;

        let stride = width.checked_mul(3)?.checked_add(row_padding(width))?;
        let size = height.checked_mul(stride)?.checked_add(HEADER_LEN)?;
        u32::try_from(size).ok()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn file_size(&self) -> usize {
        self.file_size as usize
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut header = [0; HEADER_LEN];
        let (file, info) = header.split_at_mut(FILE_HEADER_LEN);

        file[0..2].copy_from_slice(MAGIC);
        LittleEndian::write_u32(&mut file[2..6], self.file_size);
        // 6..10: reserved
        LittleEndian::write_u32(&mut file[10..14], HEADER_LEN as u32);

        // both were checked against i32::MAX in `new`
        LittleEndian::write_u32(&mut info[0..4], INFO_HEADER_LEN as u32);
        LittleEndian::write_i32(&mut info[4..8], self.width as i32);
        LittleEndian::write_i32(&mut info[8..12], self.height as i32);
        LittleEndian::write_u16(&mut info[12..14], 1);
        LittleEndian::write_u16(&mut info[14..16], BITS_PER_PIXEL);
        // 16..40: BI_RGB, no explicit image size, resolution or palette

        header
    }
}

/// Encodes `image` as BMP into the beginning of `out`.
///
/// Returns the number of bytes written, see [`encoded_size`].
pub fn encode_to_slice<P: PlanarRgb + ?Sized>(
    image: &P,
    out: &mut [u8],
) -> Result<usize, BmpError> {
    let header = BmpHeader::for_image(image)?;
    let needed = header.file_size();
    let len = out.len();
    let out = out
        .get_mut(..needed)
        .context(bmp_error::OutputTooSmallSnafu { len, needed })?;

    let (header_out, rows) = out.split_at_mut(HEADER_LEN);
    header_out.copy_from_slice(&header.to_bytes());
    write_rows(image, rows);

    Ok(needed)
}

/// Encodes `image` as BMP into a freshly allocated buffer.
///
/// Fails with [`BmpError::EncodingFailed`] if the buffer can not be allocated.
#[cfg(feature = "alloc")]
pub fn encode_to_vec<P: PlanarRgb + ?Sized>(image: &P) -> Result<Vec<u8>, BmpError> {
    let size = BmpHeader::for_image(image)?.file_size();

    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .ok()
        .context(bmp_error::EncodingFailedSnafu { size })?;
    buf.resize(size, 0);

    encode_to_slice(image, &mut buf)?;
    Ok(buf)
}

/// Writes the pixel rows bottom-up. `out` must hold exactly `height * row_stride(width)` bytes
/// and the planes must match the dimensions.
fn write_rows<P: PlanarRgb + ?Sized>(image: &P, out: &mut [u8]) {
    let (width, height) = (image.width(), image.height());
    let (red, green, blue) = (image.red(), image.green(), image.blue());

    for (dst_row, row) in out.chunks_exact_mut(row_stride(width)).enumerate() {
        let src_row = (height - 1) - dst_row;
        let src = src_row * width..(src_row + 1) * width;
        let (pixels, padding) = row.split_at_mut(width * 3);

        for (pixel, &r, &g, &b) in izip!(
            pixels.chunks_exact_mut(3),
            &red[src.clone()],
            &green[src.clone()],
            &blue[src]
        ) {
            pixel.copy_from_slice(&[b, g, r]);
        }

        padding.fill(0);
    }
}
