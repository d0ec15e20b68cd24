//! Decoder for single records of the [CIFAR-10](https://www.cs.toronto.edu/~kriz/cifar.html)
//! binary dataset, plus encoders that re-emit the decoded image in three formats.
//!
//! # Record layout
//!
//! A CIFAR-10 batch file is a flat sequence of fixed-size records, 3073 bytes each:
//!
//! ```plain
//! .- record ---------------------------------------------------------.
//! | Byte[0] | Byte[1..1025]  | Byte[1025..2049] | Byte[2049..3073]    |
//! |---------+----------------+------------------+---------------------|
//! |  label  |   red plane    |   green plane    |   blue plane        |
//! `------------------------------------------------------------------`
//! ```
//!
//! - label: class index `0..=9`, anything else marks a corrupt record
//! - each plane holds 1024 intensities of a 32x32 image in row-major order, so the first 32
//!   bytes of the red plane are the red values of the top row
//!
//! Record `n` of a batch starts at byte [`record_offset(n)`](decode::record_offset).
//!
//! # Outputs
//!
//! - [`encode::source_array`]: the payload as a C initializer list of signed bytes, in record
//!   order, for embedding into firmware (e.g. the ARM CMSIS-NN CIFAR-10 example).
//! - [`encode::rgb`]: the planes interleaved into plain `RGBRGB...` bytes.
//! - [`encode::bmp`]: a 24-bit uncompressed BMP file.
//!
//! The decoder and the slice based encoders work without an allocator. The `alloc` feature adds
//! `Vec`/`String` returning variants, `std` (default) adds `std::io::Write` based ones.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod decode;
pub mod encode;
pub mod labels;
pub mod utils;

use utils::pixel_count;

pub use decode::{CifarImage, DecodeError};
pub use labels::{ClassLabels, CIFAR10_LABELS};

pub mod consts {
    /// Width of a CIFAR-10 image in pixels.
    pub const WIDTH: usize = 32;
    /// Height of a CIFAR-10 image in pixels.
    pub const HEIGHT: usize = 32;
    /// Number of samples in one color plane.
    pub const PLANE_SIZE: usize = WIDTH * HEIGHT;
    /// Number of pixel bytes in a record (all three planes).
    pub const PAYLOAD_LEN: usize = 3 * PLANE_SIZE;
    /// Size of one record: the label byte followed by the payload.
    pub const RECORD_LEN: usize = 1 + PAYLOAD_LEN;
    /// Number of classes. Label bytes at or above this value are invalid.
    pub const LABEL_COUNT: usize = 10;
    /// Number of records in each of the dataset's batch files.
    pub const RECORDS_PER_BATCH: u64 = 10_000;
}

/// An image stored as three separate, equally sized color planes.
///
/// Each plane must hold exactly `width * height` samples in row-major order, top row first.
/// Encoders reject implementations that violate this.
pub trait PlanarRgb {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn red(&self) -> &[u8];
    fn green(&self) -> &[u8];
    fn blue(&self) -> &[u8];
}

/// Borrowed planar image of arbitrary dimensions.
#[derive(Debug, Clone, Copy)]
pub struct PlanarImage<'a> {
    width: usize,
    height: usize,
    red: &'a [u8],
    green: &'a [u8],
    blue: &'a [u8],
}

impl<'a> PlanarImage<'a> {
    /// Returns `None` if any plane does not hold exactly `width * height` samples.
    pub fn new(
        width: usize,
        height: usize,
        red: &'a [u8],
        green: &'a [u8],
        blue: &'a [u8],
    ) -> Option<Self> {
        let image = Self {
            width,
            height,
            red,
            green,
            blue,
        };
        pixel_count(&image).map(|_| image)
    }
}

impl PlanarRgb for PlanarImage<'_> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn red(&self) -> &[u8] {
        self.red
    }

    #[inline]
    fn green(&self) -> &[u8] {
        self.green
    }

    #[inline]
    fn blue(&self) -> &[u8] {
        self.blue
    }
}
