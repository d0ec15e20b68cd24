use crate::{consts::*, PlanarRgb};
use snafu::{ensure, Snafu};

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(module)]
pub enum DecodeError {
    #[snafu(display("malformed record: expected {} bytes, got {len}", RECORD_LEN))]
    MalformedRecord { len: usize },
    #[snafu(display("label not in range: {label}"))]
    LabelOutOfRange { label: u8 },
}

/// Byte offset of record `index` inside a batch file, or `None` if it does not fit in a `u64`.
#[inline]
pub const fn record_offset(index: u64) -> Option<u64> {
    index.checked_mul(RECORD_LEN as u64)
}

/// One decoded CIFAR-10 record: the label and the red, green and blue planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CifarImage {
    label: u8,
    planes: [[u8; PLANE_SIZE]; 3],
}

impl CifarImage {
    /// Decodes a raw record.
    ///
    /// The slice must be exactly [`RECORD_LEN`] bytes long and start with a label below
    /// [`LABEL_COUNT`]. Plane samples are copied out as unsigned intensities.
    pub fn decode(record: &[u8]) -> Result<Self, DecodeError> {
        ensure!(
            record.len() == RECORD_LEN,
            decode_error::MalformedRecordSnafu { len: record.len() }
        );

        let (label, payload) = (record[0], &record[1..]);

        let mut planes = [[0; PLANE_SIZE]; 3];
        for (plane, samples) in planes.iter_mut().zip(payload.chunks_exact(PLANE_SIZE)) {
            plane.copy_from_slice(samples);
        }

        Self::from_planes(label, planes)
    }

    #[inline]
    pub fn decode_from_array(record: &[u8; RECORD_LEN]) -> Result<Self, DecodeError> {
        Self::decode(record)
    }

    /// Builds an image from its parts, applying the same label check as [`decode`](Self::decode).
    pub fn from_planes(label: u8, planes: [[u8; PLANE_SIZE]; 3]) -> Result<Self, DecodeError> {
        ensure!(
            usize::from(label) < LABEL_COUNT,
            decode_error::LabelOutOfRangeSnafu { label }
        );

        Ok(Self { label, planes })
    }

    #[inline]
    pub fn label(&self) -> u8 {
        self.label
    }

    /// The red, green and blue planes, in that order.
    #[inline]
    pub fn planes(&self) -> &[[u8; PLANE_SIZE]; 3] {
        &self.planes
    }

    /// Returns the `[r, g, b]` intensities at the given position, with row 0 at the top.
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; 3]> {
        if row >= HEIGHT || col >= WIDTH {
            return None;
        }

        let i = row * WIDTH + col;
        let [r, g, b] = &self.planes;
        Some([r[i], g[i], b[i]])
    }

    /// The payload bytes in record order: all red, then all green, then all blue samples.
    pub fn planar_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.planes.iter().flatten().copied()
    }

    /// Re-assembles the raw record this image was decoded from.
    pub fn to_record(&self) -> [u8; RECORD_LEN] {
        let mut record = [0; RECORD_LEN];
        record[0] = self.label;
        for (dst, src) in record[1..].iter_mut().zip(self.planar_bytes()) {
            *dst = src;
        }
        record
    }
}

impl PlanarRgb for CifarImage {
    #[inline]
    fn width(&self) -> usize {
        WIDTH
    }

    #[inline]
    fn height(&self) -> usize {
        HEIGHT
    }

    #[inline]
    fn red(&self) -> &[u8] {
        &self.planes[0]
    }

    #[inline]
    fn green(&self) -> &[u8] {
        &self.planes[1]
    }

    #[inline]
    fn blue(&self) -> &[u8] {
        &self.planes[2]
    }
}
