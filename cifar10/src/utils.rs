use crate::PlanarRgb;

pub use byteorder::{ByteOrder, LittleEndian};

/// Reinterprets a stored intensity as the signed byte the dataset's C tooling declares it as.
///
/// Records are always read as unsigned intensities (`0..=255`); this is the only place the signed
/// view is derived, e.g. `0xFF` becomes `-1`.
#[inline]
pub const fn signed_sample(sample: u8) -> i8 {
    i8::from_ne_bytes([sample])
}

/// Returns the number of pixels of the image, if all three planes hold exactly
/// `width * height` samples.
#[inline]
pub fn pixel_count<P: PlanarRgb + ?Sized>(image: &P) -> Option<usize> {
    let count = image.width().checked_mul(image.height())?;

    (image.red().len() == count && image.green().len() == count && image.blue().len() == count)
        .then_some(count)
}
