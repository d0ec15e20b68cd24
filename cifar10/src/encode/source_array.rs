//! C initializer list output.
//!
//! The payload is emitted in record order (red plane, green plane, blue plane), with each sample
//! printed as a signed byte, which is how the dataset's C consumers declare it (`int8_t`). Every
//! value is followed by a comma:
//!
//! ```plain
//! 59,43,50,68,98,119,-117,-111,...,
//! ```

use crate::{utils::signed_sample, CifarImage, PlanarRgb};
use core::fmt::{self, Write};

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Writes the comma separated payload of `image` to `w`.
pub fn write_source_array<P, W>(image: &P, mut w: W) -> fmt::Result
where
    P: PlanarRgb + ?Sized,
    W: Write,
{
    let samples = image
        .red()
        .iter()
        .chain(image.green())
        .chain(image.blue());

    for &sample in samples {
        write!(w, "{},", signed_sample(sample))?;
    }

    Ok(())
}

#[cfg(feature = "alloc")]
pub fn encode_source_array<P: PlanarRgb + ?Sized>(image: &P) -> String {
    // at most 5 bytes per sample: "-128,"
    let len = image.red().len() + image.green().len() + image.blue().len();
    let mut s = String::with_capacity(len * 5);
    write_source_array(image, &mut s).expect("writing to a String is infallible");
    s
}

/// A complete C header defining the image as `IMG_DATA`, headed by a comment naming where the
/// record came from:
///
/// ```plain
/// /* File: test_batch.bin, Idx: 456, Label: cat [3] */
/// #define IMG_DATA {59,43,50,...,}
/// ```
///
/// Any [`PlanarRgb`] image can be rendered; the label is given separately.
#[derive(Debug)]
pub struct SourceHeader<'a, P: ?Sized = CifarImage> {
    /// Name of the batch file the record was read from.
    pub dataset: &'a str,
    pub index: u64,
    pub label: u8,
    pub label_name: &'a str,
    pub image: &'a P,
}

impl<P: ?Sized> Clone for SourceHeader<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for SourceHeader<'_, P> {}

impl<P: PlanarRgb + ?Sized> fmt::Display for SourceHeader<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "/* File: {}, Idx: {}, Label: {} [{}] */",
            self.dataset, self.index, self.label_name, self.label
        )?;
        f.write_str("#define IMG_DATA {")?;
        write_source_array(self.image, &mut *f)?;
        f.write_str("}\n")
    }
}
