use super::{encode_to_vec, BmpError};
use crate::PlanarRgb;
use snafu::{ResultExt, Snafu};
use std::io::Write;

#[derive(Debug, Snafu)]
pub enum BmpWriteError {
    #[snafu(context(false), display("{source}"))]
    Encode { source: BmpError },
    #[snafu(display("can not write BMP image"))]
    WriteIo { source: std::io::Error },
}

/// Encodes `image` as BMP and writes it to `w`.
///
/// Nothing is written unless encoding succeeded; the whole file is then written in one
/// `write_all` call. Returns the number of bytes written.
pub fn encode<P, W>(image: &P, mut w: W) -> Result<usize, BmpWriteError>
where
    P: PlanarRgb + ?Sized,
    W: Write,
{
    let bmp = encode_to_vec(image)?;
    w.write_all(&bmp).context(WriteIoSnafu)?;

    Ok(bmp.len())
}
