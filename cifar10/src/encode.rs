//! Encoders for a decoded image. All of them read the image immutably and produce their own
//! output, so they can run independently of each other.

pub mod bmp;
pub mod rgb;
pub mod source_array;
