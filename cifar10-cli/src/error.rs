use cifar10::{encode::bmp::BmpError, DecodeError};
use snafu::Snafu;
use std::{io, path::PathBuf};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    #[snafu(display("can not open file {}: {source}", path.display()))]
    Open { path: PathBuf, source: io::Error },
    #[snafu(display("can not read record {index} from {}: {source}", path.display()))]
    ReadRecord {
        path: PathBuf,
        index: u64,
        source: io::Error,
    },
    #[snafu(display(
        "record {index} is past the end of {} ({len} bytes)",
        path.display()
    ))]
    ShortRead { path: PathBuf, index: u64, len: u64 },
    #[snafu(display("record {index}: {source}"))]
    Decode { index: u64, source: DecodeError },
    #[snafu(display("label {label} has no class name"))]
    UnnamedLabel { label: u8 },
    #[snafu(display("can not encode BMP file {}: {source}", path.display()))]
    EncodeBmp { path: PathBuf, source: BmpError },
    #[snafu(display("can not write data to include file: {}: {source}", path.display()))]
    WriteHeader { path: PathBuf, source: io::Error },
    #[snafu(display("can not write data to RGB file: {}: {source}", path.display()))]
    WriteRgb { path: PathBuf, source: io::Error },
    #[snafu(display("can not write data to BMP file: {}: {source}", path.display()))]
    WriteBmp { path: PathBuf, source: io::Error },
}

impl CliError {
    /// Process exit status: 1 for input errors, 2 for invalid records, 3 to 6 for output failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Open { .. } | CliError::ReadRecord { .. } | CliError::ShortRead { .. } => 1,
            CliError::Decode { .. } | CliError::UnnamedLabel { .. } => 2,
            CliError::WriteHeader { .. } => 3,
            CliError::WriteRgb { .. } => 4,
            CliError::EncodeBmp { .. } => 5,
            CliError::WriteBmp { .. } => 6,
        }
    }
}
