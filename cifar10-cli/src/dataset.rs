use crate::error::{CliError, OpenSnafu, ReadRecordSnafu, ShortReadSnafu};
use cifar10::{
    consts::{RECORDS_PER_BATCH, RECORD_LEN},
    decode::record_offset,
};
use snafu::{OptionExt, ResultExt};
use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

/// Picks a record index in `1..=RECORDS_PER_BATCH`, seeded from the clock and the process id.
pub fn random_index() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let seed = nanos ^ u64::from(std::process::id()).rotate_left(32);

    // splitmix64 finalizer, so consecutive runs don't pick neighbouring records
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;

    z % RECORDS_PER_BATCH + 1
}

/// Reads the raw bytes of record `index` from a batch file.
pub fn read_record(path: &Path, index: u64) -> Result<[u8; RECORD_LEN], CliError> {
    let mut file = File::open(path).context(OpenSnafu { path })?;
    let len = file.metadata().context(OpenSnafu { path })?.len();

    let offset = record_offset(index)
        .filter(|offset| {
            offset
                .checked_add(RECORD_LEN as u64)
                .map_or(false, |end| end <= len)
        })
        .context(ShortReadSnafu { path, index, len })?;
    log::debug!(
        "{}: {len} bytes, record {index} at offset {offset}",
        path.display()
    );

    let mut record = [0; RECORD_LEN];
    file.seek(SeekFrom::Start(offset))
        .and_then(|_| file.read_exact(&mut record))
        .context(ReadRecordSnafu { path, index })?;

    Ok(record)
}
