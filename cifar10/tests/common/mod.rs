#![allow(dead_code)]

use cifar10::consts::{PAYLOAD_LEN, RECORD_LEN};

/// Builds a raw record whose payload byte `i` (counted from the start of the red plane) is
/// `sample(i)`.
pub fn record(label: u8, sample: impl Fn(usize) -> u8) -> Vec<u8> {
    let mut record = Vec::with_capacity(RECORD_LEN);
    record.push(label);
    record.extend((0..PAYLOAD_LEN).map(sample));
    record
}

/// A record where every byte differs from its neighbours and every plane differs from the
/// others, and which covers the whole `0..=255` range.
pub fn patterned_record(label: u8) -> Vec<u8> {
    record(label, |i| (i * 7 + (i / 1024) * 85) as u8)
}
