mod common;

use cifar10::{
    consts::{LABEL_COUNT, PLANE_SIZE, RECORD_LEN, WIDTH},
    decode::record_offset,
    CifarImage, ClassLabels, DecodeError, PlanarRgb, CIFAR10_LABELS,
};
use common::{patterned_record, record};
use rstest::rstest;

#[test]
fn payload_roundtrip() {
    let raw = patterned_record(4);
    let image = CifarImage::decode(&raw).unwrap();

    let payload = image.planar_bytes().collect::<Vec<_>>();
    assert_eq!(payload, raw[1..]);
    assert_eq!(image.to_record()[..], raw[..]);
}

#[test]
fn planes_are_split_at_plane_boundaries() {
    let raw = patterned_record(0);
    let image = CifarImage::decode(&raw).unwrap();

    assert_eq!(image.red(), &raw[1..1 + PLANE_SIZE]);
    assert_eq!(image.green(), &raw[1 + PLANE_SIZE..1 + 2 * PLANE_SIZE]);
    assert_eq!(image.blue(), &raw[1 + 2 * PLANE_SIZE..RECORD_LEN]);
    assert_eq!(image.width() * image.height(), PLANE_SIZE);
}

#[rstest]
fn valid_labels_decode(#[values(0, 1, 2, 3, 4, 5, 6, 7, 8, 9)] label: u8) {
    let image = CifarImage::decode(&patterned_record(label)).unwrap();
    assert_eq!(image.label(), label);
}

#[rstest]
#[case(10)]
#[case(11)]
#[case(127)]
#[case(128)]
#[case(255)]
fn label_out_of_range(#[case] label: u8) {
    assert_eq!(
        CifarImage::decode(&patterned_record(label)),
        Err(DecodeError::LabelOutOfRange { label })
    );
}

#[test]
fn every_label_byte_is_checked() {
    for label in 0..=u8::MAX {
        let result = CifarImage::decode(&record(label, |_| 0));
        if usize::from(label) < LABEL_COUNT {
            assert!(result.is_ok(), "label {label} rejected");
        } else {
            assert_eq!(result, Err(DecodeError::LabelOutOfRange { label }));
        }
    }
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(RECORD_LEN - 1)]
#[case(RECORD_LEN + 1)]
#[case(2 * RECORD_LEN)]
fn malformed_lengths(#[case] len: usize) {
    let raw = vec![3; len];
    assert_eq!(
        CifarImage::decode(&raw),
        Err(DecodeError::MalformedRecord { len })
    );
}

#[test]
fn missing_label_byte_is_malformed() {
    // label byte dropped: the remaining 3072 bytes must not be taken for a record
    let raw = patterned_record(3);
    assert_eq!(
        CifarImage::decode(&raw[1..]),
        Err(DecodeError::MalformedRecord { len: 3072 })
    );
}

#[test]
fn length_is_checked_before_label() {
    assert_eq!(
        CifarImage::decode(&[200; 10]),
        Err(DecodeError::MalformedRecord { len: 10 })
    );
}

#[test]
fn high_intensities_stay_unsigned() {
    let image = CifarImage::decode(&record(1, |i| if i % 2 == 0 { 0xFF } else { 0x80 })).unwrap();

    assert_eq!(image.pixel(0, 0), Some([255, 255, 255]));
    assert_eq!(image.pixel(0, 1), Some([128, 128, 128]));
}

#[test]
fn pixels_are_row_major() {
    let raw = patterned_record(2);
    let image = CifarImage::decode(&raw).unwrap();

    for (row, col) in [(0, 0), (0, 31), (1, 0), (17, 9), (31, 31)] {
        let i = row * WIDTH + col;
        assert_eq!(
            image.pixel(row, col),
            Some([
                raw[1 + i],
                raw[1 + PLANE_SIZE + i],
                raw[1 + 2 * PLANE_SIZE + i]
            ]),
            "pixel ({row}, {col})"
        );
    }

    assert_eq!(image.pixel(32, 0), None);
    assert_eq!(image.pixel(0, 32), None);
}

#[test]
fn from_planes_checks_label() {
    let planes = [[1; PLANE_SIZE], [2; PLANE_SIZE], [3; PLANE_SIZE]];

    let image = CifarImage::from_planes(9, planes).unwrap();
    assert_eq!(image.pixel(5, 5), Some([1, 2, 3]));
    assert_eq!(
        CifarImage::from_planes(10, planes),
        Err(DecodeError::LabelOutOfRange { label: 10 })
    );
}

#[test]
fn record_offsets() {
    assert_eq!(record_offset(0), Some(0));
    assert_eq!(record_offset(1), Some(3073));
    assert_eq!(record_offset(456), Some(456 * 3073));
    assert_eq!(record_offset(u64::MAX), None);
}

#[test]
fn cifar10_class_names() {
    let image = CifarImage::decode(&record(3, |_| 0xFF)).unwrap();

    assert_eq!(CIFAR10_LABELS.len(), LABEL_COUNT);
    assert_eq!(CIFAR10_LABELS.name_of(&image), Some("cat"));
    assert_eq!(CIFAR10_LABELS.name(0), Some("airplane"));
    assert_eq!(CIFAR10_LABELS.name(9), Some("truck"));
    assert_eq!(CIFAR10_LABELS.name(10), None);
    assert_eq!(ClassLabels::default(), CIFAR10_LABELS);
}

#[test]
fn injected_class_names() {
    let names = ["zero", "one"];
    let labels = ClassLabels::new(&names);
    let image = CifarImage::decode(&record(1, |_| 0)).unwrap();

    assert_eq!(labels.name_of(&image), Some("one"));
    assert_eq!(labels.name(2), None);
    assert_eq!(labels.iter().collect::<Vec<_>>(), names);
}

#[test]
fn error_messages() {
    assert_eq!(
        DecodeError::LabelOutOfRange { label: 12 }.to_string(),
        "label not in range: 12"
    );
    assert_eq!(
        DecodeError::MalformedRecord { len: 3072 }.to_string(),
        "malformed record: expected 3073 bytes, got 3072"
    );
}
