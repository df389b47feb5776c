use crate::buffer::{ByteReader, ByteWriter};
use crate::ErrorKind;

#[test]
fn reads_big_endian() {
    let data = [
        0x01, 0x02, 0xff, 0xfe, 0x00, 0x00, 0x01, 0x00, 0x3f, 0x80, 0x00, 0x00,
    ];
    let mut r = ByteReader::new(&data);

    assert_eq!(r.read_u16().unwrap(), 0x0102);
    assert_eq!(r.read_i16().unwrap(), -2);
    assert_eq!(r.read_i32().unwrap(), 256);
    assert_eq!(r.read_f32().unwrap(), 1.0);
    assert!(r.is_empty());
}

#[test]
fn short_read_is_truncated_and_does_not_advance() {
    let data = [0, 0, 0];
    let mut r = ByteReader::new(&data);

    let e = r.read_i32().unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Truncated);
    assert_eq!(r.position(), 0);
    assert_eq!(r.read_u8().unwrap(), 0);
}

#[test]
fn borrowed_slices_outlive_reader() {
    let data = b"\x00\x03abcrest".to_vec();
    let s = {
        let mut r = ByteReader::new(&data);
        r.read_u16_prefixed().unwrap()
    };
    assert_eq!(s, b"abc");
}

#[test]
fn negative_length_is_malformed() {
    let data = (-1i32).to_be_bytes();
    let e = ByteReader::new(&data).read_len().unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Malformed);
}

#[test]
fn seek_past_end_is_truncated() {
    let data = [1, 2, 3];
    let mut r = ByteReader::new(&data);

    assert!(r.seek(3).is_ok());
    assert_eq!(r.seek(4).unwrap_err().kind(), ErrorKind::Truncated);
    r.seek(1).unwrap();
    assert_eq!(r.read_u8().unwrap(), 2);
}

#[test]
fn writes_big_endian() {
    let mut w = ByteWriter::new();
    w.write_u16(0x0102).unwrap();
    w.write_i32(-1).unwrap();
    w.write_f64(1.0).unwrap();

    assert_eq!(
        w.into_inner(),
        [1, 2, 0xff, 0xff, 0xff, 0xff, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn reservation_is_patched_later() {
    let mut w = ByteWriter::new();
    w.write_u8(9).unwrap();
    let header = w.reserve(8);
    w.write_bytes(b"body").unwrap();

    w.patch_u32(header, 1, 0xdeadbeef).unwrap();
    assert_eq!(
        w.patch_u32(header, 2, 0).unwrap_err().kind(),
        ErrorKind::OutOfRange
    );

    assert_eq!(
        w.as_slice(),
        [9, 0, 0, 0, 0, 0xde, 0xad, 0xbe, 0xef, b'b', b'o', b'd', b'y']
    );
}

#[test]
fn pad_to_rounds_up_only_when_needed() {
    let mut w = ByteWriter::new();
    w.write_bytes(&[1; 5]).unwrap();
    w.pad_to(8);
    assert_eq!(w.len(), 8);

    w.pad_to(8);
    assert_eq!(w.len(), 8);

    assert_eq!(&w.as_slice()[5..], [0, 0, 0]);
}

#[test]
fn u16_prefix_limit() {
    let mut w = ByteWriter::new();
    let long = vec![0; u16::MAX as usize + 1];
    assert_eq!(
        w.write_u16_prefixed(&long).unwrap_err().kind(),
        ErrorKind::Malformed
    );
}
