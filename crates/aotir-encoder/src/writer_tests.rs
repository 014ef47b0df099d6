use aotir_format::{Header, WordSize};

use crate::{EncodeError, StreamWriter};

#[test]
fn header_is_magic_then_version() {
    let mut w = StreamWriter::new(WordSize::Eight);

    w.write_header(&Header::default());

    assert_eq!(w.as_bytes(), &[0x0d, 0xf0, 0xd5, 0xed, 0, 0, 0, 0]);
}

#[test]
fn integers_are_little_endian() {
    let mut w = StreamWriter::new(WordSize::Eight);

    w.write_u8(0xab);
    w.write_u32(0x0102_0304);

    assert_eq!(w.as_bytes(), &[0xab, 0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn size_fields_follow_word_size() {
    let mut eight = StreamWriter::new(WordSize::Eight);
    let mut four = StreamWriter::new(WordSize::Four);

    eight.write_size(5).unwrap();
    four.write_size(5).unwrap();

    assert_eq!(eight.as_bytes(), &[5, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(four.as_bytes(), &[5, 0, 0, 0]);
}

#[test]
fn oversized_values_do_not_fit_four_byte_words() {
    let mut w = StreamWriter::new(WordSize::Four);

    let err = w.write_size(1 << 32).unwrap_err();

    assert_eq!(
        err,
        EncodeError::SizeOverflow {
            value: 1 << 32,
            word: 4
        }
    );
    assert!(w.is_empty());
}

#[test]
fn strings_are_nul_terminated() {
    let mut w = StreamWriter::new(WordSize::Eight);

    w.write_cstr("main").unwrap();
    w.write_cstr("").unwrap();

    assert_eq!(w.as_bytes(), b"main\0\0");
    assert_eq!(w.len(), 6);
}

#[test]
fn interior_nul_is_rejected() {
    let mut w = StreamWriter::new(WordSize::Eight);

    let err = w.write_cstr("a\0b").unwrap_err();

    assert_eq!(err, EncodeError::InteriorNul("a\0b".into()));
    assert_eq!(err.to_string(), r#"string "a\0b" contains a NUL byte"#);
    assert!(w.is_empty());
}
