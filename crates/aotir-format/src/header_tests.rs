use crate::{HEADER_SIZE, Header, HeaderError, MAGIC, VERSION};

#[test]
fn default_header_is_valid() {
    let header = Header::default();

    assert!(header.validate_magic());
    assert!(header.validate_version());
}

#[test]
fn to_bytes_is_little_endian() {
    let bytes = Header::default().to_bytes();

    assert_eq!(bytes, [0x0d, 0xf0, 0xd5, 0xed, 0, 0, 0, 0]);
}

#[test]
fn from_bytes_reads_prefix_only() {
    let mut bytes = Header::default().to_bytes().to_vec();
    bytes.extend_from_slice(&[0xff; 16]);

    let header = Header::from_bytes(&bytes).unwrap();
    assert_eq!(header.magic, MAGIC);
    assert_eq!(header.version, VERSION);
}

#[test]
fn from_bytes_rejects_short_input() {
    let err = Header::from_bytes(&[0x0d, 0xf0]).unwrap_err();

    assert_eq!(err, HeaderError::TooShort(2));
}

#[test]
fn foreign_magic_fails_validation() {
    let header = Header {
        magic: 0xdead_beef,
        version: VERSION,
    };

    assert!(!header.validate_magic());
    assert_eq!(header.to_bytes().len(), HEADER_SIZE);
}
