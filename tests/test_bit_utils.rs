use packt_rust::packt_common_rs::packet::core::{
    bit_list_to_bytes, bytes_to_bit_list, bytes_to_number, ip_from_field_bytes, ip_from_int,
    ip_to_bytes, ip_to_int, number_to_bytes_le, validate_ip,
};
use packt_rust::prelude::*;

#[test]
fn test_number_to_bytes_widths() {
    assert_eq!(number_to_bytes_le(0x0102_0304, 4), vec![0x04, 0x03, 0x02, 0x01]);
    assert_eq!(number_to_bytes_le(0x0102_0304, 2), vec![0x04, 0x03]);
    assert_eq!(number_to_bytes_le(1, 10), vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert!(number_to_bytes_le(0xFF, 0).is_empty());
}

#[test]
fn test_bit_list_conversion() {
    let bits = bytes_to_bit_list(&[0b0000_0101, 0x80]);
    assert_eq!(bits.len(), 16);
    assert!(bits[0]);
    assert!(!bits[1]);
    assert!(bits[2]);
    assert!(bits[15]);
    assert_eq!(bit_list_to_bytes(&bits), vec![0b0000_0101, 0x80]);

    // 端数は最後の1バイトに入る
    assert_eq!(bit_list_to_bytes(&[true, true, false, true, true]), vec![0b0001_1011]);
    assert!(bit_list_to_bytes(&[]).is_empty());
}

#[test]
fn test_bytes_to_number_big_endian() {
    assert_eq!(bytes_to_number(&[]), Ok(0));
    assert_eq!(bytes_to_number(&[0x01, 0x00]), Ok(256));
    assert_eq!(bytes_to_number(&[0xFF; 8]), Ok(u64::MAX));
    assert_eq!(
        bytes_to_number(&[0u8; 9]),
        Err(PacketError::NumericRange { len: 9 })
    );
}

#[test]
fn test_validate_ip_scenarios() {
    for ok in ["0.0.0.0", "255.255.255.255", "192.168.1.1", "10.0.0.254"] {
        assert_eq!(validate_ip(ok), Ok(ok));
    }
    for bad in ["256.1.1.1", "1.2.3", "1.2.3.4.5", "01.2.3.4", "a.b.c.d", "", " 1.2.3.4", "1..2.3", ".1.2.3.4"] {
        assert_eq!(validate_ip(bad), Err(PacketError::InvalidAddress(bad.to_string())));
    }
}

#[test]
fn test_ip_conversions() {
    assert_eq!(ip_to_bytes("192.168.1.1"), Ok([192, 168, 1, 1]));
    assert_eq!(ip_to_int("192.168.1.1"), Ok(0xC0A8_0101));
    assert_eq!(ip_from_int(0xC0A8_0101), "192.168.1.1");
    assert_eq!(ip_from_field_bytes([1, 1, 168, 192]), "192.168.1.1");
    assert!(ip_to_int("300.0.0.1").is_err());
}
