//! IPv4 ヘッダ (RFC 791)
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |Version|  IHL  |Type of Service|          Total Length         |
//! |         Identification        |Flags|      Fragment Offset    |
//! |  Time to Live |    Protocol   |         Header Checksum       |
//! |                       Source Address                          |
//! |                    Destination Address                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Flags は4ビットとして扱う。

use log::debug;

use crate::packt_common_rs::packet::core::address::{ip_to_int, validate_ip};
use crate::packt_common_rs::packet::core::bit_field::BitField;
use crate::packt_common_rs::packet::core::bit_field_group::BitFieldGroup;
use crate::packt_common_rs::packet::core::exceptions::PacketResult;
use crate::packt_common_rs::packet::core::format_base::HeaderFormat;

/// IPヘッダのプロトコル番号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IpProtocol {
    Icmp = 1,
    Igmp = 2,
    Tcp = 6,
    Udp = 17,
    Encap = 41,
    Ospf = 88,
    Sctp = 132,
}

impl From<IpProtocol> for u8 {
    fn from(protocol: IpProtocol) -> Self {
        protocol as u8
    }
}

/// IPヘッダビルダー
#[derive(Debug, Clone)]
pub struct IpHeader {
    pub version: u8,
    pub header_len: u8,
    pub service_type: u8,
    pub total_len: u16,
    pub id: u16,
    pub flags: u8,
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub header_checksum: u16,
    source_addr: String,
    dest_addr: String,
    group: BitFieldGroup,
}

impl IpHeader {
    pub const NAME: &'static str = "ip-header";

    /// 全属性が0、アドレスが 0.0.0.0 のヘッダを作成
    pub fn new() -> Self {
        Self {
            version: 0,
            header_len: 0,
            service_type: 0,
            total_len: 0,
            id: 0,
            flags: 0,
            fragment_offset: 0,
            ttl: 0,
            protocol: 0,
            header_checksum: 0,
            source_addr: "0.0.0.0".to_string(),
            dest_addr: "0.0.0.0".to_string(),
            group: BitFieldGroup::new(Self::NAME),
        }
    }

    pub fn source_addr(&self) -> &str {
        &self.source_addr
    }

    pub fn dest_addr(&self) -> &str {
        &self.dest_addr
    }

    /// 送信元アドレスを設定（不正な値は保存されない）
    pub fn set_source_addr(&mut self, addr: &str) -> PacketResult<()> {
        self.source_addr = validate_ip(addr)?.to_string();
        Ok(())
    }

    /// 宛先アドレスを設定（不正な値は保存されない）
    pub fn set_dest_addr(&mut self, addr: &str) -> PacketResult<()> {
        self.dest_addr = validate_ip(addr)?.to_string();
        Ok(())
    }
}

impl Default for IpHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderFormat for IpHeader {
    fn fill_fields(&mut self) -> PacketResult<()> {
        let mut group = BitFieldGroup::new(Self::NAME);
        group.insert("version", BitField::from_value(self.version, 4)?);
        group.insert("headerLen", BitField::from_value(self.header_len, 4)?);
        group.insert("serviceType", BitField::from_value(self.service_type, 8)?);
        group.insert("totalLen", BitField::from_value(self.total_len, 16)?);
        group.insert("id", BitField::from_value(self.id, 16)?);
        group.insert("flags", BitField::from_value(self.flags, 4)?);
        group.insert("fragmentOffset", BitField::from_value(self.fragment_offset, 12)?);
        group.insert("ttl", BitField::from_value(self.ttl, 8)?);
        group.insert("protocol", BitField::from_value(self.protocol, 8)?);
        group.insert("headerChecksum", BitField::from_value(self.header_checksum, 16)?);
        group.insert("sourceAddr", BitField::from_value(ip_to_int(&self.source_addr)?, 32)?);
        group.insert("destAddr", BitField::from_value(ip_to_int(&self.dest_addr)?, 32)?);

        debug!("ip header filled: {} -> {}", self.source_addr, self.dest_addr);
        self.group = group;
        Ok(())
    }

    fn group(&self) -> &BitFieldGroup {
        &self.group
    }

    fn into_group(self) -> BitFieldGroup {
        self.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packt_common_rs::packet::core::exceptions::PacketError;

    #[test]
    fn test_field_layout() {
        let mut header = IpHeader::new();
        header.fill_fields().unwrap();

        let names: Vec<_> = header.group().names().collect();
        assert_eq!(
            names,
            vec![
                "version", "headerLen", "serviceType", "totalLen", "id", "flags",
                "fragmentOffset", "ttl", "protocol", "headerChecksum", "sourceAddr", "destAddr",
            ]
        );
        assert_eq!(header.group().bit_size(), 160);
    }

    #[test]
    fn test_invalid_address_not_stored() {
        let mut header = IpHeader::new();
        header.set_source_addr("10.0.0.1").unwrap();

        assert_eq!(
            header.set_source_addr("999.1.1.1"),
            Err(PacketError::InvalidAddress("999.1.1.1".to_string()))
        );
        assert_eq!(header.source_addr(), "10.0.0.1");
        assert!(header.set_dest_addr("1.2.3").is_err());
        assert_eq!(header.dest_addr(), "0.0.0.0");
    }

    #[test]
    fn test_fill_fields_idempotent() {
        let mut header = IpHeader::new();
        header.ttl = 64;
        header.fill_fields().unwrap();
        let first = header.group().clone();
        header.fill_fields().unwrap();
        assert_eq!(header.group(), &first);
    }

    #[test]
    fn test_version_is_truncated_to_nibble() {
        let mut header = IpHeader::new();
        header.version = 4;
        header.header_len = 5;
        header.fill_fields().unwrap();

        assert_eq!(header.group().get("version").unwrap().to_string(), "0100");
        assert_eq!(header.group().get("headerLen").unwrap().to_string(), "0101");
    }

    #[test]
    fn test_protocol_numbers() {
        assert_eq!(u8::from(IpProtocol::Tcp), 6);
        assert_eq!(u8::from(IpProtocol::Udp), 17);
        assert_eq!(u8::from(IpProtocol::Sctp), 132);
    }
}
