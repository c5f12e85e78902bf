//! TCP パケット (RFC 9293)
//!
//! IPヘッダ + TCPヘッダ + 任意のデータで構成する。

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use log::debug;

use crate::packt_common_rs::packet::core::bit_field::BitField;
use crate::packt_common_rs::packet::core::bit_field_group::BitFieldGroup;
use crate::packt_common_rs::packet::core::exceptions::PacketResult;
use crate::packt_common_rs::packet::core::format_base::{BasePacket, HeaderFormat};

/// TCP制御フラグ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TcpFlags(pub u8);

impl TcpFlags {
    pub const FIN: TcpFlags = TcpFlags(0b0000_0001);
    pub const SYN: TcpFlags = TcpFlags(0b0000_0010);
    pub const RST: TcpFlags = TcpFlags(0b0000_0100);
    pub const PSH: TcpFlags = TcpFlags(0b0000_1000);
    pub const ACK: TcpFlags = TcpFlags(0b0001_0000);
    pub const URG: TcpFlags = TcpFlags(0b0010_0000);
    pub const ECE: TcpFlags = TcpFlags(0b0100_0000);
    pub const CWR: TcpFlags = TcpFlags(0b1000_0000);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: TcpFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TcpFlags {
    type Output = TcpFlags;

    fn bitor(self, rhs: TcpFlags) -> TcpFlags {
        TcpFlags(self.0 | rhs.0)
    }
}

/// "syn,ack" や "SYN|ACK" 形式のフラグ名を解釈する
impl FromStr for TcpFlags {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(|c: char| c == ',' || c == '|')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_fold(TcpFlags(0), |acc, name| {
                let flag = match name.to_uppercase().as_str() {
                    "FIN" => TcpFlags::FIN,
                    "SYN" => TcpFlags::SYN,
                    "RST" => TcpFlags::RST,
                    "PSH" => TcpFlags::PSH,
                    "ACK" => TcpFlags::ACK,
                    "URG" => TcpFlags::URG,
                    "ECE" => TcpFlags::ECE,
                    "CWR" => TcpFlags::CWR,
                    _ => return Err(format!("不明なTCPフラグ: {}", name)),
                };
                Ok(acc | flag)
            })
    }
}

impl From<TcpFlags> for u8 {
    fn from(flags: TcpFlags) -> Self {
        flags.0
    }
}

/// TCPヘッダビルダー
#[derive(Debug, Clone)]
pub struct TcpHeader {
    pub source_port: u16,
    pub dest_port: u16,
    pub seq_num: u32,
    pub ack_num: u32,
    pub data_offset: u8,
    pub reserved: u8,
    pub flags: TcpFlags,
    pub window: u16,
    pub checksum: u16,
    pub urg_pointer: u16,
    pub options: u32,
    group: BitFieldGroup,
}

impl TcpHeader {
    pub const NAME: &'static str = "tcp-header";

    /// フラグ FIN、その他0のヘッダを作成
    pub fn new() -> Self {
        Self {
            source_port: 0,
            dest_port: 0,
            seq_num: 0,
            ack_num: 0,
            data_offset: 0,
            reserved: 0,
            flags: TcpFlags::FIN,
            window: 0,
            checksum: 0,
            urg_pointer: 0,
            options: 0,
            group: BitFieldGroup::new(Self::NAME),
        }
    }
}

impl Default for TcpHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderFormat for TcpHeader {
    fn fill_fields(&mut self) -> PacketResult<()> {
        let mut group = BitFieldGroup::new(Self::NAME);
        group.insert("sourcePort", BitField::from_value(self.source_port, 16)?);
        group.insert("destPort", BitField::from_value(self.dest_port, 16)?);
        group.insert("seqNum", BitField::from_value(self.seq_num, 32)?);
        group.insert("ackNum", BitField::from_value(self.ack_num, 32)?);
        group.insert("dataOffset", BitField::from_value(self.data_offset, 4)?);
        group.insert("reserved", BitField::from_value(self.reserved, 4)?);
        group.insert("flags", BitField::from_value(self.flags.bits(), 8)?);
        group.insert("window", BitField::from_value(self.window, 16)?);
        group.insert("checksum", BitField::from_value(self.checksum, 16)?);
        group.insert("urgPointer", BitField::from_value(self.urg_pointer, 16)?);
        group.insert("options", BitField::from_value(self.options, 32)?);

        debug!("tcp header filled: port {} -> {}", self.source_port, self.dest_port);
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

/// TCPパケット
#[derive(Debug, Clone, Default)]
pub struct TcpPacket {
    field_groups: Vec<BitFieldGroup>,
}

impl TcpPacket {
    pub fn new() -> Self {
        Self::default()
    }

    /// TCPヘッダを追加する
    pub fn tcp_header(&mut self, header: TcpHeader) -> PacketResult<&BitFieldGroup> {
        self.add_header(header)
    }
}

impl BasePacket for TcpPacket {
    fn field_groups(&self) -> &[BitFieldGroup] {
        &self.field_groups
    }

    fn push_group(&mut self, group: BitFieldGroup) {
        self.field_groups.push(group);
    }
}

impl fmt::Display for TcpPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_combine() {
        let flags = TcpFlags::SYN | TcpFlags::ACK;
        assert_eq!(flags.bits(), 0x12);
        assert!(flags.contains(TcpFlags::ACK));
        assert!(!flags.contains(TcpFlags::FIN));
    }

    #[test]
    fn test_flags_from_str() {
        assert_eq!("syn,ack".parse::<TcpFlags>(), Ok(TcpFlags::SYN | TcpFlags::ACK));
        assert_eq!("PSH | ACK".parse::<TcpFlags>(), Ok(TcpFlags(0x18)));
        assert!("syn,bogus".parse::<TcpFlags>().is_err());
    }

    #[test]
    fn test_default_flags_fin() {
        assert_eq!(TcpHeader::new().flags, TcpFlags::FIN);
    }

    #[test]
    fn test_header_size_and_bytes() {
        let mut header = TcpHeader::new();
        header.source_port = 0x1234;
        header.flags = TcpFlags::ACK;
        header.fill_fields().unwrap();

        let group = header.group();
        assert_eq!(group.bit_size(), 192);
        let bytes = group.to_bytes();
        // dataOffset と reserved がそれぞれ1バイトを占める
        assert_eq!(bytes.len(), 25);
        assert_eq!(&bytes[..2], &[0x34, 0x12]);
        assert_eq!(bytes[14], 0x10);
    }
}
