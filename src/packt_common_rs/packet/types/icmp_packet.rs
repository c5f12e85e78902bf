//! ICMP パケット (RFC 792)

use std::fmt;

use log::debug;

use crate::packt_common_rs::packet::core::bit_field::BitField;
use crate::packt_common_rs::packet::core::bit_field_group::BitFieldGroup;
use crate::packt_common_rs::packet::core::exceptions::PacketResult;
use crate::packt_common_rs::packet::core::format_base::{BasePacket, HeaderFormat};

/// ICMPメッセージタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IcmpType {
    EchoReply = 0,
    DestUnreachable = 3,
    SourceQuench = 4,
    Redirect = 5,
    Echo = 8,
    TimeExceeded = 11,
    ParamProb = 12,
    Timestamp = 13,
    TimestampReply = 14,
    InfoRequest = 15,
    InfoReply = 16,
}

impl From<IcmpType> for u8 {
    fn from(ty: IcmpType) -> Self {
        ty as u8
    }
}

/// ICMPコード（タイプごと）
pub mod icmp_codes {
    /// Destination Unreachable のコード
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u8)]
    pub enum DestUnreachable {
        NetUnreachable = 0,
        HostUnreachable = 1,
        ProtocolUnreachable = 2,
        PortUnreachable = 3,
        FragNeeded = 4,
        SourceRouteFailed = 5,
    }

    /// Time Exceeded のコード
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u8)]
    pub enum TimeExceeded {
        TtlExceededInTransit = 0,
        FragReassemblyTimeExceeded = 1,
    }

    /// Redirect のコード
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u8)]
    pub enum Redirect {
        Network = 0,
        Host = 1,
        TypeOfServiceAndNetwork = 2,
        TypeOfServiceAndHost = 3,
    }

    macro_rules! impl_into_u8 {
        ($($ty:ty),*) => {
            $(
                impl From<$ty> for u8 {
                    fn from(code: $ty) -> Self {
                        code as u8
                    }
                }
            )*
        };
    }

    impl_into_u8!(DestUnreachable, TimeExceeded, Redirect);
}

/// ICMPヘッダビルダー
///
/// 末尾32ビットの未使用領域は常に0
#[derive(Debug, Clone)]
pub struct IcmpHeader {
    pub icmp_type: u8,
    pub code: u8,
    pub checksum: u16,
    group: BitFieldGroup,
}

impl IcmpHeader {
    pub const NAME: &'static str = "icmp-header";

    pub fn new() -> Self {
        Self {
            icmp_type: 0,
            code: 0,
            checksum: 0,
            group: BitFieldGroup::new(Self::NAME),
        }
    }
}

impl Default for IcmpHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderFormat for IcmpHeader {
    fn fill_fields(&mut self) -> PacketResult<()> {
        let mut group = BitFieldGroup::new(Self::NAME);
        group.insert("type", BitField::from_value(self.icmp_type, 8)?);
        group.insert("code", BitField::from_value(self.code, 8)?);
        group.insert("checksum", BitField::from_value(self.checksum, 16)?);
        group.insert("unused", BitField::from_value(0u32, 32)?);

        debug!("icmp header filled: type {} code {}", self.icmp_type, self.code);
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

/// ICMPパケット
#[derive(Debug, Clone, Default)]
pub struct IcmpPacket {
    field_groups: Vec<BitFieldGroup>,
}

impl IcmpPacket {
    pub fn new() -> Self {
        Self::default()
    }

    /// ICMPヘッダを追加する
    pub fn icmp_header(&mut self, header: IcmpHeader) -> PacketResult<&BitFieldGroup> {
        self.add_header(header)
    }
}

impl BasePacket for IcmpPacket {
    fn field_groups(&self) -> &[BitFieldGroup] {
        &self.field_groups
    }

    fn push_group(&mut self, group: BitFieldGroup) {
        self.field_groups.push(group);
    }
}

impl fmt::Display for IcmpPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
