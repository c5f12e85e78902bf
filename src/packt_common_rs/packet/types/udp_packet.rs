//! UDP パケット (RFC 768)

use std::fmt;

use log::debug;

use crate::packt_common_rs::packet::core::bit_field::BitField;
use crate::packt_common_rs::packet::core::bit_field_group::BitFieldGroup;
use crate::packt_common_rs::packet::core::exceptions::PacketResult;
use crate::packt_common_rs::packet::core::format_base::{BasePacket, HeaderFormat};

/// UDPヘッダビルダー
#[derive(Debug, Clone)]
pub struct UdpHeader {
    pub source_port: u16,
    pub dest_port: u16,
    pub length: u16,
    pub checksum: u16,
    group: BitFieldGroup,
}

impl UdpHeader {
    pub const NAME: &'static str = "udp-header";

    pub fn new() -> Self {
        Self {
            source_port: 0,
            dest_port: 0,
            length: 0,
            checksum: 0,
            group: BitFieldGroup::new(Self::NAME),
        }
    }
}

impl Default for UdpHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderFormat for UdpHeader {
    fn fill_fields(&mut self) -> PacketResult<()> {
        let mut group = BitFieldGroup::new(Self::NAME);
        group.insert("sourcePort", BitField::from_value(self.source_port, 16)?);
        group.insert("destPort", BitField::from_value(self.dest_port, 16)?);
        group.insert("length", BitField::from_value(self.length, 16)?);
        group.insert("checksum", BitField::from_value(self.checksum, 16)?);

        debug!("udp header filled: port {} -> {}", self.source_port, self.dest_port);
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

/// UDPパケット
#[derive(Debug, Clone, Default)]
pub struct UdpPacket {
    field_groups: Vec<BitFieldGroup>,
}

impl UdpPacket {
    pub fn new() -> Self {
        Self::default()
    }

    /// UDPヘッダを追加する
    pub fn udp_header(&mut self, header: UdpHeader) -> PacketResult<&BitFieldGroup> {
        self.add_header(header)
    }
}

impl BasePacket for UdpPacket {
    fn field_groups(&self) -> &[BitFieldGroup] {
        &self.field_groups
    }

    fn push_group(&mut self, group: BitFieldGroup) {
        self.field_groups.push(group);
    }
}

impl fmt::Display for UdpPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
