use log::{debug, log_enabled, Level};

use crate::packt_common_rs::packet::core::bit_field_group::BitFieldGroup;
use crate::packt_common_rs::packet::core::format_base::BasePacket;

/// Packet inspection helper.
/// - Hex dump per group, in wire order
/// - Bit/byte accounting, including the per-field padding of the byte output
pub struct PacketDebugLogger;

impl PacketDebugLogger {
    /// One line per group: `name bits=N bytes=M | hex`
    pub fn format_group(group: &BitFieldGroup) -> String {
        let bytes = group.to_bytes();
        format!(
            "{} bits={} bytes={} | {}",
            group.name(),
            group.bit_size(),
            bytes.len(),
            hex::encode(&bytes)
        )
    }

    pub fn format_packet<P: BasePacket>(packet: &P) -> Vec<String> {
        let mut lines: Vec<String> = packet
            .field_groups()
            .iter()
            .map(Self::format_group)
            .collect();
        let wire = packet.to_bytes();
        lines.push(format!(
            "total bits={} num_bytes={} serialized={} | {}",
            packet.num_bits(),
            packet.num_bytes(),
            wire.len(),
            hex::encode(&wire)
        ));
        lines
    }

    pub fn log_packet<P: BasePacket>(packet: &P) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        for line in Self::format_packet(packet) {
            debug!("[PacketDebug] {}", line);
        }
    }
}
