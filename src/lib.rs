/// Packt Rust Implementation
/// Bit-field based protocol header builder (IP / TCP / UDP / ICMP)

pub mod packt_common_rs;

// 便利な再エクスポート
pub mod prelude {
    pub use crate::packt_common_rs::packet::core::{
        BasePacket, BitField, BitFieldGroup, FieldValue, HeaderFormat, PacketError, PacketResult,
    };
    pub use crate::packt_common_rs::packet::types::{
        IcmpHeader, IcmpPacket, IcmpType, IpHeader, IpProtocol, TcpFlags, TcpHeader, TcpPacket,
        UdpHeader, UdpPacket,
    };
}
