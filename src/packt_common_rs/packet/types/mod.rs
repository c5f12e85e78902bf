//! プロトコル別のヘッダとパケット

pub mod icmp_packet;
pub mod ip_header;
pub mod tcp_packet;
pub mod udp_packet;

pub use icmp_packet::{icmp_codes, IcmpHeader, IcmpPacket, IcmpType};
pub use ip_header::{IpHeader, IpProtocol};
pub use tcp_packet::{TcpFlags, TcpHeader, TcpPacket};
pub use udp_packet::{UdpHeader, UdpPacket};
