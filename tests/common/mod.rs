//! Shared packet fixtures for integration tests.

use packt_rust::prelude::*;

/// IP(192.168.1.1 -> 172.16.1.1) + TCP(9999 -> 11111, ACK) + "Hello World"
pub fn sample_tcp_packet() -> TcpPacket {
    let mut packet = TcpPacket::new();

    let mut ip = IpHeader::new();
    ip.set_source_addr("192.168.1.1").unwrap();
    ip.set_dest_addr("172.16.1.1").unwrap();
    packet.ip_header(ip).unwrap();

    let mut tcp = TcpHeader::new();
    tcp.source_port = 9999;
    tcp.dest_port = 11111;
    tcp.flags = TcpFlags::ACK;
    packet.tcp_header(tcp).unwrap();

    packet.data("Hello World").unwrap();
    packet
}
