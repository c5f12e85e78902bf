use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use packt_rust::prelude::*;

fn build_tcp_packet(payload: &str) -> TcpPacket {
    let mut ip = IpHeader::new();
    ip.version = 4;
    ip.header_len = 5;
    ip.ttl = 64;
    ip.protocol = IpProtocol::Tcp.into();
    ip.set_source_addr("192.168.1.1").unwrap();
    ip.set_dest_addr("172.16.1.1").unwrap();

    let mut tcp = TcpHeader::new();
    tcp.source_port = 9999;
    tcp.dest_port = 11111;
    tcp.flags = TcpFlags::ACK;

    let mut packet = TcpPacket::new();
    packet.ip_header(ip).unwrap();
    packet.tcp_header(tcp).unwrap();
    packet.data(payload).unwrap();
    packet
}

fn benchmark_bit_field_creation(c: &mut Criterion) {
    c.bench_function("bit_field_u32", |b| {
        b.iter(|| black_box(BitField::from_value(black_box(0xDEAD_BEEFu32), 32)))
    });

    c.bench_function("bit_field_nibble_truncated", |b| {
        b.iter(|| black_box(BitField::from_value(black_box(5u8), 4)))
    });
}

fn benchmark_packet_building(c: &mut Criterion) {
    c.bench_function("tcp_packet_build", |b| {
        b.iter(|| black_box(build_tcp_packet(black_box("Hello World"))))
    });
}

fn benchmark_packet_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_to_bytes");

    for size in [16, 256, 1024] {
        let payload: String = "x".repeat(size);
        let packet = build_tcp_packet(&payload);

        group.bench_with_input(BenchmarkId::from_parameter(size), &packet, |b, packet| {
            b.iter(|| black_box(packet.to_bytes()))
        });
    }

    group.finish();
}

fn benchmark_diagram_render(c: &mut Criterion) {
    let packet = build_tcp_packet("Hello World");

    c.bench_function("tcp_packet_render", |b| b.iter(|| black_box(packet.render())));
}

criterion_group!(
    benches,
    benchmark_bit_field_creation,
    benchmark_packet_building,
    benchmark_packet_serialization,
    benchmark_diagram_render
);
criterion_main!(benches);
