use bytes::BytesMut;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use memory_packets::{Packet, PacketCodec, StringEncoding};
use tokio_util::codec::{Decoder, Encoder};

#[allow(clippy::unwrap_used)]
fn bench_integer_write_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("integer_write_read");
    let counts = [16usize, 256, 4096];

    for &count in &counts {
        group.throughput(Throughput::Bytes((count * 7) as u64));
        group.bench_function(format!("write_{count}"), |b| {
            b.iter(|| {
                let mut packet = Packet::new();
                for i in 0..count {
                    packet.write_u8(i as u8);
                    packet.write_u16(i as u16);
                    packet.write_u32(i as u32);
                }
                black_box(packet)
            })
        });
        group.bench_function(format!("read_{count}"), |b| {
            let mut source = Packet::new();
            for i in 0..count {
                source.write_u8(i as u8);
                source.write_u16(i as u16);
                source.write_u32(i as u32);
            }
            b.iter_batched(
                || source.clone().with_position(0),
                |mut packet| {
                    for _ in 0..count {
                        black_box(packet.read_u8(true).unwrap());
                        black_box(packet.read_u16().unwrap());
                        black_box(packet.read_u32().unwrap());
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

#[allow(clippy::unwrap_used)]
fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("strings");
    let sizes = [16usize, 512, 4096];

    for &size in &sizes {
        let text = vec![b'x'; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("cstring_{size}b"), |b| {
            let mut source = Packet::new();
            source.write_string(&text);
            source.write_u8(0);
            b.iter_batched(
                || source.clone().with_position(0),
                |mut packet| {
                    black_box(
                        packet
                            .read_string(true, StringEncoding::NullTerminated)
                            .unwrap(),
                    )
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("sized_{size}b"), |b| {
            let mut source = Packet::new();
            source.write_buffer(&text);
            b.iter_batched(
                || source.clone().with_position(0),
                |mut packet| {
                    black_box(
                        packet
                            .read_string(true, StringEncoding::SizeEncoded)
                            .unwrap(),
                    )
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

#[allow(clippy::unwrap_used)]
fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_encode_decode");
    let payload_sizes = [64usize, 4096, 65536];

    for &size in &payload_sizes {
        let payload = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("encode_{size}b"), |b| {
            b.iter_batched(
                || Packet::from_vec(payload.clone()),
                |packet| {
                    let mut buf = BytesMut::with_capacity(size + 4);
                    let mut codec = PacketCodec::new();
                    codec.encode(packet, &mut buf).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("decode_{size}b"), |b| {
            let mut encoded = BytesMut::new();
            PacketCodec::new()
                .encode(Packet::from_vec(payload.clone()), &mut encoded)
                .unwrap();
            b.iter_batched(
                || encoded.clone(),
                |mut buf| {
                    let decoded = PacketCodec::new().decode(&mut buf);
                    assert!(matches!(decoded, Ok(Some(_))));
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_integer_write_read, bench_strings, bench_codec);
criterion_main!(benches);
