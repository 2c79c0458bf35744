use std::{hint::black_box, io::Cursor};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wavh_core::{copy_wav, write_stereo_cd, WavHeader};

fn bench_header_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("header");

    let plain = WavHeader::new(1, 2, 48_000, 24, 480_000);
    let padded = plain.clone().with_padding(4_044);

    for (name, header) in [("plain", &plain), ("junk_4044", &padded)] {
        let bytes = header.to_bytes();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("parse", name), &bytes, |b, bytes| {
            b.iter(|| WavHeader::parse(black_box(bytes)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("to_bytes", name), header, |b, header| {
            b.iter(|| black_box(header).to_bytes())
        });
    }

    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");

    let n = 44_100;
    let left: Vec<i16> = (0..n).map(|i| (i % 1_000) as i16).collect();
    let right: Vec<i16> = left.iter().map(|s| -s).collect();
    let file = write_stereo_cd(Vec::new(), &left, &right).unwrap();

    group.throughput(Throughput::Bytes(file.len() as u64));

    group.bench_function("write_stereo_cd_1s", |b| {
        b.iter(|| write_stereo_cd(Vec::with_capacity(file.len()), &left, &right).unwrap())
    });
    group.bench_function("copy_wav_1s", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(file.len());
            copy_wav(Cursor::new(black_box(&file[..])), &mut out).unwrap();
            out
        })
    });

    group.finish();
}

criterion_group!(benches, bench_header_codec, bench_stream);
criterion_main!(benches);
