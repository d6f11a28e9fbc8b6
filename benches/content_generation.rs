use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use s3realistic::{GeneratedFile, VerifierSink};

const SIZE: u64 = 16 * 1024 * 1024;

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.throughput(Throughput::Bytes(SIZE));

    for chunk_size in [4096usize, 65_536, 1 << 20].iter() {
        group.bench_with_input(BenchmarkId::new("read_into", chunk_size), chunk_size, |b, &chunk_size| {
            let mut buf = vec![0u8; chunk_size];
            b.iter(|| {
                let mut file = GeneratedFile::new(SIZE, 42);
                while file.read_into(&mut buf) > 0 {
                    black_box(&buf);
                }
            })
        });
    }

    group.finish();
}

fn bench_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    group.throughput(Throughput::Bytes(SIZE));

    let data = GeneratedFile::new(SIZE, 42).read(None);
    for chunk_size in [4096usize, 65_536, 1 << 20].iter() {
        group.bench_with_input(BenchmarkId::new("write", chunk_size), chunk_size, |b, &chunk_size| {
            b.iter(|| {
                let mut sink = VerifierSink::default();
                for chunk in data.chunks(chunk_size) {
                    sink.write(chunk);
                }
                black_box(sink.valid())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generation, bench_verification);
criterion_main!(benches);
