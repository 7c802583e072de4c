use criterion::{Criterion, criterion_group, criterion_main};
use gps_tracker::location::rounding::{TOLERANCE_PRECISION, round};
use gps_tracker::upload::record::upload_record;
use gps_tracker::{PositionSample, is_different};
use std::hint::black_box;

fn bench(c: &mut Criterion) {
    let a = PositionSample::builder()
        .latitude(52.379_188_1)
        .longitude(4.899_431_9)
        .build();
    let b = PositionSample::builder()
        .latitude(52.379_201_7)
        .longitude(4.899_428_3)
        .build();

    c.bench_function("rounding::round", |bencher| {
        bencher.iter(|| round(black_box(52.379_188_1), TOLERANCE_PRECISION));
    });

    c.bench_function("filter::is_different", |bencher| {
        bencher.iter(|| is_different(black_box(&a), black_box(&b)));
    });

    c.bench_function("record::upload_record", |bencher| {
        bencher.iter(|| upload_record(black_box("Android Device"), black_box(&a)));
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
