use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use msax_rs::{
    BreakpointTable, Encoder, EncoderConfig, LetterDistanceTable, Normalizer, PiecewiseAggregator,
    Series, TimeIndexedSeries, ZNormalizer,
};

fn sine_series(n: usize) -> TimeIndexedSeries {
    TimeIndexedSeries::new(
        (0..n)
            .map(|i| (i as f64 * 0.5, (i as f64 * 0.1).sin()))
            .collect(),
    )
    .unwrap()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for n in [1_000, 10_000, 100_000] {
        let ts: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1).sin()).collect();
        let z = ZNormalizer::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| z.normalize(black_box(&ts)))
        });
    }
    group.finish();
}

fn bench_paa(c: &mut Criterion) {
    let mut group = c.benchmark_group("paa");
    let aggregator = PiecewiseAggregator::default();
    for n in [1_000, 10_000, 100_000] {
        let series = sine_series(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| series.to_segments(black_box(16), &aggregator))
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let encoder = Encoder::new(EncoderConfig::new(16, 10)).unwrap();
    for n in [1_000, 10_000, 100_000] {
        let series = sine_series(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| encoder.encode(black_box(&series)))
        });
    }
    group.finish();
}

fn bench_distance_table_build(c: &mut Criterion) {
    let table = BreakpointTable::standard();
    let positions = table.letter_positions(20).unwrap();
    c.bench_function("distance_table_build_20", |b| {
        b.iter(|| LetterDistanceTable::build(black_box(20), &positions))
    });
}

fn bench_encode_batch(c: &mut Criterion) {
    let encoder = Encoder::new(EncoderConfig::default()).unwrap();
    let batch: Vec<TimeIndexedSeries> = (0..256).map(|_| sine_series(2_000)).collect();
    c.bench_function("encode_batch_256", |b| {
        b.iter(|| encoder.encode_batch(black_box(&batch)))
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_paa,
    bench_encode,
    bench_distance_table_build,
    bench_encode_batch,
);
criterion_main!(benches);
