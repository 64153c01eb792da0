use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dhruv_chart::{ChartContext, Graha, NodeAspectPolicy, dignity, drishti_matrix};

const LONS: [f64; 9] = [10.0, 95.0, 200.0, 25.0, 250.0, 340.0, 300.0, 60.0, 240.0];

fn chart_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart");
    group.bench_function("from_sidereal", |b| {
        b.iter(|| ChartContext::from_sidereal(black_box(5.0), black_box(LONS), [1.0; 9]))
    });

    let chart = ChartContext::from_sidereal(5.0, LONS, [1.0; 9]).unwrap();
    group.bench_function("drishti_matrix", |b| {
        b.iter(|| drishti_matrix(black_box(&chart), NodeAspectPolicy::JupiterLike))
    });
    group.bench_function("dignity", |b| {
        b.iter(|| dignity(black_box(Graha::Guru), black_box(3)))
    });
    group.finish();
}

criterion_group!(benches, chart_bench);
criterion_main!(benches);
