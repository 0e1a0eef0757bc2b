//! Benchmarks for index conversion, interpolation and cone search.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use healpix::{
    cone_search, index_to_lonlat, interpolate_bilinear, lonlat_to_index, nested_to_ring, Order,
};

fn test_points() -> Vec<(f64, f64)> {
    (0..1000)
        .map(|i| {
            let lon = (i as f64 * 0.0137) % (2.0 * std::f64::consts::PI);
            let lat = (i as f64 * 0.002 - 1.0).asin();
            (lon, lat)
        })
        .collect()
}

fn bench_conversions(c: &mut Criterion) {
    let points = test_points();
    let nside = 1 << 12;

    for order in [Order::Ring, Order::Nested] {
        c.bench_function(&format!("lonlat_to_index_1000_{}", order), |b| {
            b.iter(|| {
                for &(lon, lat) in &points {
                    black_box(lonlat_to_index(lon, lat, nside, order).ok());
                }
            })
        });

        c.bench_function(&format!("index_to_lonlat_1000_{}", order), |b| {
            b.iter(|| {
                for i in 0..1000u64 {
                    black_box(index_to_lonlat(i * 997, nside, 0.5, 0.5, order).ok());
                }
            })
        });
    }

    c.bench_function("nested_to_ring_1000", |b| {
        b.iter(|| {
            for i in 0..1000u64 {
                black_box(nested_to_ring(black_box(i * 12_345), nside).ok());
            }
        })
    });
}

fn bench_interpolation(c: &mut Criterion) {
    let nside = 256;
    let values: Vec<f64> = (0..12 * nside * nside).map(|i| (i % 97) as f64).collect();
    let points = test_points();

    c.bench_function("interpolate_bilinear_1000", |b| {
        b.iter(|| {
            for &(lon, lat) in &points {
                black_box(interpolate_bilinear(lon, lat, &values, nside, Order::Ring).ok());
            }
        })
    });
}

fn bench_cone_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("cone_search");
    let nside = 1024;
    for radius_deg in [0.1f64, 1.0, 5.0] {
        let radius = radius_deg.to_radians();
        group.bench_with_input(BenchmarkId::new("exact", radius_deg), &radius, |b, &r| {
            b.iter(|| cone_search(black_box(1.0), black_box(0.4), r, nside, Order::Nested, false))
        });
        group.bench_with_input(
            BenchmarkId::new("approximate", radius_deg),
            &radius,
            |b, &r| {
                b.iter(|| cone_search(black_box(1.0), black_box(0.4), r, nside, Order::Nested, true))
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_conversions,
    bench_interpolation,
    bench_cone_search
);
criterion_main!(benches);
