//! Benchmarks for filter evaluation against the catalog.
//!
//! Run with: cargo bench --package sensor-api --bench catalog_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use query_filter::{ParameterBag, QueryFilterSpec};
use sensor_api::catalog::{Collection, DatasetRecord};
use sensor_api::config::CatalogConfig;
use sensor_common::CrsCode;
use test_utils::{bbox, query_pairs, synthetic_catalog_yaml};

fn spec(query: &str) -> QueryFilterSpec {
    QueryFilterSpec::from_parameters(&ParameterBag::from_pairs(query_pairs(query))).unwrap()
}

fn datasets(count: usize) -> Vec<DatasetRecord> {
    let config: CatalogConfig = serde_yaml::from_str(&synthetic_catalog_yaml(count)).unwrap();
    config.datasets
}

// =============================================================================
// MATCHING BENCHMARKS
// =============================================================================

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    let queries = [
        ("unfiltered", String::new()),
        ("platform_types", "filter_platform_types=mobile,remote".to_string()),
        ("ids", "phenomena=1,2&procedures=10,20,30".to_string()),
        ("bbox", format!("bbox={}", bbox::GLOBAL)),
    ];

    for size in [100usize, 1_000, 10_000] {
        let records = datasets(size);
        group.throughput(Throughput::Elements(size as u64));

        for (name, query) in &queries {
            let spec = spec(query);
            let bbox = spec.spatial_filter_in(CrsCode::Epsg4326).unwrap();
            group.bench_with_input(BenchmarkId::new(*name, size), &records, |b, records| {
                b.iter(|| {
                    records
                        .iter()
                        .filter(|d| d.matches(black_box(&spec), bbox.as_ref()))
                        .count()
                })
            });
        }
    }

    group.finish();
}

// =============================================================================
// PROJECTION BENCHMARKS
// =============================================================================

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let records = datasets(10_000);

    for collection in [Collection::Datasets, Collection::Platforms, Collection::Phenomena] {
        group.bench_function(collection.as_str(), |b| {
            b.iter(|| collection.project(black_box(&records), false))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matching, bench_projection);
criterion_main!(benches);
