//! Benchmarks for the query filter crate.
//!
//! Run with: cargo bench --package query-filter
//! Or: cargo bench --package query-filter --bench filter_benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use query_filter::{
    compat, FilterResolver, ParameterBag, QueryFilterSpec, SpatialFilterResolver,
};
use test_utils::{bbox, near, query_pairs, token_combinations};

fn bag(query: &str) -> ParameterBag {
    ParameterBag::from_pairs(query_pairs(query))
}

// =============================================================================
// PARAMETER BAG BENCHMARKS
// =============================================================================

fn bench_parameter_bag(c: &mut Criterion) {
    let mut group = c.benchmark_group("parameter_bag");

    let query = "phenomena=1,2,3&procedures=4&filter_platform_types=stationary,insitu\
                 &offset=10&limit=50&locale=de&expanded=true";
    group.bench_function("from_query_pairs", |b| {
        b.iter(|| ParameterBag::from_pairs(query_pairs(black_box(query))))
    });

    let parameters = bag(query);
    group.bench_function("get_values_of", |b| {
        b.iter(|| black_box(&parameters).get_values_of("phenomena"))
    });

    group.bench_function("fold_legacy_parameters", |b| {
        let legacy = bag("offering=5&procedure=4&station=3&timeseries=ts_1");
        b.iter(|| compat::fold_legacy_parameters(black_box(&legacy)))
    });

    group.finish();
}

// =============================================================================
// AXIS RESOLUTION BENCHMARKS
// =============================================================================

fn bench_axis_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("axis_resolution");

    let bags: Vec<ParameterBag> = token_combinations(&["stationary", "mobile", "insitu", "remote", "all"])
        .iter()
        .map(|combo| bag(&format!("filter_platform_types={combo}")))
        .collect();

    group.throughput(Throughput::Elements(bags.len() as u64));
    group.bench_function("all_platform_type_combinations", |b| {
        b.iter(|| {
            for parameters in &bags {
                let resolver = FilterResolver::from_parameters(black_box(parameters));
                black_box(resolver.platform_type_filter());
                black_box(resolver.geometry_filter());
            }
        })
    });

    group.finish();
}

// =============================================================================
// SPATIAL BENCHMARKS
// =============================================================================

fn bench_spatial(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial");

    let csv = bag(&format!("bbox={}", bbox::MUENSTERLAND));
    group.bench_function("bbox_csv", |b| {
        b.iter(|| {
            SpatialFilterResolver::from_parameters(black_box(&csv))
                .and_then(|r| r.resolve(&csv))
        })
    });

    let json = bag(&format!("bbox={}", bbox::MUENSTERLAND_JSON));
    group.bench_function("bbox_json", |b| {
        b.iter(|| {
            SpatialFilterResolver::from_parameters(black_box(&json))
                .and_then(|r| r.resolve(&json))
        })
    });

    let merged = bag(&format!(
        "bbox={}&near={}&crs=EPSG:4326&forceXY=true",
        bbox::MUENSTERLAND,
        near::MUENSTER_10KM
    ));
    group.bench_function("bbox_and_near_epsg4326", |b| {
        b.iter(|| {
            SpatialFilterResolver::from_parameters(black_box(&merged))
                .and_then(|r| r.resolve(&merged))
        })
    });

    group.finish();
}

// =============================================================================
// FILTER SPEC BENCHMARKS
// =============================================================================

fn bench_filter_spec(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_spec");

    let empty = ParameterBag::empty();
    group.bench_function("empty_request", |b| {
        b.iter(|| QueryFilterSpec::from_parameters(black_box(&empty)))
    });

    let typical = bag(&format!(
        "phenomena=10,11&platforms=stationary_insitu_40,mobile_insitu_72\
         &filter_platform_types=stationary,insitu&filter_dataset_types=measurement\
         &bbox={}&resultTime=2024-03-01T12:00:00Z&offset=0&limit=100",
        bbox::MUENSTERLAND
    ));
    group.bench_function("typical_request", |b| {
        b.iter(|| QueryFilterSpec::from_parameters(black_box(&typical)))
    });

    let legacy = bag("offering=30&procedure=20&station=40");
    group.bench_function("legacy_request", |b| {
        b.iter(|| QueryFilterSpec::from_legacy_parameters(black_box(&legacy)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parameter_bag,
    bench_axis_resolution,
    bench_spatial,
    bench_filter_spec,
);
criterion_main!(benches);
