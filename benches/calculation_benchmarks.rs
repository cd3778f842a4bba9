//! Performance benchmarks for the payroll engine.
//!
//! Covers the calculation core directly and one end-to-end request:
//! - Gross-to-net for a single salary
//! - Net-to-gross search
//! - Salary curves of growing resolution
//! - Batch of 1000 employees
//! - `POST /tax/gross-to-net` through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use lohn_engine::api::{AppState, create_router};
use lohn_engine::calculation::{complete_tax, gross_from_net, salary_curve};
use lohn_engine::config::{ConfigLoader, TaxYearConfig};
use lohn_engine::models::{TaxCalculationParams, TaxClass};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/de").expect("Failed to load config")
}

fn bundle() -> TaxYearConfig {
    load_config()
        .tax_year(2025)
        .expect("Missing 2025 bundle")
        .clone()
}

fn params(gross_yearly: i64) -> TaxCalculationParams {
    TaxCalculationParams {
        church_tax: true,
        church_tax_rate: Decimal::from(9),
        childless: true,
        ..TaxCalculationParams::for_yearly_gross(Decimal::from(gross_yearly))
    }
}

/// Benchmark: Gross-to-net for a regular salary.
fn bench_gross_to_net(c: &mut Criterion) {
    let config = bundle();
    let params = params(48_000);

    c.bench_function("gross_to_net", |b| {
        b.iter(|| black_box(complete_tax(black_box(&params), &config)))
    });
}

/// Benchmark: Net-to-gross search for a few targets.
fn bench_net_to_gross(c: &mut Criterion) {
    let config = bundle();
    let params = params(0);

    let mut group = c.benchmark_group("net_to_gross");
    for target in [450, 1_500, 2_684, 6_000] {
        group.bench_with_input(BenchmarkId::new("target", target), &target, |b, target| {
            b.iter(|| black_box(gross_from_net(Decimal::from(*target), &params, &config)))
        });
    }
    group.finish();
}

/// Benchmark: Salary curves at increasing resolution.
fn bench_salary_curve(c: &mut Criterion) {
    let config = bundle();
    let params = params(0);

    let mut group = c.benchmark_group("salary_curve");
    for steps in [10u32, 100, 1000] {
        group.throughput(Throughput::Elements(u64::from(steps) + 1));
        group.bench_with_input(BenchmarkId::new("steps", steps), &steps, |b, steps| {
            b.iter(|| {
                black_box(salary_curve(
                    Decimal::from(500),
                    Decimal::from(10_000),
                    *steps,
                    &params,
                    &config,
                ))
            })
        });
    }
    group.finish();
}

/// Benchmark: Batch of 1000 employees with varied profiles.
fn bench_batch_1000(c: &mut Criterion) {
    let config = bundle();
    let classes = [TaxClass::I, TaxClass::III, TaxClass::IV, TaxClass::V];
    let batch: Vec<TaxCalculationParams> = (0..1000)
        .map(|i| TaxCalculationParams {
            tax_class: classes[i % classes.len()],
            childless: i % 2 == 0,
            ..params(6_000 + (i as i64) * 150)
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(20);

    group.bench_function("batch_1000", |b| {
        b.iter(|| {
            let results: Vec<_> = batch.iter().map(|p| complete_tax(p, &config)).collect();
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: Full HTTP round trip for gross-to-net.
fn bench_api_gross_to_net(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::json!({
        "gross_salary_yearly": "48000",
        "tax_class": "1",
        "childless": true
    })
    .to_string();

    c.bench_function("api_gross_to_net", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/tax/gross-to-net")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_gross_to_net,
    bench_net_to_gross,
    bench_salary_curve,
    bench_batch_1000,
    bench_api_gross_to_net,
);
criterion_main!(benches);
