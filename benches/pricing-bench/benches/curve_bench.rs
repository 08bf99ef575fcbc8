//! Primary market benchmarks.
//!
//! Measures:
//! - Single-resource quote throughput at several utilization levels
//! - Combined CPU + NET lease quotes
//! - Batches of randomly sized quotes against one snapshot

use {
    criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput},
    rand::Rng,
    resource_pricing::{
        decay::adjusted_utilization, BondingCurvePricer, Cpu, Net, PricingConfig,
        PricingOptions, PrimaryMarket,
    },
    resource_pricing_bench::helpers::{
        curve, primary_market, usage_sample, CPU_PER_DAY, NET_PER_DAY, NOW,
    },
};

// ---------------------------------------------------------------------------
// Decay
// ---------------------------------------------------------------------------

fn bench_decay(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve/decay");
    group.throughput(Throughput::Elements(1));

    let settled = curve(40, 0);
    let hot = curve(40, 30);

    group.bench_function("settled", |b| {
        b.iter(|| adjusted_utilization(&settled, NOW))
    });
    group.bench_function("hot", |b| b.iter(|| adjusted_utilization(&hot, NOW)));

    group.finish();
}

// ---------------------------------------------------------------------------
// Single-resource quotes
// ---------------------------------------------------------------------------

fn bench_price_per_unit(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve/price_per_unit");
    group.throughput(Throughput::Elements(1));

    let config = PricingConfig::default();
    let sample = usage_sample();
    let options = PricingOptions::at(NOW);

    for &utilization_pct in &[0i64, 25, 50, 90] {
        let state = curve(utilization_pct, 5);
        let pricer = match BondingCurvePricer::<Cpu>::new(&state, &config) {
            Ok(pricer) => pricer,
            Err(err) => panic!("fixture curve rejected: {err}"),
        };
        group.bench_with_input(
            BenchmarkId::new("cpu_utilization_pct", utilization_pct),
            &utilization_pct,
            |b, _| b.iter(|| pricer.price_per_unit(&sample, CPU_PER_DAY / 100, &options)),
        );
    }

    let state = curve(50, 5);
    let net = match BondingCurvePricer::<Net>::new(&state, &config) {
        Ok(pricer) => pricer,
        Err(err) => panic!("fixture curve rejected: {err}"),
    };
    group.bench_function("net_kb", |b| {
        b.iter(|| net.price_per_coarse_unit(&sample, NET_PER_DAY / 100_000, &options))
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Lease quotes
// ---------------------------------------------------------------------------

fn bench_lease_quote(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve/lease_quote");
    group.throughput(Throughput::Elements(1));

    let config = PricingConfig::default();
    let state = primary_market(30, 10);
    let market = PrimaryMarket::new(&state, &config);
    let sample = usage_sample();
    let options = PricingOptions::at(NOW);

    group.bench_function("cpu_and_net", |b| {
        b.iter(|| market.quote(&sample, CPU_PER_DAY / 1_000, NET_PER_DAY / 1_000, &options))
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Quote batches
// ---------------------------------------------------------------------------

fn bench_random_quote_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve/random_batch");

    let config = PricingConfig::default();
    let state = curve(20, 20);
    let sample = usage_sample();
    let options = PricingOptions::at(NOW);

    for &n_quotes in &[100u64, 1_000, 10_000] {
        let mut rng = rand::rng();
        let requests: Vec<u64> = (0..n_quotes)
            .map(|_| rng.random_range(1..=CPU_PER_DAY / 10))
            .collect();

        group.throughput(Throughput::Elements(n_quotes));
        group.bench_with_input(
            BenchmarkId::new("quotes", n_quotes),
            &requests,
            |b, requests| {
                b.iter(|| {
                    let pricer = BondingCurvePricer::<Cpu>::new(&state, &config).ok()?;
                    let mut total = 0i64;
                    for &units in requests {
                        if let Ok(price) = pricer.price_per_unit(&sample, units, &options) {
                            total = total.saturating_add(price.units);
                        }
                    }
                    Some(total)
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_decay,
    bench_price_per_unit,
    bench_lease_quote,
    bench_random_quote_batch,
);
criterion_main!(benches);
