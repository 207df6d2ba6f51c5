use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use mining_jv_simulator::deal_a::{self, DealAInputs};
use mining_jv_simulator::deal_b::{self, DealBInputs};
use mining_jv_simulator::estimator::estimate_monthly_btc;
use mining_jv_simulator::projection::{project_deal_a, ProjectionSettings};
use mining_jv_simulator::types::{DeploymentPhase, MiningParams};

fn bench_params() -> MiningParams {
    MiningParams {
        btc_price: 100_000.0,
        network_difficulty: 100.0,
        hashrate_per_mw: 1.5,
        block_reward: 3.125,
        uptime: 95.0,
        pool_fee: 1.0,
    }
}

fn bench_estimator(c: &mut Criterion) {
    let params = bench_params();
    c.bench_function("estimate_monthly_btc", |b| {
        b.iter(|| estimate_monthly_btc(black_box(100.0), black_box(&params)))
    });
}

fn bench_deal_a(c: &mut Criterion) {
    let mut inputs = DealAInputs::new(DeploymentPhase::Two, 30.0, bench_params());
    inputs.opex_monthly = 566_666.67;
    inputs.capex = 85_000_000.0;
    inputs.resale_mw = 10.0;
    inputs.resale_rate_cents = 5.5;

    c.bench_function("deal_a_calculate", |b| {
        b.iter(|| deal_a::calculate(black_box(&inputs)))
    });
}

fn bench_deal_b(c: &mut Criterion) {
    let mut inputs = DealBInputs::new(200.0, 40.0, bench_params());
    inputs.opex_per_mw_monthly = 5_000.0;

    c.bench_function("deal_b_calculate", |b| {
        b.iter(|| deal_b::calculate(black_box(&inputs)))
    });
}

fn bench_projection(c: &mut Criterion) {
    let inputs = DealAInputs::new(DeploymentPhase::Three, 30.0, bench_params());
    let settings = ProjectionSettings {
        years: 10,
        difficulty_growth_percent: 25.0,
    };

    c.bench_function("project_deal_a_10y", |b| {
        b.iter(|| project_deal_a(black_box(&inputs), black_box(&settings)))
    });
}

criterion_group!(
    benches,
    bench_estimator,
    bench_deal_a,
    bench_deal_b,
    bench_projection
);
criterion_main!(benches);
