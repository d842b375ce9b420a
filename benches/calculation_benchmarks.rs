//! Performance benchmarks for the Childcare Benefit Engine.
//!
//! Covers a single short leave, a full-year leave, request intake, batches
//! of mixed requests, and scaling with leave length.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use childcare_benefit_engine::calculation::compute;
use childcare_benefit_engine::config::{BenefitPolicy, ConfigLoader};
use childcare_benefit_engine::intake::{LeaveRequest, calculate};
use childcare_benefit_engine::models::CalculationInput;

/// Loads the policy in force from the config directory.
fn load_policy() -> BenefitPolicy {
    let loader = ConfigLoader::load("./config").expect("Failed to load config");
    let start = NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date");
    loader.policy_for(start).expect("No policy").clone()
}

/// Creates an input of `days` leave days starting 2024-04-01.
fn create_input(salary: i64, days: u64, wants_top_up_grant: bool) -> CalculationInput {
    let start = NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date");
    CalculationInput {
        average_monthly_salary: Decimal::from(salary),
        leave_start: start,
        leave_end: start + Days::new(days.saturating_sub(1)),
        individual_monthly_salaries: None,
        wants_top_up_grant,
        spouse_condition_met: wants_top_up_grant,
    }
}

fn bench_single_month(c: &mut Criterion) {
    let policy = load_policy();
    let input = create_input(300_000, 30, true);

    c.bench_function("single_month", |b| {
        b.iter(|| compute(black_box(&input), black_box(&policy)))
    });
}

fn bench_full_year(c: &mut Criterion) {
    let policy = load_policy();
    let input = create_input(600_000, 366, true);

    c.bench_function("full_year", |b| {
        b.iter(|| compute(black_box(&input), black_box(&policy)))
    });
}

fn bench_intake(c: &mut Criterion) {
    let policy = load_policy();
    let start = NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date");
    let request = LeaveRequest {
        monthly_salaries: vec![Decimal::from(300_000); 6],
        leave_start: start,
        leave_end: start + Days::new(181),
        wants_top_up_grant: true,
        spouse_condition_met: true,
    };

    c.bench_function("intake_calculate", |b| {
        b.iter(|| calculate(black_box(&request), black_box(&policy)))
    });
}

fn bench_batch_1000(c: &mut Criterion) {
    let policy = load_policy();
    let inputs: Vec<CalculationInput> = (0..1000)
        .map(|i| create_input(150_000 + (i % 50) * 10_000, 14 + (i as u64 % 400), i % 3 == 0))
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(inputs.len() as u64));
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.iter(|| {
            inputs
                .iter()
                .map(|input| compute(black_box(input), &policy).total_benefit)
                .sum::<Decimal>()
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let policy = load_policy();
    let lengths = [14u64, 90, 180, 366, 730];

    let mut group = c.benchmark_group("scaling");

    for days in lengths.iter() {
        let input = create_input(450_000, *days, true);
        group.throughput(Throughput::Elements(*days));
        group.bench_with_input(BenchmarkId::new("leave_days", days), &input, |b, input| {
            b.iter(|| compute(black_box(input), &policy))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_month,
    bench_full_year,
    bench_intake,
    bench_batch_1000,
    bench_scaling
);
criterion_main!(benches);
