use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use energy_dashboard::models::{EnergyDataset, EnergyReading};
use energy_dashboard::processors::{summarize_sources, BucketAggregator};
use energy_dashboard::utils::{parse_kwh, parse_timestamp};

// Hourly readings for each building over a number of days
fn create_test_dataset(source_count: usize, days: usize) -> EnergyDataset {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut readings = Vec::with_capacity(source_count * days * 24);

    for source in 0..source_count {
        let name = format!("Building{:03}", source);
        for hour in 0..days * 24 {
            let timestamp = start + Duration::hours(hour as i64);
            let kwh = 1.0 + (hour % 24) as f64 * 0.25 + source as f64 * 0.1;
            readings.push(EnergyReading::new(timestamp, kwh, name.as_str()));
        }
    }

    EnergyDataset::from_readings(readings)
}

fn benchmark_daily_totals(c: &mut Criterion) {
    let dataset = create_test_dataset(10, 90);
    let aggregator = BucketAggregator::new();

    c.bench_function("daily_totals", |b| {
        b.iter(|| black_box(aggregator.daily_totals(black_box(&dataset))))
    });
}

fn benchmark_weekly_totals(c: &mut Criterion) {
    let dataset = create_test_dataset(10, 90);
    let aggregator = BucketAggregator::new();

    c.bench_function("weekly_totals", |b| {
        b.iter(|| black_box(aggregator.weekly_totals(black_box(&dataset))))
    });
}

fn benchmark_source_summary(c: &mut Criterion) {
    let dataset = create_test_dataset(10, 90);

    c.bench_function("source_summary", |b| {
        b.iter(|| black_box(summarize_sources(black_box(&dataset))))
    });
}

fn benchmark_cell_coercion(c: &mut Criterion) {
    let cells = [
        ("2024-01-01 08:15:00", "4.25"),
        ("2024-01-01T08:15:00+02:00", "1e3"),
        ("01/31/2024 23:00", "-0.5"),
        ("2024-01-01", "12"),
        ("not-a-date", "n/a"),
    ];

    c.bench_function("cell_coercion", |b| {
        b.iter(|| {
            let mut kept = 0;
            for (ts, kwh) in &cells {
                if parse_timestamp(black_box(ts)).is_some() && parse_kwh(black_box(kwh)).is_some() {
                    kept += 1;
                }
            }
            black_box(kept)
        })
    });
}

fn benchmark_varying_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation_by_size");

    for &size in &[1, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::new("sources", size), &size, |b, &source_count| {
            let dataset = create_test_dataset(source_count, 30);
            let aggregator = BucketAggregator::new();

            b.iter(|| {
                let daily = aggregator.daily_totals(&dataset);
                let weekly = aggregator.weekly_totals(&dataset);
                let summary = summarize_sources(&dataset);
                black_box((daily.buckets().len(), weekly.buckets().len(), summary.len()))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_daily_totals,
    benchmark_weekly_totals,
    benchmark_source_summary,
    benchmark_cell_coercion,
    benchmark_varying_data_sizes
);
criterion_main!(benches);
