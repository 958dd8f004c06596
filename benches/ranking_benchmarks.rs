use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use rankrs::leaderboard::{CohortEntry, LeaderboardBuilder};
use rankrs::load::TrainingLoadAnalyzer;
use rankrs::models::{EventType, Gender};
use rankrs::percentile::PercentileCalculator;
use rankrs::points::RankPointEngine;
use rankrs::trend::{TrendAnalyzer, TrendPoint};

/// Performance benchmarks for the ranking and analytics engine
///
/// These benchmarks test the core calculations with varying cohort and
/// series sizes to ensure scalability.

fn create_cohort(size: usize) -> Vec<CohortEntry> {
    (0..size)
        .map(|i| CohortEntry {
            athlete_id: format!("athlete_{}", i),
            name: format!("Athlete {}", i),
            school: Some(format!("School {}", i % 20)),
            performance: Decimal::from(10_200 + ((i * 37) % 4_800) as i64),
            previous_rank: if i % 3 == 0 { None } else { Some(i as u32) },
        })
        .collect()
}

fn create_trend_series(samples: usize) -> Vec<TrendPoint> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..samples)
        .map(|i| {
            let wobble = ((i * 13) % 7) as f64 * 10.0;
            TrendPoint::new(
                start + Duration::days(i as i64 * 15),
                12_000.0 - i as f64 * 20.0 + wobble,
            )
        })
        .collect()
}

fn bench_point_scoring(c: &mut Criterion) {
    let engine = RankPointEngine::default();

    let mut group = c.benchmark_group("Point Scoring");

    for &size in &[1, 100, 1_000, 10_000] {
        let performances: Vec<Decimal> = (0..size)
            .map(|i| Decimal::from(10_200 + ((i * 37) % 4_800) as i64))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("score", size),
            &performances,
            |b, performances| {
                b.iter(|| {
                    for &performance in performances {
                        let _ = engine.score("100m", Gender::Male, black_box(performance));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_leaderboard_build(c: &mut Criterion) {
    let builder = LeaderboardBuilder::default();

    let mut group = c.benchmark_group("Leaderboard Build");

    for &size in &[10, 100, 1_000, 5_000] {
        let cohort = create_cohort(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("build", size), &cohort, |b, cohort| {
            b.iter(|| {
                let _ = builder.build(
                    black_box(cohort),
                    "100m",
                    Gender::Male,
                    EventType::Track,
                );
            });
        });
    }

    group.finish();
}

fn bench_trend_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("Trend Analysis");

    for &samples in &[5, 20, 100, 500] {
        let series = create_trend_series(samples);
        let target = series.last().map(|p| p.date).unwrap_or_default() + Duration::days(90);

        group.throughput(Throughput::Elements(samples as u64));
        group.bench_with_input(
            BenchmarkId::new("analyze", samples),
            &series,
            |b, series| {
                b.iter(|| {
                    let _ = TrendAnalyzer::analyze(black_box(series));
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("forecast", samples),
            &series,
            |b, series| {
                b.iter(|| {
                    let _ = TrendAnalyzer::forecast(black_box(series), target);
                });
            },
        );
    }

    group.finish();
}

fn bench_workload_analysis(c: &mut Criterion) {
    let analyzer = TrainingLoadAnalyzer::new();

    let mut group = c.benchmark_group("Workload Analysis");

    for &days in &[28, 90, 365] {
        let loads: Vec<f64> = (0..days).map(|i| 80.0 + ((i * 11) % 60) as f64).collect();

        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::new("acwr", days), &loads, |b, loads| {
            b.iter(|| {
                let _ = analyzer.acwr(black_box(loads));
            });
        });
    }

    group.finish();
}

fn bench_percentile(c: &mut Criterion) {
    let mut group = c.benchmark_group("Percentile");

    for &size in &[100, 1_000, 10_000] {
        let distribution: Vec<f64> = (0..size)
            .map(|i| 10_000.0 + ((i * 97) % 5_000) as f64)
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("percentile", size),
            &distribution,
            |b, distribution| {
                b.iter(|| {
                    let _ = PercentileCalculator::percentile(11_800.0, black_box(distribution));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_point_scoring,
    bench_leaderboard_build,
    bench_trend_analysis,
    bench_workload_analysis,
    bench_percentile
);
criterion_main!(benches);
