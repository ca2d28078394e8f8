use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polars::prelude::*;
use seasontology::{
    ComparisonView, DailySnapshot, Season, Variable, DAY_OF_YEAR, SEASON, YEAR,
};

fn synthetic_snapshot(station: &str, years: i32) -> DailySnapshot {
    let days = (years * 365) as usize;
    let seasons: Vec<&str> = (0..days)
        .map(|i| {
            let month = ((i % 365) / 31) as u32 + 1;
            Season::from_month(month.min(12)).map_or("Winter (DJF)", Season::label)
        })
        .collect();
    let day_of_year: Vec<i32> = (0..days).map(|i| (i % 365) as i32 + 1).collect();
    let year: Vec<i32> = (0..days).map(|i| 2000 + (i / 365) as i32).collect();
    let max_temp: Vec<f64> = (0..days)
        .map(|i| 50.0 + 40.0 * ((i % 365) as f64 / 58.0).sin())
        .collect();
    let frame = df!(
        SEASON => seasons,
        DAY_OF_YEAR => day_of_year,
        YEAR => year,
        Variable::MaxTempF.column_name() => max_temp,
    )
    .unwrap();
    DailySnapshot::new(station, 2024, frame)
}

fn bench_comparison(c: &mut Criterion) {
    let snapshots = [synthetic_snapshot("CMI", 75), synthetic_snapshot("MRY", 80)];
    c.bench_function("season_from_month", |b| {
        b.iter(|| (1..=12).filter_map(|m| Season::from_month(black_box(m))).count())
    });
    c.bench_function("comparison_view_build", |b| {
        b.iter(|| ComparisonView::build(black_box(&snapshots), Variable::MaxTempF))
    });
}

criterion_group!(benches, bench_comparison);
criterion_main!(benches);
