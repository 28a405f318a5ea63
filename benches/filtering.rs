//! Benchmarks for quest list filtering.
//!
//! These benchmarks measure the tab/status partition projections and the
//! difficulty star formatting over a large quest list.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

struct Quest {
    is_main_quest: bool,
    is_active: bool,
    difficulty: u8,
}

fn quest_list(count: usize) -> Vec<Quest> {
    (0..count)
        .map(|i| Quest {
            is_main_quest: i % 2 == 0,
            is_active: i % 3 != 0,
            difficulty: (i % 5 + 1) as u8,
        })
        .collect()
}

fn bench_tab_partition(c: &mut Criterion) {
    let quests = quest_list(1000);
    c.bench_function("partition_main_quests", |b| {
        b.iter(|| {
            black_box(&quests)
                .iter()
                .filter(|q| q.is_main_quest)
                .count()
        })
    });
}

fn bench_status_partition(c: &mut Criterion) {
    let quests = quest_list(1000);
    c.bench_function("partition_active_main_quests", |b| {
        b.iter(|| {
            black_box(&quests)
                .iter()
                .filter(|q| q.is_main_quest)
                .filter(|q| q.is_active)
                .count()
        })
    });
}

fn bench_difficulty_stars(c: &mut Criterion) {
    let quests = quest_list(1000);
    c.bench_function("format_difficulty_stars", |b| {
        b.iter(|| {
            black_box(&quests)
                .iter()
                .map(|q| {
                    let filled = q.difficulty.min(5) as usize;
                    let mut stars = "★".repeat(filled);
                    stars.push_str(&"☆".repeat(5 - filled));
                    stars
                })
                .count()
        })
    });
}

criterion_group!(
    benches,
    bench_tab_partition,
    bench_status_partition,
    bench_difficulty_stars
);
criterion_main!(benches);
