// Criterion benchmarks for the directory pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use africa_hub::core::{filter_directory, paginate, Matcher};
use africa_hub::models::{
    Availability, AvailabilityFilter, FilterCriteria, InterestFilterMode, Profile, ProfileKind,
    ViewerPreferences,
};

const TAGS: &[&str] = &["Tax", "ESG", "Audit", "Fintech", "Corporate Law", "Logistics"];
const LOCATIONS: &[&str] = &["Lagos, Nigeria", "Accra, Ghana", "Nairobi, Kenya", "Dakar, Senegal"];

fn create_profile(id: usize) -> Profile {
    let mut profile = Profile::new(format!("expert-{}", id), format!("Expert {}", id), ProfileKind::Expert);
    profile.titles = vec!["Consultant".to_string()];
    profile.expertise = vec![
        TAGS[id % TAGS.len()].to_string(),
        TAGS[(id / 3) % TAGS.len()].to_string(),
    ];
    profile.location = LOCATIONS[id % LOCATIONS.len()].to_string();
    profile.rating = Some(3.0 + (id % 20) as f64 / 10.0);
    profile.availability = match id % 3 {
        0 => Availability::Available,
        1 => Availability::Limited,
        _ => Availability::Busy,
    };
    profile
}

fn create_directory(size: usize) -> Vec<Profile> {
    (0..size).map(create_profile).collect()
}

fn create_preferences() -> ViewerPreferences {
    ViewerPreferences {
        interests: vec!["tax".to_string(), "esg".to_string()],
        home_region: Some("Nigeria".to_string()),
    }
}

fn bench_filter(c: &mut Criterion) {
    let directory = create_directory(1000);
    let criteria = FilterCriteria {
        query: Some("tax".to_string()),
        availability: AvailabilityFilter::AvailableOnly,
        ..Default::default()
    };

    c.bench_function("filter_directory_1000", |b| {
        b.iter(|| filter_directory(black_box(&directory), black_box(&criteria)));
    });
}

fn bench_find_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_matches");
    let preferences = create_preferences();
    let criteria = FilterCriteria::default();

    for size in [10, 100, 1000, 10000].iter() {
        let directory = create_directory(*size);

        group.bench_with_input(BenchmarkId::new("bias_only", size), size, |b, _| {
            let matcher = Matcher::with_default_weights();
            b.iter(|| {
                matcher.find_matches(
                    black_box(&directory),
                    black_box(&criteria),
                    black_box(&preferences),
                    1,
                    None,
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("restrict", size), size, |b, _| {
            let matcher = Matcher::with_default_weights().with_interest_mode(InterestFilterMode::Restrict);
            b.iter(|| {
                matcher.find_matches(
                    black_box(&directory),
                    black_box(&criteria),
                    black_box(&preferences),
                    1,
                    None,
                )
            });
        });
    }

    group.finish();
}

fn bench_paginate(c: &mut Criterion) {
    let directory = create_directory(10000);

    c.bench_function("paginate_10000", |b| {
        b.iter(|| paginate(black_box(&directory), black_box(800), black_box(6)));
    });
}

criterion_group!(benches, bench_filter, bench_find_matches, bench_paginate);
criterion_main!(benches);
