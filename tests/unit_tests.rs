// Unit tests for the One Africa Hub matching pipeline

use africa_hub::core::{
    bias::apply_preferences,
    filters::filter_directory,
    pagination::paginate,
    ConnectionBook,
};
use africa_hub::models::{
    Availability, AvailabilityFilter, ConnectionStatus, FilterCriteria, InterestFilterMode,
    Profile, ProfileKind, ViewerPreferences,
};

fn profile(id: &str, name: &str, tags: &[&str], location: &str) -> Profile {
    let mut profile = Profile::new(id, name, ProfileKind::Expert);
    profile.expertise = tags.iter().map(|t| t.to_string()).collect();
    profile.location = location.to_string();
    profile
}

#[test]
fn test_query_finds_tax_expert() {
    let directory = vec![
        profile("1", "Amara", &["Tax"], ""),
        profile("2", "Thabo", &["ESG"], ""),
    ];
    let criteria = FilterCriteria {
        query: Some("tax".to_string()),
        ..Default::default()
    };

    let filtered = filter_directory(&directory, &criteria);

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Amara");
}

#[test]
fn test_available_only_drops_busy_profile() {
    let mut busy = profile("1", "Kwame", &["Audit"], "Accra, Ghana");
    busy.availability = Availability::Busy;
    let directory = vec![busy, profile("2", "Fatou", &["Law"], "Dakar, Senegal")];

    let criteria = FilterCriteria {
        availability: AvailabilityFilter::AvailableOnly,
        ..Default::default()
    };
    let filtered = filter_directory(&directory, &criteria);

    assert!(filtered.iter().all(|p| p.name != "Kwame"));
    assert_eq!(filtered.len(), 1);
}

#[test]
fn test_thirteen_ranked_profiles_paginate_by_six() {
    let ranked: Vec<Profile> = (0..13)
        .map(|i| profile(&i.to_string(), "P", &[], ""))
        .collect();

    let sizes: Vec<usize> = (1..=4).map(|page| paginate(&ranked, page, 6).items.len()).collect();

    assert_eq!(sizes, vec![6, 6, 1, 0]);
}

#[test]
fn test_home_region_bias_moves_lagos_first() {
    let directory = vec![
        profile("accra", "Kojo", &[], "Accra, Ghana"),
        profile("lagos", "Ngozi", &[], "Lagos, Nigeria"),
    ];
    let prefs = ViewerPreferences {
        interests: vec![],
        home_region: Some("Nigeria".to_string()),
    };

    let biased = apply_preferences(
        directory.clone(),
        &prefs,
        &FilterCriteria::default(),
        InterestFilterMode::BiasOnly,
    );

    assert_eq!(biased[0].id, "lagos");
    assert_eq!(biased[1].id, "accra");

    let mut before: Vec<&str> = directory.iter().map(|p| p.id.as_str()).collect();
    let mut after: Vec<&str> = biased.iter().map(|p| p.id.as_str()).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn test_connection_request_then_owner_approval() {
    let mut book = ConnectionBook::new();
    book.request("viewer-v", "owner-p", "I'd like your guidance on VAT").unwrap();

    assert_eq!(book.status("viewer-v", "owner-p"), ConnectionStatus::Pending);

    let approved = book.approve("owner-p", "viewer-v", "owner-p").unwrap();

    assert_eq!(approved.status, ConnectionStatus::Approved);
    assert_eq!(book.connected("owner-p"), vec!["viewer-v"]);
    assert_eq!(book.connected("viewer-v"), vec!["owner-p"]);
    assert!(book.connected("someone-else").is_empty());
    assert_eq!(book.status("owner-p", "viewer-v"), ConnectionStatus::None);
    assert!(book.pending_for("owner-p").is_empty());
}
