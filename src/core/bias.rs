use crate::core::filters::contains_ci;
use crate::models::{FilterCriteria, InterestFilterMode, Profile, ViewerPreferences};

/// Profile tags that share an interest with the viewer.
///
/// A tag is shared when it and an interest contain one another,
/// case-insensitively, in either direction.
pub fn shared_interests(profile: &Profile, preferences: &ViewerPreferences) -> Vec<String> {
    let interests: Vec<String> = preferences.interests().map(str::to_lowercase).collect();
    if interests.is_empty() {
        return Vec::new();
    }

    let mut shared: Vec<String> = Vec::new();
    for tag in &profile.expertise {
        let tag_lower = tag.to_lowercase();
        let hit = interests
            .iter()
            .any(|interest| tag_lower.contains(interest.as_str()) || interest.contains(&tag_lower));
        if hit && !shared.contains(tag) {
            shared.push(tag.clone());
        }
    }
    shared
}

/// Profiles matching `pred` first, relative order kept on both sides
fn stable_partition<F>(candidates: Vec<Profile>, pred: F) -> Vec<Profile>
where
    F: Fn(&Profile) -> bool,
{
    let (mut front, back): (Vec<Profile>, Vec<Profile>) =
        candidates.into_iter().partition(|p| pred(p));
    front.extend(back);
    front
}

/// Preference Bias Stage.
///
/// Interests are applied according to `mode`; the home-region partition
/// runs last so geography is the primary grouping. The region partition
/// is skipped when the criteria already constrain the region.
pub fn apply_preferences(
    candidates: Vec<Profile>,
    preferences: &ViewerPreferences,
    criteria: &FilterCriteria,
    mode: InterestFilterMode,
) -> Vec<Profile> {
    let mut biased = candidates;

    if preferences.interests().next().is_some() {
        biased = match mode {
            InterestFilterMode::Restrict => biased
                .into_iter()
                .filter(|p| !shared_interests(p, preferences).is_empty())
                .collect(),
            InterestFilterMode::BiasOnly => {
                stable_partition(biased, |p| !shared_interests(p, preferences).is_empty())
            }
        };
    }

    if criteria.region().is_none() {
        if let Some(home) = preferences.home_region() {
            let home = home.to_lowercase();
            biased = stable_partition(biased, |p| contains_ci(&p.location, &home));
        }
    }

    biased
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileKind;

    fn create_test_profile(id: &str, location: &str, tags: &[&str]) -> Profile {
        let mut profile = Profile::new(id, id, ProfileKind::Mentor);
        profile.location = location.to_string();
        profile.expertise = tags.iter().map(|t| t.to_string()).collect();
        profile
    }

    fn ids(profiles: &[Profile]) -> Vec<&str> {
        profiles.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_home_region_moves_ahead() {
        let candidates = vec![
            create_test_profile("accra", "Accra, Ghana", &[]),
            create_test_profile("lagos", "Lagos, Nigeria", &[]),
        ];
        let prefs = ViewerPreferences {
            interests: vec![],
            home_region: Some("Nigeria".to_string()),
        };

        let biased = apply_preferences(
            candidates,
            &prefs,
            &FilterCriteria::default(),
            InterestFilterMode::BiasOnly,
        );

        assert_eq!(ids(&biased), vec!["lagos", "accra"]);
    }

    #[test]
    fn test_region_partition_is_stable() {
        let candidates = vec![
            create_test_profile("a", "Accra, Ghana", &[]),
            create_test_profile("b", "Abuja, Nigeria", &[]),
            create_test_profile("c", "Nairobi, Kenya", &[]),
            create_test_profile("d", "Lagos, Nigeria", &[]),
        ];
        let prefs = ViewerPreferences {
            interests: vec![],
            home_region: Some("nigeria".to_string()),
        };

        let biased = apply_preferences(
            candidates,
            &prefs,
            &FilterCriteria::default(),
            InterestFilterMode::BiasOnly,
        );

        assert_eq!(ids(&biased), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_explicit_region_filter_disables_bias() {
        let candidates = vec![
            create_test_profile("accra", "Accra, Ghana", &[]),
            create_test_profile("lagos", "Lagos, Nigeria", &[]),
        ];
        let prefs = ViewerPreferences {
            interests: vec![],
            home_region: Some("Nigeria".to_string()),
        };
        let criteria = FilterCriteria {
            region: Some("a".to_string()),
            ..Default::default()
        };

        let biased = apply_preferences(candidates, &prefs, &criteria, InterestFilterMode::BiasOnly);

        assert_eq!(ids(&biased), vec!["accra", "lagos"]);
    }

    #[test]
    fn test_restrict_mode_drops_unrelated() {
        let candidates = vec![
            create_test_profile("tax", "Lagos", &["Tax Advisory"]),
            create_test_profile("esg", "Lagos", &["ESG"]),
            create_test_profile("fin", "Lagos", &["Finance"]),
        ];
        let prefs = ViewerPreferences {
            interests: vec!["tax".to_string(), "Corporate Finance".to_string()],
            home_region: None,
        };

        let biased = apply_preferences(
            candidates,
            &prefs,
            &FilterCriteria::default(),
            InterestFilterMode::Restrict,
        );

        assert_eq!(ids(&biased), vec!["tax", "fin"]);
    }

    #[test]
    fn test_bias_only_keeps_everyone() {
        let candidates = vec![
            create_test_profile("esg", "Lagos", &["ESG"]),
            create_test_profile("tax", "Lagos", &["Tax"]),
        ];
        let prefs = ViewerPreferences {
            interests: vec!["Tax".to_string()],
            home_region: None,
        };

        let biased = apply_preferences(
            candidates,
            &prefs,
            &FilterCriteria::default(),
            InterestFilterMode::BiasOnly,
        );

        assert_eq!(ids(&biased), vec!["tax", "esg"]);
    }

    #[test]
    fn test_no_preferences_pass_through() {
        let candidates = vec![
            create_test_profile("b", "Kigali", &["ESG"]),
            create_test_profile("a", "Lagos", &["Tax"]),
        ];

        let biased = apply_preferences(
            candidates.clone(),
            &ViewerPreferences::default(),
            &FilterCriteria::default(),
            InterestFilterMode::Restrict,
        );

        assert_eq!(biased, candidates);
    }

    #[test]
    fn test_shared_interests_either_direction() {
        let profile = create_test_profile("p", "Lagos", &["Tax", "International Tax Law", "ESG"]);
        let prefs = ViewerPreferences {
            interests: vec!["tax law".to_string()],
            home_region: None,
        };

        assert_eq!(
            shared_interests(&profile, &prefs),
            vec!["Tax", "International Tax Law"]
        );
    }
}
