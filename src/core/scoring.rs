use rand::Rng;
use crate::core::bias::shared_interests;
use crate::models::{Profile, RankedCandidate, ScoreSource, ScoringWeights, ViewerPreferences};

/// Shared interests beyond this count add nothing
const MAX_COUNTED_OVERLAP: usize = 5;

/// Range of the legacy placeholder score for unrated profiles
const PLACEHOLDER_SCORE_MIN: u8 = 80;
const PLACEHOLDER_SCORE_MAX: u8 = 100;

/// Calculate a match score (0-100) for a profile
///
/// `Relevance` scoring formula:
/// score = (
///     overlap_score * overlap_weight + # shared interests / declared interests, capped at 5
///     rating / 5.0 * rating_weight    # missing rating counts as 0
/// ) * 100
///
/// `Declared` uses the rating scaled to 0-100, or draws from `rng` when
/// the profile has no rating.
pub fn calculate_match_score<R: Rng + ?Sized>(
    profile: &Profile,
    preferences: &ViewerPreferences,
    source: ScoreSource,
    weights: &ScoringWeights,
    rng: &mut R,
) -> (u8, Vec<String>) {
    let shared = shared_interests(profile, preferences);

    let score = match source {
        ScoreSource::Relevance => {
            let interest_count = preferences.interests().count();
            let overlap_score = calculate_overlap_score(shared.len(), interest_count);
            let rating_score = profile.rating.map(|r| r / 5.0).unwrap_or(0.0);

            to_percent(overlap_score * weights.tag_overlap + rating_score * weights.rating)
        }
        ScoreSource::Declared => match profile.rating {
            Some(rating) => to_percent(rating / 5.0),
            None => rng.random_range(PLACEHOLDER_SCORE_MIN..=PLACEHOLDER_SCORE_MAX),
        },
    };

    (score, shared)
}

/// Overlap score (0-1), diminishing once more than five interests are shared
#[inline]
fn calculate_overlap_score(shared: usize, declared: usize) -> f64 {
    let cap = declared.min(MAX_COUNTED_OVERLAP);
    if cap == 0 {
        return 0.0;
    }
    shared.min(cap) as f64 / cap as f64
}

#[inline]
fn to_percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Ranking Stage: score every candidate and sort descending.
///
/// The sort is stable, so equal scores keep their incoming order.
pub fn rank_candidates<R: Rng + ?Sized>(
    candidates: Vec<Profile>,
    preferences: &ViewerPreferences,
    source: ScoreSource,
    weights: &ScoringWeights,
    rng: &mut R,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|profile| {
            let (match_score, shared_interests) =
                calculate_match_score(&profile, preferences, source, weights, &mut *rng);
            RankedCandidate {
                profile,
                match_score,
                shared_interests,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_profile(id: &str, rating: Option<f64>, tags: &[&str]) -> Profile {
        let mut profile = Profile::new(id, id, ProfileKind::Expert);
        profile.rating = rating;
        profile.expertise = tags.iter().map(|t| t.to_string()).collect();
        profile
    }

    fn tax_viewer() -> ViewerPreferences {
        ViewerPreferences {
            interests: vec!["Tax".to_string()],
            home_region: None,
        }
    }

    #[test]
    fn test_relevance_score_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let profile = create_test_profile("p", Some(5.0), &["Tax"]);

        let (score, shared) = calculate_match_score(
            &profile,
            &tax_viewer(),
            ScoreSource::Relevance,
            &ScoringWeights::default(),
            &mut rng,
        );

        assert_eq!(score, 100);
        assert_eq!(shared, vec!["Tax"]);
    }

    #[test]
    fn test_relevance_prefers_overlap() {
        let mut rng = StdRng::seed_from_u64(7);
        let weights = ScoringWeights::default();
        let sharing = create_test_profile("a", Some(3.0), &["Tax"]);
        let unrelated = create_test_profile("b", Some(3.0), &["ESG"]);

        let (shared_score, _) =
            calculate_match_score(&sharing, &tax_viewer(), ScoreSource::Relevance, &weights, &mut rng);
        let (other_score, _) =
            calculate_match_score(&unrelated, &tax_viewer(), ScoreSource::Relevance, &weights, &mut rng);

        assert!(shared_score > other_score);
        assert_eq!(other_score, 24);
    }

    #[test]
    fn test_declared_scales_rating() {
        let mut rng = StdRng::seed_from_u64(7);
        let profile = create_test_profile("p", Some(4.5), &[]);

        let (score, _) = calculate_match_score(
            &profile,
            &ViewerPreferences::default(),
            ScoreSource::Declared,
            &ScoringWeights::default(),
            &mut rng,
        );

        assert_eq!(score, 90);
    }

    #[test]
    fn test_declared_placeholder_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let profile = create_test_profile("p", None, &[]);

        for _ in 0..200 {
            let (score, _) = calculate_match_score(
                &profile,
                &ViewerPreferences::default(),
                ScoreSource::Declared,
                &ScoringWeights::default(),
                &mut rng,
            );
            assert!((80..=100).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn test_overlap_score() {
        assert_eq!(calculate_overlap_score(0, 0), 0.0);
        assert_eq!(calculate_overlap_score(1, 2), 0.5);
        assert_eq!(calculate_overlap_score(7, 9), 1.0);
        assert_eq!(calculate_overlap_score(3, 9), 0.6);
    }

    #[test]
    fn test_ranking_is_stable_for_ties() {
        let mut rng = StdRng::seed_from_u64(1);
        let candidates = vec![
            create_test_profile("first", Some(4.0), &[]),
            create_test_profile("top", Some(5.0), &[]),
            create_test_profile("second", Some(4.0), &[]),
            create_test_profile("third", Some(4.0), &[]),
        ];

        let ranked = rank_candidates(
            candidates,
            &ViewerPreferences::default(),
            ScoreSource::Relevance,
            &ScoringWeights::default(),
            &mut rng,
        );

        let order: Vec<&str> = ranked.iter().map(|r| r.profile.id.as_str()).collect();
        assert_eq!(order, vec!["top", "first", "second", "third"]);
    }
}
