use crate::models::{AvailabilityFilter, FilterCriteria, Profile};

/// Case-insensitive substring test; `needle` is expected lowercased
#[inline]
pub(crate) fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Free-text match against name, any title, or any expertise tag.
///
/// Tags match in either direction: the tag contains the query or the
/// query contains the tag.
#[inline]
pub fn matches_query(profile: &Profile, query: &str) -> bool {
    let needle = query.to_lowercase();

    contains_ci(&profile.name, &needle)
        || profile.titles.iter().any(|t| contains_ci(t, &needle))
        || profile.expertise.iter().any(|tag| {
            let tag = tag.trim().to_lowercase();
            tag.contains(&needle) || (!tag.is_empty() && needle.contains(&tag))
        })
}

/// The dedicated expertise field requires exact tag membership
#[inline]
pub fn matches_expertise(profile: &Profile, expertise: &str) -> bool {
    profile.expertise.iter().any(|tag| tag == expertise)
}

/// Region constraint: case-insensitive substring of the location
#[inline]
pub fn matches_region(profile: &Profile, region: &str) -> bool {
    contains_ci(&profile.location, &region.to_lowercase())
}

#[inline]
pub fn matches_availability(profile: &Profile, filter: AvailabilityFilter) -> bool {
    match filter {
        AvailabilityFilter::All => true,
        AvailabilityFilter::AvailableOnly => profile.availability.is_available(),
    }
}

/// True when the profile satisfies every supplied constraint
pub fn matches_criteria(profile: &Profile, criteria: &FilterCriteria) -> bool {
    if let Some(query) = criteria.query() {
        if !matches_query(profile, query) {
            return false;
        }
    }

    if let Some(expertise) = criteria.expertise() {
        if !matches_expertise(profile, expertise) {
            return false;
        }
    }

    if let Some(region) = criteria.region() {
        if !matches_region(profile, region) {
            return false;
        }
    }

    matches_availability(profile, criteria.availability)
}

/// Filter Stage: the subsequence of `directory` satisfying all criteria,
/// in directory order.
pub fn filter_directory(directory: &[Profile], criteria: &FilterCriteria) -> Vec<Profile> {
    directory
        .iter()
        .filter(|profile| matches_criteria(profile, criteria))
        .cloned()
        .collect()
}
