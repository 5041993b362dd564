use std::cmp::Ordering;

use crate::model::{normalize_for_search, Profile};

/// Orders every profile by `(name matches, email matches, name)`, highest first.
///
/// Nothing is filtered out: profiles that match neither field still appear, after the ones
/// that do. The sort is stable, so equal keys keep their discovery order. An empty query
/// matches every name and email, which leaves reverse-alphabetical order by name.
pub fn rank(profiles: &[Profile], query: &str) -> Vec<Profile> {
    let normalized_query = normalize_for_search(query);

    let mut keyed: Vec<(RankKey<'_>, &Profile)> = profiles
        .iter()
        .map(|profile| (rank_key(profile, &normalized_query), profile))
        .collect();

    keyed.sort_by(|a, b| compare_descending(&a.0, &b.0));

    keyed
        .into_iter()
        .map(|(_, profile)| profile.clone())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey<'a> {
    name_match: bool,
    email_match: bool,
    name: &'a str,
}

fn rank_key<'a>(profile: &'a Profile, normalized_query: &str) -> RankKey<'a> {
    RankKey {
        name_match: profile.normalized_name().contains(normalized_query),
        email_match: profile.normalized_email().contains(normalized_query),
        name: profile.normalized_name(),
    }
}

fn compare_descending(a: &RankKey<'_>, b: &RankKey<'_>) -> Ordering {
    b.cmp(a)
}
