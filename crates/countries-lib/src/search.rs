use crate::country::Country;
use crate::snapshot::Snapshot;

/// Find countries matching a free-text query, in snapshot order.
///
/// A country matches when, ignoring case, its name contains the query, its
/// code equals the query, or one of its currency codes equals the query.
pub fn search<'a>(snapshot: &'a Snapshot, query: &str) -> Vec<&'a Country> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    snapshot
        .countries()
        .filter(|country| matches_query(country, &needle))
        .collect()
}

fn matches_query(country: &Country, needle: &str) -> bool {
    country.name.to_lowercase().contains(needle)
        || country.code.eq_ignore_ascii_case(needle)
        || country
            .currencies
            .keys()
            .any(|currency| currency.eq_ignore_ascii_case(needle))
}
