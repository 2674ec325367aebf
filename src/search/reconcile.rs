use std::collections::HashSet;

use crate::models::Skill;
use crate::search::fallback::substring_scan;

/// Resolve names returned by the ranking service against the catalog.
///
/// Matching is by exact name: the service is untrusted to emit only real
/// names, so anything unknown is silently dropped. Duplicates collapse to
/// their first occurrence so a skill can never appear twice downstream.
/// Order follows the service's ranking.
pub fn resolve_names<'a>(names: &[String], skills: &'a [Skill]) -> Vec<&'a Skill> {
    let mut seen: HashSet<&str> = HashSet::new();
    names
        .iter()
        .filter_map(|name| skills.iter().find(|s| &s.name == name))
        .filter(|s| seen.insert(s.name.as_str()))
        .collect()
}

/// Merge the resolved ranking with the local substring fallback.
///
/// - Ranked skills come first, in the order the service returned them.
/// - Every skill whose name or description contains the query (case-
///   insensitively) and that the ranking missed is appended in catalog
///   order, so an obviously relevant skill is never dropped.
/// - Zero resolved skills means the ranking produced nothing usable; the
///   result is then the plain substring match over the whole catalog.
pub fn merge_with_fallback(catalog: &[Skill], ranked: &[&Skill], query: &str) -> Vec<Skill> {
    if ranked.is_empty() {
        return substring_scan(catalog, query)
            .into_iter()
            .cloned()
            .collect();
    }

    let selected: HashSet<&str> = ranked.iter().map(|s| s.name.as_str()).collect();

    let mut results: Vec<Skill> = ranked.iter().map(|s| (*s).clone()).collect();
    results.extend(
        substring_scan(catalog, query)
            .into_iter()
            .filter(|s| !selected.contains(s.name.as_str()))
            .cloned(),
    );
    results
}
