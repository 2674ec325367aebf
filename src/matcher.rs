//! Intent matcher: reconciles the external ranking service with the local
//! substring fallback so discovery search always returns something usable.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Skill, SkillSummary};
use crate::search::reconcile::{merge_with_fallback, resolve_names};

/// Narrow capability interface over the ranking service. The production
/// implementation calls the configured LLM provider; tests substitute
/// scripted rankers.
#[async_trait]
pub trait Ranker: Send + Sync {
    /// Order `candidates` by relevance to `query` and return their names,
    /// most relevant first. An empty vec means "nothing relevant".
    async fn rank(&self, query: &str, candidates: &[SkillSummary]) -> Result<Vec<String>>;
}

/// Result of one discovery invocation.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub skills: Vec<Skill>,
    /// Skills selected by the ranking service, leading the result.
    pub ranked: usize,
    /// Skills appended by the local substring fallback.
    pub fallback: usize,
    /// True when the ranking call failed or produced no usable names.
    pub degraded: bool,
}

/// Match `query` against `catalog`.
///
/// An empty or whitespace-only query returns the full catalog in its
/// original order without calling the ranker. Otherwise the ranker gets one
/// attempt with a minimal `{name, outcomes}` projection of each skill; its
/// answer is resolved by exact name and merged with the case-insensitive
/// substring fallback. Any ranker failure (transport, non-2xx, undecodable
/// output) degrades to the pure fallback. This function never returns an
/// error: the worst case is a less relevant, locally computed result.
///
/// No retries and no sequencing: concurrent invocations race, and callers
/// that overlap searches must discard results carrying a stale generation
/// token (see `AppState::next_search_generation`).
pub async fn discover(ranker: &dyn Ranker, query: &str, catalog: &[Skill]) -> MatchOutcome {
    let query = query.trim();

    if query.is_empty() {
        return MatchOutcome {
            skills: catalog.to_vec(),
            ranked: 0,
            fallback: 0,
            degraded: false,
        };
    }

    if catalog.is_empty() {
        return MatchOutcome {
            skills: Vec::new(),
            ranked: 0,
            fallback: 0,
            degraded: false,
        };
    }

    let candidates: Vec<SkillSummary> = catalog.iter().map(SkillSummary::of).collect();

    let names = match ranker.rank(query, &candidates).await {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!("Ranking service failed, using local fallback: {e:#}");
            Vec::new()
        }
    };

    let ranked = resolve_names(&names, catalog);
    let ranked_count = ranked.len();
    let skills = merge_with_fallback(catalog, &ranked, query);
    let fallback_count = skills.len() - ranked_count;

    MatchOutcome {
        skills,
        ranked: ranked_count,
        fallback: fallback_count,
        degraded: ranked_count == 0,
    }
}
