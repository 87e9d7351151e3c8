use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

/// A reviewer preference recorded from a double-blind A/B comparison pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonVote {
    pub id: String,
    pub pair_id: String,
    pub target_id: String,
    pub winner_persona_id: String,
    pub loser_persona_id: String,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub reviewer: Option<String>,
    /// Reviewer-reported confidence in [0, 1].
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl ComparisonVote {
    pub fn new(
        pair_id: impl Into<String>,
        target_id: impl Into<String>,
        winner_persona_id: impl Into<String>,
        loser_persona_id: impl Into<String>,
    ) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            pair_id: pair_id.into(),
            target_id: target_id.into(),
            winner_persona_id: winner_persona_id.into(),
            loser_persona_id: loser_persona_id.into(),
            recorded_at: Utc::now(),
            reviewer: None,
            confidence: None,
        }
    }
}

/// Restriction applied to the vote list before ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteFilter {
    pub target_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Bradley–Terry solver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolverOptions {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSummary {
    pub total_votes: usize,
    pub pair_count: usize,
    pub persona_count: usize,
    pub last_vote_recorded_at: Option<DateTime<Utc>>,
    pub converged: bool,
    pub iterations: usize,
}

/// Normalized Bradley–Terry strengths per persona, plus run statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    pub rankings: BTreeMap<String, f64>,
    pub summary: RankingSummary,
}

impl RankingReport {
    fn empty(total_votes: usize, pair_count: usize) -> Self {
        Self {
            rankings: BTreeMap::new(),
            summary: RankingSummary {
                total_votes,
                pair_count,
                persona_count: 0,
                last_vote_recorded_at: None,
                converged: true,
                iterations: 0,
            },
        }
    }
}

/// Rank personas from reviewer votes via iterative Bradley–Terry fitting.
///
/// Strengths start uniform, get renormalized to sum 1 every iteration, and
/// a small prior keeps personas with zero wins away from exact zero. An
/// empty (or fully filtered-out) vote list yields an empty report, never an
/// error.
pub fn rank_personas(
    votes: &[ComparisonVote],
    filter: &VoteFilter,
    options: &SolverOptions,
) -> RankingReport {
    let votes: Vec<&ComparisonVote> = votes
        .iter()
        .filter(|vote| match &filter.target_id {
            Some(target_id) => vote.target_id == *target_id,
            None => true,
        })
        .collect();

    if votes.is_empty() {
        return RankingReport::empty(0, 0);
    }

    let mut win_counts: BTreeMap<&str, BTreeMap<&str, u32>> = BTreeMap::new();
    let mut personas: Vec<&str> = Vec::new();
    let mut pair_ids: Vec<&str> = Vec::new();
    let mut last_recorded_at: Option<DateTime<Utc>> = None;

    for vote in &votes {
        for persona in [&vote.winner_persona_id, &vote.loser_persona_id] {
            if !personas.contains(&persona.as_str()) {
                personas.push(persona);
            }
        }
        *win_counts
            .entry(&vote.winner_persona_id)
            .or_default()
            .entry(&vote.loser_persona_id)
            .or_insert(0) += 1;
        if !pair_ids.contains(&vote.pair_id.as_str()) {
            pair_ids.push(&vote.pair_id);
        }
        if last_recorded_at.map_or(true, |latest| vote.recorded_at > latest) {
            last_recorded_at = Some(vote.recorded_at);
        }
    }

    let (strengths, iterations, converged) =
        solve_bradley_terry(&win_counts, &personas, options);

    RankingReport {
        rankings: strengths
            .into_iter()
            .map(|(id, strength)| (id.to_string(), strength))
            .collect(),
        summary: RankingSummary {
            total_votes: votes.len(),
            pair_count: pair_ids.len(),
            persona_count: personas.len(),
            last_vote_recorded_at: last_recorded_at,
            converged,
            iterations,
        },
    }
}

fn solve_bradley_terry<'a>(
    win_counts: &BTreeMap<&'a str, BTreeMap<&'a str, u32>>,
    personas: &[&'a str],
    options: &SolverOptions,
) -> (BTreeMap<&'a str, f64>, usize, bool) {
    if personas.is_empty() {
        return (BTreeMap::new(), 0, true);
    }

    let uniform = 1.0 / personas.len() as f64;
    let prior = 1e-6;
    let mut strengths: BTreeMap<&str, f64> =
        personas.iter().map(|p| (*p, uniform)).collect();

    let wins_of = |persona: &str| -> f64 {
        win_counts
            .get(persona)
            .map(|row| row.values().map(|w| *w as f64).sum())
            .unwrap_or(0.0)
    };
    let head_to_head = |a: &str, b: &str| -> f64 {
        let ab = win_counts.get(a).and_then(|r| r.get(b)).copied().unwrap_or(0);
        let ba = win_counts.get(b).and_then(|r| r.get(a)).copied().unwrap_or(0);
        (ab + ba) as f64
    };

    for iteration in 1..=options.max_iterations {
        let mut updated: BTreeMap<&str, f64> = BTreeMap::new();

        for persona in personas {
            let wins = wins_of(persona) + prior;
            let mut denominator = 0.0;
            for opponent in personas {
                if opponent == persona {
                    continue;
                }
                let total = head_to_head(persona, opponent);
                if total == 0.0 {
                    continue;
                }
                denominator += total / (strengths[persona] + strengths[opponent]);
            }
            let strength = if denominator == 0.0 {
                strengths[persona]
            } else {
                wins / denominator
            };
            updated.insert(*persona, strength);
        }

        let total: f64 = updated.values().sum();
        if total <= 0.0 {
            for persona in personas {
                updated.insert(*persona, uniform);
            }
        } else {
            for value in updated.values_mut() {
                *value /= total;
            }
        }

        let max_diff = personas
            .iter()
            .map(|p| (updated[*p] - strengths[*p]).abs())
            .fold(0.0f64, f64::max);

        strengths = updated;
        if max_diff < options.tolerance {
            return (strengths, iteration, true);
        }
    }

    (strengths, options.max_iterations, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_vote(pair: &str, target: &str, winner: &str, loser: &str) -> ComparisonVote {
        ComparisonVote::new(pair, target, winner, loser)
    }

    #[test]
    fn test_empty_votes_yield_empty_report() {
        let report = rank_personas(&[], &VoteFilter::default(), &SolverOptions::default());
        assert!(report.rankings.is_empty());
        assert_eq!(report.summary.total_votes, 0);
        assert!(report.summary.converged);
        assert_eq!(report.summary.iterations, 0);
    }

    #[test]
    fn test_dominant_persona_outranks() {
        let votes = vec![
            make_vote("pair-1", "s1", "a", "b"),
            make_vote("pair-2", "s1", "a", "b"),
            make_vote("pair-3", "s1", "a", "b"),
            make_vote("pair-4", "s1", "b", "a"),
        ];
        let report = rank_personas(&votes, &VoteFilter::default(), &SolverOptions::default());

        assert_eq!(report.summary.total_votes, 4);
        assert_eq!(report.summary.pair_count, 4);
        assert_eq!(report.summary.persona_count, 2);
        assert!(report.summary.converged);
        assert!(report.rankings["a"] > report.rankings["b"]);

        let total: f64 = report.rankings.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_even_record_gives_even_strengths() {
        let votes = vec![
            make_vote("pair-1", "s1", "a", "b"),
            make_vote("pair-2", "s1", "b", "a"),
        ];
        let report = rank_personas(&votes, &VoteFilter::default(), &SolverOptions::default());
        assert!((report.rankings["a"] - report.rankings["b"]).abs() < 1e-6);
    }

    #[test]
    fn test_target_filter_restricts_votes() {
        let votes = vec![
            make_vote("pair-1", "s1", "a", "b"),
            make_vote("pair-2", "s2", "c", "d"),
        ];
        let filter = VoteFilter {
            target_id: Some("s2".into()),
        };
        let report = rank_personas(&votes, &filter, &SolverOptions::default());
        assert_eq!(report.summary.total_votes, 1);
        assert_eq!(report.summary.persona_count, 2);
        assert!(report.rankings.contains_key("c"));
        assert!(!report.rankings.contains_key("a"));
    }

    #[test]
    fn test_filter_matching_nothing_is_empty_report() {
        let votes = vec![make_vote("pair-1", "s1", "a", "b")];
        let filter = VoteFilter {
            target_id: Some("s9".into()),
        };
        let report = rank_personas(&votes, &filter, &SolverOptions::default());
        assert!(report.rankings.is_empty());
        assert!(report.summary.converged);
    }

    #[test]
    fn test_last_vote_timestamp_tracked() {
        let mut early = make_vote("pair-1", "s1", "a", "b");
        early.recorded_at = "2026-01-01T00:00:00Z".parse().unwrap();
        let mut late = make_vote("pair-2", "s1", "b", "a");
        late.recorded_at = "2026-02-01T00:00:00Z".parse().unwrap();

        let report = rank_personas(
            &[late.clone(), early],
            &VoteFilter::default(),
            &SolverOptions::default(),
        );
        assert_eq!(
            report.summary.last_vote_recorded_at,
            Some(late.recorded_at)
        );
    }

    #[test]
    fn test_iteration_cap_reported() {
        let votes = vec![
            make_vote("pair-1", "s1", "a", "b"),
            make_vote("pair-2", "s1", "a", "b"),
            make_vote("pair-3", "s1", "b", "c"),
        ];
        let options = SolverOptions {
            max_iterations: 1,
            tolerance: 1e-12,
        };
        let report = rank_personas(&votes, &VoteFilter::default(), &options);
        assert!(!report.summary.converged);
        assert_eq!(report.summary.iterations, 1);
    }
}
