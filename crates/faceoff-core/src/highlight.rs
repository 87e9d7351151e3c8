use serde::{Deserialize, Serialize};

use crate::matrix::ComparisonMatrix;
use crate::record::PersonaDirectory;

/// Default number of matchups surfaced by [`top_highlights`].
pub const DEFAULT_HIGHLIGHT_LIMIT: usize = 3;

/// One decisive matchup between two personas.
///
/// `leader` and `challenger` carry display names (raw ids when the
/// directory has no entry); `win_rate` is always the leader's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub leader: String,
    pub challenger: String,
    /// Absolute average score edge, ≥ 0.
    pub diff: f64,
    pub win_rate: f64,
    pub shared: usize,
}

/// Pick the top `k` most decisive matchups from the matrix.
///
/// Considers each unordered pair once (in `persona_ids` order), skips pairs
/// with no shared scenarios, and orders by edge descending with shared
/// count as the tie-break.
pub fn top_highlights(
    matrix: &ComparisonMatrix,
    persona_ids: &[String],
    directory: &PersonaDirectory,
    k: usize,
) -> Vec<Highlight> {
    let mut highlights: Vec<Highlight> = Vec::new();

    for (i, first) in persona_ids.iter().enumerate() {
        for second in &persona_ids[i + 1..] {
            let cell = matrix.cell(first, second);
            if cell.shared == 0 {
                continue;
            }
            // Sign of the row-major diff decides who leads; the leader's
            // win rate is the flipped one when the column persona leads.
            let (leader, challenger, win_rate) = if cell.average_diff >= 0.0 {
                (first, second, cell.win_rate)
            } else {
                (second, first, 1.0 - cell.win_rate)
            };
            highlights.push(Highlight {
                leader: directory.display_name(leader).to_string(),
                challenger: directory.display_name(challenger).to_string(),
                diff: cell.average_diff.abs(),
                win_rate,
                shared: cell.shared,
            });
        }
    }

    highlights.sort_by(|a, b| {
        b.diff
            .partial_cmp(&a.diff)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.shared.cmp(&a.shared))
    });
    highlights.truncate(k);
    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::persona_scenario_averages;
    use crate::matrix::{build_matrix, DEFAULT_EPSILON};
    use crate::record::{EvaluationKind, EvaluationRecord};

    fn make_record(persona: &str, target: &str, score: f64) -> EvaluationRecord {
        EvaluationRecord::new(persona, target, EvaluationKind::Algorithmic, score)
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn fixture() -> (ComparisonMatrix, Vec<String>) {
        // a ≫ c (edge 0.6), a > b (edge 0.2), b > c (edge 0.4 over 2 shared).
        let averages = persona_scenario_averages(&[
            make_record("a", "s1", 0.9),
            make_record("a", "s2", 0.8),
            make_record("b", "s1", 0.7),
            make_record("b", "s2", 0.6),
            make_record("c", "s1", 0.3),
            make_record("c", "s2", 0.2),
        ]);
        let persona_ids = ids(&["a", "b", "c"]);
        let matrix = build_matrix(&persona_ids, &averages, DEFAULT_EPSILON);
        (matrix, persona_ids)
    }

    #[test]
    fn test_ordering_by_edge() {
        let (matrix, persona_ids) = fixture();
        let highlights = top_highlights(&matrix, &persona_ids, &PersonaDirectory::new(), 3);

        assert_eq!(highlights.len(), 3);
        assert_eq!(highlights[0].leader, "a");
        assert_eq!(highlights[0].challenger, "c");
        assert!((highlights[0].diff - 0.6).abs() < 1e-9);
        assert_eq!(highlights[1].leader, "b");
        assert_eq!(highlights[1].challenger, "c");
        assert_eq!(highlights[2].leader, "a");
        assert_eq!(highlights[2].challenger, "b");
        assert!(highlights.windows(2).all(|w| w[0].diff >= w[1].diff));
    }

    #[test]
    fn test_k_truncates() {
        let (matrix, persona_ids) = fixture();
        let highlights = top_highlights(&matrix, &persona_ids, &PersonaDirectory::new(), 1);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].leader, "a");
    }

    #[test]
    fn test_leader_win_rate_is_flipped_when_column_leads() {
        // b leads a, but the (a, b) pair is visited in row-major order.
        let averages = persona_scenario_averages(&[
            make_record("a", "s1", 0.2),
            make_record("a", "s2", 0.3),
            make_record("b", "s1", 0.8),
            make_record("b", "s2", 0.9),
        ]);
        let persona_ids = ids(&["a", "b"]);
        let matrix = build_matrix(&persona_ids, &averages, DEFAULT_EPSILON);
        let highlights = top_highlights(&matrix, &persona_ids, &PersonaDirectory::new(), 3);

        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].leader, "b");
        assert_eq!(highlights[0].challenger, "a");
        assert_eq!(highlights[0].win_rate, 1.0);
    }

    #[test]
    fn test_no_overlap_pairs_are_skipped() {
        let averages = persona_scenario_averages(&[
            make_record("a", "s1", 0.9),
            make_record("b", "s2", 0.4),
        ]);
        let persona_ids = ids(&["a", "b"]);
        let matrix = build_matrix(&persona_ids, &averages, DEFAULT_EPSILON);
        let highlights = top_highlights(&matrix, &persona_ids, &PersonaDirectory::new(), 3);
        assert!(highlights.is_empty());
    }

    #[test]
    fn test_single_persona_has_no_highlights() {
        let averages = persona_scenario_averages(&[make_record("a", "s1", 0.9)]);
        let persona_ids = ids(&["a"]);
        let matrix = build_matrix(&persona_ids, &averages, DEFAULT_EPSILON);
        assert_eq!(matrix.cell("a", "a").shared, 0);
        let highlights = top_highlights(&matrix, &persona_ids, &PersonaDirectory::new(), 3);
        assert!(highlights.is_empty());
    }

    #[test]
    fn test_tie_break_by_shared_count() {
        // Two pairs with the same 0.2 edge; (a, b) shares two scenarios,
        // (c, d) only one.
        let averages = persona_scenario_averages(&[
            make_record("a", "s1", 0.8),
            make_record("a", "s2", 0.8),
            make_record("b", "s1", 0.6),
            make_record("b", "s2", 0.6),
            make_record("c", "s3", 0.8),
            make_record("d", "s3", 0.6),
        ]);
        let persona_ids = ids(&["a", "b", "c", "d"]);
        let matrix = build_matrix(&persona_ids, &averages, DEFAULT_EPSILON);
        let highlights = top_highlights(&matrix, &persona_ids, &PersonaDirectory::new(), 3);

        assert_eq!(highlights.len(), 2);
        assert_eq!(highlights[0].shared, 2);
        assert_eq!(highlights[0].leader, "a");
        assert_eq!(highlights[1].shared, 1);
        assert_eq!(highlights[1].leader, "c");
    }

    #[test]
    fn test_display_names_resolved() {
        let (matrix, persona_ids) = fixture();
        let mut directory = PersonaDirectory::new();
        directory.insert("a", "Maverick");
        let highlights = top_highlights(&matrix, &persona_ids, &directory, 1);
        assert_eq!(highlights[0].leader, "Maverick");
        assert_eq!(highlights[0].challenger, "c");
    }
}
