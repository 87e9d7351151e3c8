use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::PersonaScenarioAverages;
use crate::record::PersonaDirectory;

/// Score deltas smaller than this count as a tie between two personas.
///
/// Inherited default; tune via [`build_matrix`]'s `epsilon` parameter if
/// scores are not normalized to [0, 1].
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// One ordered-pair entry of the comparison matrix.
///
/// `shared == 0` is the "no overlap" sentinel: both `win_rate` and
/// `average_diff` are forced to zero because no comparison is possible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    /// Number of scenarios both personas have averages for.
    pub shared: usize,
    /// Fraction of shared scenarios won by the row persona, ties at half
    /// weight. In [0, 1].
    pub win_rate: f64,
    /// Signed mean of (row average − column average) over shared scenarios.
    pub average_diff: f64,
}

impl MatrixCell {
    pub const ZERO: MatrixCell = MatrixCell {
        shared: 0,
        win_rate: 0.0,
        average_diff: 0.0,
    };
}

impl Default for MatrixCell {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Full N×N pairwise comparison matrix, stored sparsely.
///
/// Both orders of every pair are stored so per-row display lookups stay
/// O(log n) without sign/flip bookkeeping; N is small in practice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMatrix {
    cells: BTreeMap<String, BTreeMap<String, MatrixCell>>,
}

impl ComparisonMatrix {
    /// Cell for an ordered (row, column) pair. Absent pairs read as the
    /// zero cell, preserving the absence-is-not-data distinction without
    /// forcing callers to handle an Option.
    pub fn cell(&self, row: &str, col: &str) -> MatrixCell {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(MatrixCell::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn insert(&mut self, row: &str, col: &str, cell: MatrixCell) {
        self.cells
            .entry(row.to_string())
            .or_default()
            .insert(col.to_string(), cell);
    }
}

/// Distinct persona ids present in the averages, sorted by display name
/// (raw id when unresolved), ties broken by id so the order is total.
pub fn comparison_persona_ids(
    averages: &PersonaScenarioAverages,
    directory: &PersonaDirectory,
) -> Vec<String> {
    let mut ids: Vec<String> = averages.keys().cloned().collect();
    ids.sort_by(|a, b| {
        directory
            .display_name(a)
            .cmp(directory.display_name(b))
            .then_with(|| a.cmp(b))
    });
    ids
}

/// Build the pairwise win-rate / average-edge matrix.
///
/// For each ordered pair the cell covers the scenarios both personas have
/// averages for; a delta within `epsilon` of zero contributes half a win
/// to each side.
pub fn build_matrix(
    persona_ids: &[String],
    averages: &PersonaScenarioAverages,
    epsilon: f64,
) -> ComparisonMatrix {
    let mut matrix = ComparisonMatrix::default();
    let empty = BTreeMap::new();

    for row in persona_ids {
        let row_avgs = averages.get(row).unwrap_or(&empty);
        for col in persona_ids {
            if row == col {
                matrix.insert(row, col, MatrixCell::ZERO);
                continue;
            }
            let col_avgs = averages.get(col).unwrap_or(&empty);

            let mut shared = 0usize;
            let mut wins = 0.0f64;
            let mut diff_sum = 0.0f64;
            for (target_id, row_avg) in row_avgs {
                let Some(col_avg) = col_avgs.get(target_id) else {
                    continue;
                };
                shared += 1;
                let delta = row_avg - col_avg;
                if delta.abs() < epsilon {
                    wins += 0.5;
                } else if delta > 0.0 {
                    wins += 1.0;
                }
                diff_sum += delta;
            }

            let cell = if shared == 0 {
                MatrixCell::ZERO
            } else {
                MatrixCell {
                    shared,
                    win_rate: wins / shared as f64,
                    average_diff: diff_sum / shared as f64,
                }
            };
            matrix.insert(row, col, cell);
        }
    }
    matrix
}
