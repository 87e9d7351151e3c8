use serde::{Deserialize, Serialize};

use crate::aggregate::{
    persona_scenario_averages, persona_summaries, scenario_summaries, PersonaScenarioAverages,
    PersonaSummary, ScenarioSummary,
};
use crate::filter::{filter_results, FilterCriteria};
use crate::highlight::{top_highlights, Highlight, DEFAULT_HIGHLIGHT_LIMIT};
use crate::matrix::{build_matrix, comparison_persona_ids, ComparisonMatrix, DEFAULT_EPSILON};
use crate::record::{EvaluationRecord, PersonaDirectory, ScenarioCatalog};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Score deltas below this count as ties.
    pub epsilon: f64,
    /// Number of matchup highlights to surface.
    pub highlight_limit: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            highlight_limit: DEFAULT_HIGHLIGHT_LIMIT,
        }
    }
}

/// Snapshot of every derived comparison view over one filtered result set.
///
/// The host recomputes this whenever the upstream results or filter change;
/// there is no incremental state to invalidate. All fields are plain data
/// ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub filtered: Vec<EvaluationRecord>,
    pub averages: PersonaScenarioAverages,
    pub persona_ids: Vec<String>,
    pub matrix: ComparisonMatrix,
    pub highlights: Vec<Highlight>,
    pub personas: Vec<PersonaSummary>,
    pub scenarios: Vec<ScenarioSummary>,
}

impl Analysis {
    pub fn compute(
        results: &[EvaluationRecord],
        criteria: &FilterCriteria,
        directory: &PersonaDirectory,
        catalog: &ScenarioCatalog,
        options: &AnalysisOptions,
    ) -> Self {
        let filtered = filter_results(results, criteria, catalog);
        let averages = persona_scenario_averages(&filtered);
        let persona_ids = comparison_persona_ids(&averages, directory);
        let matrix = build_matrix(&persona_ids, &averages, options.epsilon);
        let highlights = top_highlights(&matrix, &persona_ids, directory, options.highlight_limit);
        let personas = persona_summaries(&persona_ids, &filtered, directory, catalog);
        let scenarios = scenario_summaries(&filtered, catalog);

        Self {
            filtered,
            averages,
            persona_ids,
            matrix,
            highlights,
            personas,
            scenarios,
        }
    }
}
