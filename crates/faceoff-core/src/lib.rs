pub mod aggregate;
pub mod analysis;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod matrix;
pub mod metrics;
pub mod ranking;
pub mod record;

pub use aggregate::{
    persona_scenario_averages, persona_summaries, persona_summary, scenario_summaries,
    DomainAverage, PersonaScenarioAverages, PersonaSummary, ScenarioSummary,
};
pub use analysis::{Analysis, AnalysisOptions};
pub use dataset::{Dataset, PersonaEntry};
pub use error::{FaceoffError, FaceoffResult};
pub use filter::{filter_results, FilterCriteria};
pub use highlight::{top_highlights, Highlight, DEFAULT_HIGHLIGHT_LIMIT};
pub use matrix::{
    build_matrix, comparison_persona_ids, ComparisonMatrix, MatrixCell, DEFAULT_EPSILON,
};
pub use metrics::{
    expected_value, success_rate, volatility_penalty, weighted_geometric_mean, Metric,
};
pub use ranking::{
    rank_personas, ComparisonVote, RankingReport, RankingSummary, SolverOptions, VoteFilter,
};
pub use record::{
    Difficulty, EvaluationKind, EvaluationRecord, PersonaDirectory, ScenarioCatalog, ScenarioMeta,
};
