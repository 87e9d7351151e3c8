mod config;
mod dataset;
mod sample;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use faceoff_core::{
    expected_value, rank_personas, volatility_penalty, Analysis, AnalysisOptions, Dataset,
    Difficulty, EvaluationKind, FilterCriteria, RankingReport, SolverOptions, VoteFilter,
};

#[derive(Parser)]
#[command(
    name = "faceoff",
    version,
    about = "Head-to-head benchmark analytics for AI personas"
)]
struct Cli {
    /// Path to the evaluation dataset (JSON)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pairwise win-rate / average-edge matrix
    Matrix {
        #[command(flatten)]
        filter: FilterArgs,

        /// Tie threshold for score deltas
        #[arg(long)]
        epsilon: Option<f64>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the most decisive matchups
    Highlights {
        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum matchups to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Tie threshold for score deltas
        #[arg(long)]
        epsilon: Option<f64>,

        /// Emit JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Per-persona rollups: averages, best/worst scenario, strengths
    Personas {
        #[command(flatten)]
        filter: FilterArgs,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Per-scenario rollups: averages, best/worst persona
    Scenarios {
        #[command(flatten)]
        filter: FilterArgs,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Rank personas from reviewer votes (Bradley–Terry)
    Rank {
        /// Restrict to votes on one scenario or game
        #[arg(short, long)]
        target: Option<String>,

        /// Solver iteration cap
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Solver convergence tolerance
        #[arg(long)]
        tolerance: Option<f64>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Dataset counts and coverage
    Stats,

    /// Show current configuration
    Config,

    /// Write a deterministic sample dataset
    Demo {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, clap::Args)]
struct FilterArgs {
    /// Restrict to one persona id
    #[arg(short, long)]
    persona: Option<String>,

    /// Restrict to one scenario or game id
    #[arg(short, long)]
    scenario: Option<String>,

    /// Restrict by evaluation kind
    #[arg(short, long)]
    kind: Option<CliKind>,

    /// Restrict by scenario difficulty
    #[arg(short, long)]
    difficulty: Option<CliDifficulty>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        Self {
            persona_id: args.persona,
            target_id: args.scenario,
            kind: args.kind.map(Into::into),
            difficulty: args.difficulty.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliKind {
    Algorithmic,
    Human,
}

impl From<CliKind> for EvaluationKind {
    fn from(val: CliKind) -> Self {
        match val {
            CliKind::Algorithmic => EvaluationKind::Algorithmic,
            CliKind::Human => EvaluationKind::Human,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDifficulty {
    Easy,
    Medium,
    Hard,
}

impl From<CliDifficulty> for Difficulty {
    fn from(val: CliDifficulty) -> Self {
        match val {
            CliDifficulty::Easy => Difficulty::Easy,
            CliDifficulty::Medium => Difficulty::Medium,
            CliDifficulty::Hard => Difficulty::Hard,
        }
    }
}

fn load_dataset(path: Option<PathBuf>) -> Result<Dataset> {
    let Some(path) = path else {
        bail!("no dataset provided — pass --data <file> or generate one with `faceoff demo`");
    };
    let dataset = dataset::load_dataset_file(&path)?;
    tracing::debug!(
        results = dataset.results.len(),
        votes = dataset.votes.len(),
        "loaded dataset from {}",
        path.display()
    );
    Ok(dataset)
}

fn analysis_options(
    config: &config::Config,
    epsilon: Option<f64>,
    limit: Option<usize>,
) -> AnalysisOptions {
    AnalysisOptions {
        epsilon: epsilon.unwrap_or(config.comparison.epsilon),
        highlight_limit: limit.unwrap_or(config.comparison.highlight_limit),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load_config()?;

    match cli.command {
        Commands::Matrix {
            filter,
            epsilon,
            json,
        } => {
            let dataset = load_dataset(cli.data)?;
            let options = analysis_options(&config, epsilon, None);
            cmd_matrix(&dataset, filter.into(), &options, json)
        }
        Commands::Highlights {
            filter,
            limit,
            epsilon,
            json,
        } => {
            let dataset = load_dataset(cli.data)?;
            let options = analysis_options(&config, epsilon, limit);
            cmd_highlights(&dataset, filter.into(), &options, json)
        }
        Commands::Personas { filter, json } => {
            let dataset = load_dataset(cli.data)?;
            let options = analysis_options(&config, None, None);
            cmd_personas(&dataset, filter.into(), &options, json)
        }
        Commands::Scenarios { filter, json } => {
            let dataset = load_dataset(cli.data)?;
            let options = analysis_options(&config, None, None);
            cmd_scenarios(&dataset, filter.into(), &options, json)
        }
        Commands::Rank {
            target,
            max_iterations,
            tolerance,
            json,
        } => {
            let dataset = load_dataset(cli.data)?;
            let solver = SolverOptions {
                max_iterations: max_iterations.unwrap_or(config.ranking.max_iterations),
                tolerance: tolerance.unwrap_or(config.ranking.tolerance),
            };
            cmd_rank(&dataset, target, &solver, json)
        }
        Commands::Stats => {
            let dataset = load_dataset(cli.data)?;
            cmd_stats(&dataset)
        }
        Commands::Config => cmd_config(&config),
        Commands::Demo { out } => cmd_demo(out),
    }
}

// ---------------------------------------------------------------------------
// Comparison commands
// ---------------------------------------------------------------------------

fn compute(dataset: &Dataset, criteria: FilterCriteria, options: &AnalysisOptions) -> Analysis {
    Analysis::compute(
        &dataset.results,
        &criteria,
        &dataset.directory(),
        &dataset.catalog(),
        options,
    )
}

fn cmd_matrix(
    dataset: &Dataset,
    criteria: FilterCriteria,
    options: &AnalysisOptions,
    json: bool,
) -> Result<()> {
    let analysis = compute(dataset, criteria, options);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "persona_ids": analysis.persona_ids,
                "matrix": analysis.matrix,
            }))?
        );
        return Ok(());
    }

    if analysis.persona_ids.is_empty() {
        println!("No results after filtering.");
        return Ok(());
    }

    let directory = dataset.directory();
    let names: Vec<&str> = analysis
        .persona_ids
        .iter()
        .map(|id| directory.display_name(id))
        .collect();
    let width = names.iter().map(|n| n.len()).max().unwrap_or(8).max(8);

    print!("{:width$}", "");
    for name in &names {
        print!("  {name:>width$}");
    }
    println!();

    for (row_idx, row) in analysis.persona_ids.iter().enumerate() {
        print!("{:>width$}", names[row_idx]);
        for col in &analysis.persona_ids {
            if row == col {
                print!("  {:>width$}", "·");
                continue;
            }
            let cell = analysis.matrix.cell(row, col);
            if cell.shared == 0 {
                print!("  {:>width$}", "no overlap");
            } else {
                let formatted = format!(
                    "{:.0}% {:+.3}/{}",
                    cell.win_rate * 100.0,
                    cell.average_diff,
                    cell.shared
                );
                print!("  {formatted:>width$}");
            }
        }
        println!();
    }
    println!();
    println!("cell = row win rate, average edge, shared scenarios");
    Ok(())
}

fn cmd_highlights(
    dataset: &Dataset,
    criteria: FilterCriteria,
    options: &AnalysisOptions,
    json: bool,
) -> Result<()> {
    let analysis = compute(dataset, criteria, options);
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis.highlights)?);
        return Ok(());
    }

    if analysis.highlights.is_empty() {
        println!("No comparable matchups (no persona pair shares a scenario).");
        return Ok(());
    }

    for (i, h) in analysis.highlights.iter().enumerate() {
        println!(
            "{}. {} over {} — edge {:.3}, win rate {:.0}%, {} shared scenario{}",
            i + 1,
            h.leader,
            h.challenger,
            h.diff,
            h.win_rate * 100.0,
            h.shared,
            if h.shared == 1 { "" } else { "s" },
        );
    }
    Ok(())
}

fn cmd_personas(
    dataset: &Dataset,
    criteria: FilterCriteria,
    options: &AnalysisOptions,
    json: bool,
) -> Result<()> {
    let analysis = compute(dataset, criteria, options);
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis.personas)?);
        return Ok(());
    }

    if analysis.personas.is_empty() {
        println!("No results after filtering.");
        return Ok(());
    }

    let catalog = dataset.catalog();
    for summary in &analysis.personas {
        println!("{} ({})", summary.display_name, summary.persona_id);
        println!(
            "  results: {}   overall avg: {:.3}",
            summary.result_count, summary.overall_average
        );
        println!(
            "  algorithmic: {}   human: {}",
            format_optional_avg(summary.algorithmic_average),
            format_optional_avg(summary.human_average),
        );
        match (&summary.best_target, &summary.worst_target) {
            (Some((best, best_avg)), Some((worst, worst_avg))) => {
                println!(
                    "  best: {} ({:.3})   worst: {} ({:.3})",
                    catalog.title(best),
                    best_avg,
                    catalog.title(worst),
                    worst_avg
                );
            }
            _ => println!("  best: N/A   worst: N/A"),
        }
        if !summary.strengths.is_empty() {
            let strengths: Vec<String> = summary
                .strengths
                .iter()
                .map(|d| format!("{} ({:.3})", d.domain, d.average))
                .collect();
            let weaknesses: Vec<String> = summary
                .weaknesses
                .iter()
                .map(|d| format!("{} ({:.3})", d.domain, d.average))
                .collect();
            println!("  strengths: {}", strengths.join(", "));
            println!("  weaknesses: {}", weaknesses.join(", "));
        }
        println!();
    }
    Ok(())
}

fn format_optional_avg(avg: Option<f64>) -> String {
    match avg {
        Some(v) => format!("{v:.3}"),
        None => "N/A".into(),
    }
}

fn cmd_scenarios(
    dataset: &Dataset,
    criteria: FilterCriteria,
    options: &AnalysisOptions,
    json: bool,
) -> Result<()> {
    let analysis = compute(dataset, criteria, options);
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis.scenarios)?);
        return Ok(());
    }

    if analysis.scenarios.is_empty() {
        println!("No results after filtering.");
        return Ok(());
    }

    let directory = dataset.directory();
    for summary in &analysis.scenarios {
        println!("{} ({})", summary.title, summary.target_id);
        println!(
            "  results: {}   avg score: {:.3}",
            summary.result_count, summary.average
        );
        match (&summary.best_persona, &summary.worst_persona) {
            (Some((best, best_avg)), Some((worst, worst_avg))) => {
                println!(
                    "  top: {} ({:.3})   bottom: {} ({:.3})",
                    directory.display_name(best),
                    best_avg,
                    directory.display_name(worst),
                    worst_avg
                );
            }
            _ => println!("  top: N/A   bottom: N/A"),
        }
        println!();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Ranking and misc commands
// ---------------------------------------------------------------------------

fn cmd_rank(
    dataset: &Dataset,
    target: Option<String>,
    solver: &SolverOptions,
    json: bool,
) -> Result<()> {
    let filter = VoteFilter { target_id: target };
    let report: RankingReport = rank_personas(&dataset.votes, &filter, solver);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.rankings.is_empty() {
        println!("No votes recorded{}.", match &filter.target_id {
            Some(t) => format!(" for target '{t}'"),
            None => String::new(),
        });
        return Ok(());
    }

    let directory = dataset.directory();
    let mut ranked: Vec<(&String, &f64)> = report.rankings.iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (i, (persona_id, strength)) in ranked.iter().enumerate() {
        println!(
            "{:>2}. {:24} {:.4}",
            i + 1,
            directory.display_name(persona_id),
            strength
        );
    }
    println!();
    println!(
        "{} votes over {} pairs, {} personas — {} after {} iteration{}",
        report.summary.total_votes,
        report.summary.pair_count,
        report.summary.persona_count,
        if report.summary.converged {
            "converged"
        } else {
            "did not converge"
        },
        report.summary.iterations,
        if report.summary.iterations == 1 { "" } else { "s" },
    );
    Ok(())
}

fn cmd_stats(dataset: &Dataset) -> Result<()> {
    let algorithmic = dataset
        .results
        .iter()
        .filter(|r| r.kind == EvaluationKind::Algorithmic)
        .count();
    let human = dataset.results.len() - algorithmic;

    let mut persona_ids: Vec<&str> =
        dataset.results.iter().map(|r| r.persona_id.as_str()).collect();
    persona_ids.sort_unstable();
    persona_ids.dedup();
    let mut target_ids: Vec<&str> =
        dataset.results.iter().map(|r| r.target_id.as_str()).collect();
    target_ids.sort_unstable();
    target_ids.dedup();

    let scores: Vec<f64> = dataset.results.iter().map(|r| r.overall_score).collect();
    let mean = expected_value(&scores);
    let volatility = volatility_penalty(&scores);

    println!("Results:   {} ({algorithmic} algorithmic, {human} human)", dataset.results.len());
    println!("Personas:  {} in directory, {} with results", dataset.personas.len(), persona_ids.len());
    println!("Scenarios: {} in catalog, {} with results", dataset.scenarios.len(), target_ids.len());
    println!("Votes:     {}", dataset.votes.len());
    println!("Scores:    mean {:.3}, volatility {:.3}", mean.value, volatility.value);
    Ok(())
}

fn cmd_config(config: &config::Config) -> Result<()> {
    println!("config: {}", config::show_config_path());
    println!();
    println!("[comparison]");
    println!("epsilon = {}", config.comparison.epsilon);
    println!("highlight_limit = {}", config.comparison.highlight_limit);
    println!();
    println!("[ranking]");
    println!("max_iterations = {}", config.ranking.max_iterations);
    println!("tolerance = {}", config.ranking.tolerance);
    Ok(())
}

fn cmd_demo(out: Option<PathBuf>) -> Result<()> {
    let dataset = sample::sample_dataset();
    let json = dataset.to_json_pretty()?;
    match out {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote sample dataset to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_convert() {
        let args = FilterArgs {
            persona: Some("p1".into()),
            scenario: None,
            kind: Some(CliKind::Human),
            difficulty: Some(CliDifficulty::Hard),
        };
        let criteria: FilterCriteria = args.into();
        assert_eq!(criteria.persona_id.as_deref(), Some("p1"));
        assert_eq!(criteria.kind, Some(EvaluationKind::Human));
        assert_eq!(criteria.difficulty, Some(Difficulty::Hard));
        assert!(criteria.target_id.is_none());
    }

    #[test]
    fn test_sample_dataset_end_to_end() {
        let dataset = sample::sample_dataset();
        let analysis = compute(
            &dataset,
            FilterCriteria::default(),
            &AnalysisOptions::default(),
        );

        assert_eq!(analysis.persona_ids.len(), 4);
        assert_eq!(analysis.highlights.len(), 3);
        for row in &analysis.persona_ids {
            for col in &analysis.persona_ids {
                let cell = analysis.matrix.cell(row, col);
                if row == col {
                    assert_eq!(cell.shared, 0);
                } else {
                    assert_eq!(cell.shared, 5);
                }
            }
        }
    }

    #[test]
    fn test_sample_votes_rank() {
        let dataset = sample::sample_dataset();
        let report = rank_personas(
            &dataset.votes,
            &VoteFilter::default(),
            &SolverOptions::default(),
        );
        assert_eq!(report.summary.persona_count, 4);
        assert!(report.summary.converged);
    }
}
