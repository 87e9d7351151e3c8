//! Deterministic sample dataset for `faceoff demo`.
//!
//! Gives every other subcommand something to chew on without a live
//! orchestration export. Scores follow a fixed per-persona skill table so
//! repeated runs produce identical output.

use chrono::{DateTime, TimeZone, Utc};

use faceoff_core::{
    ComparisonVote, Dataset, Difficulty, EvaluationKind, EvaluationRecord, PersonaEntry,
    ScenarioMeta,
};

const PERSONAS: &[(&str, &str)] = &[
    ("persona-maverick", "Maverick"),
    ("persona-steward", "Steward"),
    ("persona-gambler", "Gambler"),
    ("persona-analyst", "Analyst"),
];

const SCENARIOS: &[(&str, &str, &str, Difficulty)] = &[
    ("scenario-blackjack", "Blackjack Table", "risk", Difficulty::Easy),
    ("scenario-poker", "Heads-up Poker", "risk", Difficulty::Hard),
    ("scenario-negotiation", "Salary Negotiation", "social", Difficulty::Medium),
    ("scenario-tic-tac-toe", "Tic-Tac-Toe", "logic", Difficulty::Easy),
    ("scenario-maze", "Maze Navigation", "logic", Difficulty::Medium),
];

// Base skill per (persona, domain), perturbed per scenario below.
fn base_skill(persona_id: &str, domain: &str) -> f64 {
    match (persona_id, domain) {
        ("persona-maverick", "risk") => 0.82,
        ("persona-maverick", "social") => 0.55,
        ("persona-maverick", "logic") => 0.60,
        ("persona-steward", "risk") => 0.48,
        ("persona-steward", "social") => 0.78,
        ("persona-steward", "logic") => 0.66,
        ("persona-gambler", "risk") => 0.74,
        ("persona-gambler", "social") => 0.40,
        ("persona-gambler", "logic") => 0.35,
        ("persona-analyst", "risk") => 0.58,
        ("persona-analyst", "social") => 0.62,
        ("persona-analyst", "logic") => 0.88,
        _ => 0.5,
    }
}

fn fixed_timestamp(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap() + chrono::Duration::minutes(offset_minutes)
}

pub fn sample_dataset() -> Dataset {
    let personas: Vec<PersonaEntry> = PERSONAS
        .iter()
        .map(|(id, name)| PersonaEntry {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();

    let scenarios: Vec<ScenarioMeta> = SCENARIOS
        .iter()
        .map(|(id, title, domain, difficulty)| {
            let mut meta = ScenarioMeta::new(*id);
            meta.title = Some(title.to_string());
            meta.domain = Some(domain.to_string());
            meta.difficulty = Some(*difficulty);
            meta
        })
        .collect();

    let mut results = Vec::new();
    let mut tick = 0i64;
    for (run, kind) in [(0usize, EvaluationKind::Algorithmic), (1, EvaluationKind::Human)] {
        for (persona_idx, (persona_id, _)) in PERSONAS.iter().enumerate() {
            for (scenario_idx, (scenario_id, _, domain, _)) in SCENARIOS.iter().enumerate() {
                // Small deterministic perturbation so scenarios within a
                // domain don't collapse to identical averages.
                let wobble =
                    ((persona_idx + 3 * scenario_idx + 7 * run) % 5) as f64 * 0.02 - 0.04;
                let score = (base_skill(persona_id, domain) + wobble).clamp(0.0, 1.0);

                let mut record =
                    EvaluationRecord::new(*persona_id, *scenario_id, kind, score);
                record.id = format!("result-{run}-{persona_idx}-{scenario_idx}");
                record.recorded_at = fixed_timestamp(tick);
                record.scores.insert("overall".into(), score);
                tick += 1;
                results.push(record);
            }
        }
    }

    // A few reviewer votes over the risk scenarios, enough for `rank` to
    // produce a non-trivial ordering.
    let vote_specs: &[(&str, &str, &str)] = &[
        ("scenario-poker", "persona-maverick", "persona-gambler"),
        ("scenario-poker", "persona-maverick", "persona-steward"),
        ("scenario-poker", "persona-gambler", "persona-analyst"),
        ("scenario-blackjack", "persona-maverick", "persona-analyst"),
        ("scenario-blackjack", "persona-gambler", "persona-steward"),
        ("scenario-blackjack", "persona-steward", "persona-maverick"),
    ];
    let votes: Vec<ComparisonVote> = vote_specs
        .iter()
        .enumerate()
        .map(|(i, (target, winner, loser))| {
            let mut vote = ComparisonVote::new(format!("pair-{i}"), *target, *winner, *loser);
            vote.id = format!("vote-{i}");
            vote.recorded_at = fixed_timestamp(1000 + i as i64);
            vote.reviewer = Some("demo-reviewer".into());
            vote
        })
        .collect();

    Dataset {
        personas,
        scenarios,
        results,
        votes,
    }
}
