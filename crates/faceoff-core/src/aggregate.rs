use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::{EvaluationKind, EvaluationRecord, PersonaDirectory, ScenarioCatalog};

/// Mean `overall_score` per persona per target.
///
/// Pairs with no recorded results are absent from the map, never zero —
/// downstream comparison logic relies on absence to detect "no overlap".
pub type PersonaScenarioAverages = BTreeMap<String, BTreeMap<String, f64>>;

/// Group results by (persona, target) and reduce each group to its mean.
pub fn persona_scenario_averages(results: &[EvaluationRecord]) -> PersonaScenarioAverages {
    let mut sums: BTreeMap<(String, String), (f64, usize)> = BTreeMap::new();
    for record in results {
        let entry = sums
            .entry((record.persona_id.clone(), record.target_id.clone()))
            .or_insert((0.0, 0));
        entry.0 += record.overall_score;
        entry.1 += 1;
    }

    let mut averages = PersonaScenarioAverages::new();
    for ((persona_id, target_id), (sum, count)) in sums {
        if count == 0 {
            continue;
        }
        averages
            .entry(persona_id)
            .or_default()
            .insert(target_id, sum / count as f64);
    }
    averages
}

// ---------------------------------------------------------------------------
// Persona rollups
// ---------------------------------------------------------------------------

/// Average score within one scenario domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAverage {
    pub domain: String,
    pub average: f64,
    pub result_count: usize,
}

/// Per-persona rollup over the filtered result set.
///
/// A persona with zero results yields the placeholder from
/// [`PersonaSummary::empty`] rather than an error; hosts render those
/// fields as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaSummary {
    pub persona_id: String,
    pub display_name: String,
    pub result_count: usize,
    pub overall_average: f64,
    pub algorithmic_average: Option<f64>,
    pub human_average: Option<f64>,
    /// (target id, average score), ties resolved to the first target seen.
    pub best_target: Option<(String, f64)>,
    pub worst_target: Option<(String, f64)>,
    /// Top 2 domains by average score, descending.
    pub strengths: Vec<DomainAverage>,
    /// Bottom 2 domains by average score, ascending.
    pub weaknesses: Vec<DomainAverage>,
}

impl PersonaSummary {
    pub fn empty(persona_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            persona_id: persona_id.into(),
            display_name: display_name.into(),
            result_count: 0,
            overall_average: 0.0,
            algorithmic_average: None,
            human_average: None,
            best_target: None,
            worst_target: None,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
        }
    }
}

fn mean_of(records: &[&EvaluationRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.overall_score).sum::<f64>() / records.len() as f64
}

/// Rollup for a single persona.
pub fn persona_summary(
    persona_id: &str,
    results: &[EvaluationRecord],
    directory: &PersonaDirectory,
    catalog: &ScenarioCatalog,
) -> PersonaSummary {
    let rows: Vec<&EvaluationRecord> = results
        .iter()
        .filter(|r| r.persona_id == persona_id)
        .collect();
    if rows.is_empty() {
        return PersonaSummary::empty(persona_id, directory.display_name(persona_id));
    }

    let algorithmic: Vec<&EvaluationRecord> = rows
        .iter()
        .copied()
        .filter(|r| r.kind == EvaluationKind::Algorithmic)
        .collect();
    let human: Vec<&EvaluationRecord> = rows
        .iter()
        .copied()
        .filter(|r| r.kind == EvaluationKind::Human)
        .collect();

    // Per-target averages in first-encountered target order, so score ties
    // resolve to the earlier target deterministically.
    let mut target_order: Vec<String> = Vec::new();
    let mut target_sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for record in &rows {
        if !target_sums.contains_key(&record.target_id) {
            target_order.push(record.target_id.clone());
        }
        let entry = target_sums.entry(record.target_id.clone()).or_insert((0.0, 0));
        entry.0 += record.overall_score;
        entry.1 += 1;
    }

    let mut best_target: Option<(String, f64)> = None;
    let mut worst_target: Option<(String, f64)> = None;
    for target_id in &target_order {
        let (sum, count) = target_sums[target_id];
        let avg = sum / count as f64;
        match &best_target {
            Some((_, best)) if avg <= *best => {}
            _ => best_target = Some((target_id.clone(), avg)),
        }
        match &worst_target {
            Some((_, worst)) if avg >= *worst => {}
            _ => worst_target = Some((target_id.clone(), avg)),
        }
    }

    // Domain buckets via catalog join; targets without a domain fall into
    // no bucket.
    let mut domain_sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for record in &rows {
        if let Some(domain) = catalog.domain(&record.target_id) {
            let entry = domain_sums.entry(domain.to_string()).or_insert((0.0, 0));
            entry.0 += record.overall_score;
            entry.1 += 1;
        }
    }
    let mut domains: Vec<DomainAverage> = domain_sums
        .into_iter()
        .map(|(domain, (sum, count))| DomainAverage {
            domain,
            average: sum / count as f64,
            result_count: count,
        })
        .collect();
    domains.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.domain.cmp(&b.domain))
    });
    let strengths: Vec<DomainAverage> = domains.iter().take(2).cloned().collect();
    let mut weaknesses: Vec<DomainAverage> = domains.iter().rev().take(2).cloned().collect();
    weaknesses.sort_by(|a, b| {
        a.average
            .partial_cmp(&b.average)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.domain.cmp(&b.domain))
    });

    PersonaSummary {
        persona_id: persona_id.to_string(),
        display_name: directory.display_name(persona_id).to_string(),
        result_count: rows.len(),
        overall_average: mean_of(&rows),
        algorithmic_average: (!algorithmic.is_empty()).then(|| mean_of(&algorithmic)),
        human_average: (!human.is_empty()).then(|| mean_of(&human)),
        best_target,
        worst_target,
        strengths,
        weaknesses,
    }
}

/// Rollups for each listed persona, in the given order.
pub fn persona_summaries(
    persona_ids: &[String],
    results: &[EvaluationRecord],
    directory: &PersonaDirectory,
    catalog: &ScenarioCatalog,
) -> Vec<PersonaSummary> {
    persona_ids
        .iter()
        .map(|id| persona_summary(id, results, directory, catalog))
        .collect()
}

// ---------------------------------------------------------------------------
// Scenario rollups
// ---------------------------------------------------------------------------

/// Per-scenario rollup over the filtered result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub target_id: String,
    pub title: String,
    pub result_count: usize,
    pub average: f64,
    /// (persona id, average score), ties resolved to the first persona seen.
    pub best_persona: Option<(String, f64)>,
    pub worst_persona: Option<(String, f64)>,
}

/// Rollups for every target present in the filtered results, in
/// first-encountered order.
pub fn scenario_summaries(
    results: &[EvaluationRecord],
    catalog: &ScenarioCatalog,
) -> Vec<ScenarioSummary> {
    let mut target_order: Vec<String> = Vec::new();
    for record in results {
        if !target_order.contains(&record.target_id) {
            target_order.push(record.target_id.clone());
        }
    }

    target_order
        .into_iter()
        .map(|target_id| {
            let rows: Vec<&EvaluationRecord> = results
                .iter()
                .filter(|r| r.target_id == target_id)
                .collect();

            let mut persona_order: Vec<String> = Vec::new();
            let mut persona_sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
            for record in &rows {
                if !persona_sums.contains_key(&record.persona_id) {
                    persona_order.push(record.persona_id.clone());
                }
                let entry = persona_sums
                    .entry(record.persona_id.clone())
                    .or_insert((0.0, 0));
                entry.0 += record.overall_score;
                entry.1 += 1;
            }

            let mut best_persona: Option<(String, f64)> = None;
            let mut worst_persona: Option<(String, f64)> = None;
            for persona_id in &persona_order {
                let (sum, count) = persona_sums[persona_id];
                let avg = sum / count as f64;
                match &best_persona {
                    Some((_, best)) if avg <= *best => {}
                    _ => best_persona = Some((persona_id.clone(), avg)),
                }
                match &worst_persona {
                    Some((_, worst)) if avg >= *worst => {}
                    _ => worst_persona = Some((persona_id.clone(), avg)),
                }
            }

            ScenarioSummary {
                title: catalog.title(&target_id).to_string(),
                result_count: rows.len(),
                average: mean_of(&rows),
                best_persona,
                worst_persona,
                target_id,
            }
        })
        .collect()
}
