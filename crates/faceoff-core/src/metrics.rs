use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A computed metric with its sample size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    pub sample_size: usize,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: f64, sample_size: usize) -> Self {
        Self {
            name: name.into(),
            value,
            sample_size,
        }
    }
}

/// Fraction of successful episodes. Empty input reads as 0.
pub fn success_rate(outcomes: &[bool]) -> Metric {
    let successes = outcomes.iter().filter(|&&o| o).count();
    let value = if outcomes.is_empty() {
        0.0
    } else {
        successes as f64 / outcomes.len() as f64
    };
    Metric::new("success_rate", value, outcomes.len())
}

/// Average reward across episodes.
pub fn expected_value(rewards: &[f64]) -> Metric {
    let value = if rewards.is_empty() {
        0.0
    } else {
        rewards.iter().sum::<f64>() / rewards.len() as f64
    };
    Metric::new("expected_value", value, rewards.len())
}

/// Population standard deviation of rewards, used as a volatility penalty.
pub fn volatility_penalty(rewards: &[f64]) -> Metric {
    let value = if rewards.is_empty() {
        0.0
    } else {
        let mean = rewards.iter().sum::<f64>() / rewards.len() as f64;
        let variance = rewards
            .iter()
            .map(|reward| (reward - mean).powi(2))
            .sum::<f64>()
            / rewards.len() as f64;
        variance.sqrt()
    };
    Metric::new("volatility_penalty", value, rewards.len())
}

/// Weighted geometric mean across metric values.
///
/// Metrics with a non-positive (or missing) weight are skipped and values
/// are clamped to at least 1e-6 before exponentiation so a single zero
/// doesn't collapse the composite. Zero total weight reads as 0.
pub fn weighted_geometric_mean(metrics: &[Metric], weights: &BTreeMap<String, f64>) -> f64 {
    let mut product = 1.0f64;
    let mut total_weight = 0.0f64;
    for metric in metrics {
        let weight = weights.get(&metric.name).copied().unwrap_or(0.0);
        if weight <= 0.0 {
            continue;
        }
        product *= metric.value.max(1e-6).powf(weight);
        total_weight += weight;
    }
    if total_weight == 0.0 {
        return 0.0;
    }
    product.powf(1.0 / total_weight)
}
