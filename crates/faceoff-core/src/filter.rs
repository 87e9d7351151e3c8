use serde::{Deserialize, Serialize};

use crate::record::{Difficulty, EvaluationKind, EvaluationRecord, ScenarioCatalog};

/// Restriction applied to the raw result list before any aggregation.
///
/// `None` on a field means "all" — it never narrows. Difficulty joins
/// through the scenario catalog; the other fields match the record itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub persona_id: Option<String>,
    pub target_id: Option<String>,
    pub kind: Option<EvaluationKind>,
    pub difficulty: Option<Difficulty>,
}

impl FilterCriteria {
    pub fn is_unrestricted(&self) -> bool {
        self.persona_id.is_none()
            && self.target_id.is_none()
            && self.kind.is_none()
            && self.difficulty.is_none()
    }
}

/// Keep the records matching every present criterion, in input order.
pub fn filter_results(
    results: &[EvaluationRecord],
    criteria: &FilterCriteria,
    catalog: &ScenarioCatalog,
) -> Vec<EvaluationRecord> {
    results
        .iter()
        .filter(|record| {
            if let Some(persona_id) = &criteria.persona_id {
                if record.persona_id != *persona_id {
                    return false;
                }
            }
            if let Some(target_id) = &criteria.target_id {
                if record.target_id != *target_id {
                    return false;
                }
            }
            if let Some(kind) = criteria.kind {
                if record.kind != kind {
                    return false;
                }
            }
            if let Some(difficulty) = criteria.difficulty {
                // Targets with no catalog entry (or no difficulty) can't
                // satisfy a difficulty restriction.
                if catalog.difficulty(&record.target_id) != Some(difficulty) {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ScenarioMeta;

    fn make_record(persona: &str, target: &str, kind: EvaluationKind) -> EvaluationRecord {
        EvaluationRecord::new(persona, target, kind, 0.5)
    }

    fn make_catalog() -> ScenarioCatalog {
        let mut catalog = ScenarioCatalog::new();
        let mut s1 = ScenarioMeta::new("s1");
        s1.difficulty = Some(Difficulty::Easy);
        let mut s2 = ScenarioMeta::new("s2");
        s2.difficulty = Some(Difficulty::Hard);
        catalog.insert(s1);
        catalog.insert(s2);
        catalog
    }

    #[test]
    fn test_unrestricted_filter_is_identity() {
        let results = vec![
            make_record("a", "s1", EvaluationKind::Algorithmic),
            make_record("b", "s2", EvaluationKind::Human),
            make_record("a", "s2", EvaluationKind::Human),
        ];
        let filtered = filter_results(&results, &FilterCriteria::default(), &make_catalog());
        assert_eq!(filtered, results);
    }

    #[test]
    fn test_filter_by_persona_and_kind() {
        let results = vec![
            make_record("a", "s1", EvaluationKind::Algorithmic),
            make_record("a", "s2", EvaluationKind::Human),
            make_record("b", "s1", EvaluationKind::Human),
        ];
        let criteria = FilterCriteria {
            persona_id: Some("a".into()),
            kind: Some(EvaluationKind::Human),
            ..Default::default()
        };
        let filtered = filter_results(&results, &criteria, &make_catalog());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].target_id, "s2");
    }

    #[test]
    fn test_filter_by_difficulty_joins_catalog() {
        let results = vec![
            make_record("a", "s1", EvaluationKind::Algorithmic),
            make_record("a", "s2", EvaluationKind::Algorithmic),
            make_record("a", "unknown", EvaluationKind::Algorithmic),
        ];
        let criteria = FilterCriteria {
            difficulty: Some(Difficulty::Hard),
            ..Default::default()
        };
        let filtered = filter_results(&results, &criteria, &make_catalog());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].target_id, "s2");
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let results = vec![
            make_record("b", "s1", EvaluationKind::Human),
            make_record("a", "s1", EvaluationKind::Human),
            make_record("b", "s2", EvaluationKind::Human),
        ];
        let criteria = FilterCriteria {
            persona_id: Some("b".into()),
            ..Default::default()
        };
        let filtered = filter_results(&results, &criteria, &make_catalog());
        assert_eq!(filtered[0].target_id, "s1");
        assert_eq!(filtered[1].target_id, "s2");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let filtered = filter_results(&[], &FilterCriteria::default(), &ScenarioCatalog::new());
        assert!(filtered.is_empty());
    }
}
