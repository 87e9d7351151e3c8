use serde::{Deserialize, Serialize};

use crate::error::FaceoffResult;
use crate::ranking::ComparisonVote;
use crate::record::{EvaluationRecord, PersonaDirectory, ScenarioCatalog, ScenarioMeta};

/// Directory entry pairing a persona id with its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaEntry {
    pub id: String,
    pub name: String,
}

/// A full evaluation export: persona directory, scenario catalog, results,
/// and reviewer votes. Everything except `results` is optional in the wire
/// form.
///
/// How the JSON gets on disk is the host's concern; this type only decodes
/// and re-encodes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub personas: Vec<PersonaEntry>,
    pub scenarios: Vec<ScenarioMeta>,
    pub results: Vec<EvaluationRecord>,
    pub votes: Vec<ComparisonVote>,
}

impl Dataset {
    pub fn from_json(json: &str) -> FaceoffResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> FaceoffResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn directory(&self) -> PersonaDirectory {
        self.personas
            .iter()
            .map(|p| (p.id.clone(), p.name.clone()))
            .collect()
    }

    pub fn catalog(&self) -> ScenarioCatalog {
        self.scenarios.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaceoffError;
    use crate::record::EvaluationKind;

    #[test]
    fn test_round_trip() {
        let mut dataset = Dataset::default();
        dataset.personas.push(PersonaEntry {
            id: "p1".into(),
            name: "Pilot".into(),
        });
        dataset
            .results
            .push(EvaluationRecord::new("p1", "s1", EvaluationKind::Human, 0.7));
        dataset
            .votes
            .push(ComparisonVote::new("pair-1", "s1", "p1", "p2"));

        let json = dataset.to_json_pretty().unwrap();
        let decoded = Dataset::from_json(&json).unwrap();
        assert_eq!(decoded.personas, dataset.personas);
        assert_eq!(decoded.results, dataset.results);
        assert_eq!(decoded.votes, dataset.votes);
        assert_eq!(decoded.directory().display_name("p1"), "Pilot");
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let dataset = Dataset::from_json(r#"{"results": []}"#).unwrap();
        assert!(dataset.personas.is_empty());
        assert!(dataset.scenarios.is_empty());
        assert!(dataset.votes.is_empty());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = Dataset::from_json("not json").unwrap_err();
        assert!(matches!(err, FaceoffError::Serialization(_)));
    }
}
