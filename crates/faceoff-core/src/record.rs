use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EvaluationRecord
// ---------------------------------------------------------------------------

/// One scored outcome of a persona attempting a scenario.
///
/// Records are produced by an external evaluation runner and handed to this
/// crate as an append-only list; nothing here mutates them after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: String,
    pub persona_id: String,
    pub target_id: String,
    pub kind: EvaluationKind,
    /// Per-criterion scores keyed by criterion id.
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
    /// Composite score normalized to [0, 1].
    pub overall_score: f64,
    pub recorded_at: DateTime<Utc>,
}

impl EvaluationRecord {
    pub fn new(
        persona_id: impl Into<String>,
        target_id: impl Into<String>,
        kind: EvaluationKind,
        overall_score: f64,
    ) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            persona_id: persona_id.into(),
            target_id: target_id.into(),
            kind,
            scores: BTreeMap::new(),
            overall_score,
            recorded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationKind {
    Algorithmic,
    Human,
}

impl fmt::Display for EvaluationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Algorithmic => write!(f, "algorithmic"),
            Self::Human => write!(f, "human"),
        }
    }
}

impl std::str::FromStr for EvaluationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "algorithmic" => Ok(Self::Algorithmic),
            "human" => Ok(Self::Human),
            _ => Err(format!("invalid evaluation kind: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Scenario metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(format!("invalid difficulty: {s}")),
        }
    }
}

/// Descriptive metadata for a scenario or game, joined by id.
///
/// The analytics never fetch this themselves; the host supplies a catalog
/// and absent entries simply mean "no metadata".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMeta {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl ScenarioMeta {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            domain: None,
            difficulty: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Persona id → display name lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaDirectory {
    names: BTreeMap<String, String>,
}

impl PersonaDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Resolved display name, falling back to the raw id.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.names.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for PersonaDirectory {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Scenario id → metadata lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioCatalog {
    entries: BTreeMap<String, ScenarioMeta>,
}

impl ScenarioCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, meta: ScenarioMeta) {
        self.entries.insert(meta.id.clone(), meta);
    }

    pub fn get(&self, id: &str) -> Option<&ScenarioMeta> {
        self.entries.get(id)
    }

    pub fn domain(&self, id: &str) -> Option<&str> {
        self.entries.get(id).and_then(|m| m.domain.as_deref())
    }

    pub fn difficulty(&self, id: &str) -> Option<Difficulty> {
        self.entries.get(id).and_then(|m| m.difficulty)
    }

    pub fn title<'a>(&'a self, id: &'a str) -> &'a str {
        self.entries
            .get(id)
            .and_then(|m| m.title.as_deref())
            .unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ScenarioMeta> for ScenarioCatalog {
    fn from_iter<I: IntoIterator<Item = ScenarioMeta>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for meta in iter {
            catalog.insert(meta);
        }
        catalog
    }
}
