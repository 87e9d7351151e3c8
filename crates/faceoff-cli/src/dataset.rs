//! Dataset file loading.
//!
//! The wire format lives in `faceoff-core`; this module only reads the file
//! and attaches path context to decode failures.

use std::path::Path;

use anyhow::{Context, Result};

use faceoff_core::Dataset;

pub fn load_dataset_file(path: &Path) -> Result<Dataset> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Dataset::from_json(&content).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_sample_file() {
        let dataset = crate::sample::sample_dataset();
        let json = dataset.to_json_pretty().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = load_dataset_file(file.path()).unwrap();
        assert_eq!(loaded.personas.len(), dataset.personas.len());
        assert_eq!(loaded.results.len(), dataset.results.len());
        assert_eq!(loaded.votes.len(), dataset.votes.len());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_dataset_file(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(err.to_string().contains("reading"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        assert!(load_dataset_file(file.path()).is_err());
    }
}
