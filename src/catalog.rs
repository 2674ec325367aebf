use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{AgentLog, Skill};

/// Seed catalog compiled into the binary. Used when no catalog file is
/// configured, so a fresh checkout serves data without any setup.
const SEED: &str = include_str!("../data/catalog.json");

/// The full read-only data set the service exposes: the skill marketplace
/// plus the agent activity log backing the cognition stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub logs: Vec<AgentLog>,
}

impl Catalog {
    /// Load the catalog from `path`, or the embedded seed when `path` is None.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let catalog = match path {
            Some(p) => {
                let data = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read catalog file {}", p.display()))?;
                serde_json::from_str(&data)
                    .with_context(|| format!("Failed to parse catalog file {}", p.display()))?
            }
            None => serde_json::from_str(SEED).context("Embedded seed catalog is invalid")?,
        };

        validate(&catalog)?;
        Ok(catalog)
    }

    pub fn skill_by_id(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }
}

/// Reject catalogs that would break search semantics: skill ids must be
/// unique, and names must be unique because the ranking service identifies
/// skills by name alone.
fn validate(catalog: &Catalog) -> Result<()> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();

    for skill in &catalog.skills {
        if !ids.insert(skill.id.as_str()) {
            anyhow::bail!("Duplicate skill id in catalog: {}", skill.id);
        }
        if !names.insert(skill.name.as_str()) {
            anyhow::bail!("Duplicate skill name in catalog: {}", skill.name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_seed_loads() {
        let catalog = Catalog::load(None).unwrap();
        assert!(!catalog.skills.is_empty());
        assert!(!catalog.logs.is_empty());
    }

    #[test]
    fn test_seed_contains_known_skill() {
        let catalog = Catalog::load(None).unwrap();
        let skill = catalog.skill_by_id("s-101").unwrap();
        assert_eq!(skill.name, "SEC Analyst Pro");
        assert_eq!(skill.outcomes.len(), 3);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"skills":[{{"id":"x-1","name":"Test Skill","description":"d",
                 "provider":"internal","category":"Test","outcomes":[],
                 "risk_score":0,"compatibility":"local","status":"active",
                 "install_count":0,"last_audited":"2024-01-01","tags":[]}}]}}"#
        )
        .unwrap();

        let catalog = Catalog::load(Some(file.path())).unwrap();
        assert_eq!(catalog.skills.len(), 1);
        assert!(catalog.logs.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Catalog::load(Some(Path::new("/nonexistent/catalog.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let skill = r#"{"id":"ID","name":"Same Name","description":"d",
             "provider":"internal","category":"Test","outcomes":[],
             "risk_score":0,"compatibility":"local","status":"active",
             "install_count":0,"last_audited":"2024-01-01","tags":[]}"#;
        write!(
            file,
            r#"{{"skills":[{},{}]}}"#,
            skill.replace("ID", "x-1"),
            skill.replace("ID", "x-2")
        )
        .unwrap();

        let err = Catalog::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Duplicate skill name"));
    }
}
