//! Schedule configuration from TOML (`[schedule]` section)
//!
//! The default day plan and the per-domain substitution table.
//!
//! Example:
//!
//! ```toml
//! [[schedule.tasks]]
//! title = "Morning run"
//! domain = "fitness"
//! duration_minutes = 45
//!
//! [schedule.substitutions.fitness]
//! title = "Light stretching"
//! duration_minutes = 10
//! ```

use super::engine::parse_domain;
use crate::config::ConfigError;
use pacekeeper_domain::{Substitute, SubstitutionTable, Task};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scheduled task as written in TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileTask {
    pub title: String,
    pub domain: String,
    pub duration_minutes: u32,
}

/// A substitute entry as written in TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSubstitute {
    pub title: String,
    pub duration_minutes: u32,
}

/// `[schedule]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScheduleConfig {
    pub tasks: Vec<FileTask>,
    /// Empty means the built-in substitution table applies
    pub substitutions: BTreeMap<String, FileSubstitute>,
}

impl Default for FileScheduleConfig {
    fn default() -> Self {
        Self {
            tasks: vec![
                FileTask {
                    title: "Morning workout".to_string(),
                    domain: "fitness".to_string(),
                    duration_minutes: 45,
                },
                FileTask {
                    title: "Meal prep".to_string(),
                    domain: "nutrition".to_string(),
                    duration_minutes: 30,
                },
                FileTask {
                    title: "Wind-down routine".to_string(),
                    domain: "recovery".to_string(),
                    duration_minutes: 30,
                },
                FileTask {
                    title: "Evening meditation".to_string(),
                    domain: "mindfulness".to_string(),
                    duration_minutes: 15,
                },
                FileTask {
                    title: "Deep work block".to_string(),
                    domain: "productivity".to_string(),
                    duration_minutes: 60,
                },
            ],
            substitutions: BTreeMap::new(),
        }
    }
}

impl FileScheduleConfig {
    pub fn day_tasks(&self) -> Result<Vec<Task>, ConfigError> {
        self.tasks
            .iter()
            .map(|t| {
                Ok(Task::new(
                    t.title.clone(),
                    parse_domain(&t.domain)?,
                    t.duration_minutes,
                ))
            })
            .collect()
    }

    pub fn substitutions(&self) -> Result<SubstitutionTable, ConfigError> {
        if self.substitutions.is_empty() {
            return Ok(SubstitutionTable::standard());
        }

        let mut entries = BTreeMap::new();
        for (domain, substitute) in &self.substitutions {
            entries.insert(
                parse_domain(domain)?,
                Substitute {
                    title: substitute.title.clone(),
                    duration_minutes: substitute.duration_minutes,
                },
            );
        }
        Ok(SubstitutionTable::from_entries(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacekeeper_domain::ActivityDomain;

    #[test]
    fn test_default_day_covers_all_domains() {
        let tasks = FileScheduleConfig::default().day_tasks().unwrap();
        assert_eq!(tasks.len(), 5);
        for domain in ActivityDomain::CANONICAL {
            assert!(tasks.iter().any(|t| t.domain == domain));
        }
    }

    #[test]
    fn test_substitution_override() {
        let toml_str = r#"
[substitutions.fitness]
title = "Short walk"
duration_minutes = 12
"#;
        let config: FileScheduleConfig = toml::from_str(toml_str).unwrap();
        let table = config.substitutions().unwrap();

        let substitute = table.get(ActivityDomain::Fitness).unwrap();
        assert_eq!(substitute.title, "Short walk");
        assert_eq!(substitute.duration_minutes, 12);
    }

    #[test]
    fn test_bad_task_domain_errors() {
        let config = FileScheduleConfig {
            tasks: vec![FileTask {
                title: "Nap".to_string(),
                domain: "napping".to_string(),
                duration_minutes: 20,
            }],
            substitutions: BTreeMap::new(),
        };
        assert!(config.day_tasks().is_err());
    }
}
