//! Checklist and suggestion content, loaded from JSON configuration files.
//!
//! Both files map an age bucket (months, as a string key) to an ordered list of
//! phrases: milestone statements for the checklist, activity phrases for the
//! recommendation prompt. The shipped set lives under `data/`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::assessment::AGE_GROUPS;

/// In-memory milestone checklist and suggestion library, keyed by age bucket.
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    checklists: BTreeMap<u32, Vec<String>>,
    suggestions: BTreeMap<u32, Vec<String>>,
}

impl ContentLibrary {
    /// Loads both content files and validates that every bucket is covered.
    pub fn load(checklist_path: &Path, suggestions_path: &Path) -> Result<Self> {
        let checklists = read_bucket_map(checklist_path)?;
        let suggestions = read_bucket_map(suggestions_path)?;
        let library = Self {
            checklists,
            suggestions,
        };
        library.validate()?;
        Ok(library)
    }

    /// Builds a library from in-memory maps (tests, embedded fixtures).
    pub fn from_parts(
        checklists: BTreeMap<u32, Vec<String>>,
        suggestions: BTreeMap<u32, Vec<String>>,
    ) -> Self {
        Self {
            checklists,
            suggestions,
        }
    }

    fn validate(&self) -> Result<()> {
        for group in AGE_GROUPS {
            let options = self
                .checklists
                .get(&group)
                .with_context(|| format!("checklist content missing age group {}", group))?;
            anyhow::ensure!(
                !options.is_empty(),
                "checklist content empty for age group {}",
                group
            );
            let phrases = self
                .suggestions
                .get(&group)
                .with_context(|| format!("suggestion content missing age group {}", group))?;
            anyhow::ensure!(
                !phrases.is_empty(),
                "suggestion content empty for age group {}",
                group
            );
        }
        Ok(())
    }

    /// Milestone statements for a bucket.
    pub fn checklist(&self, group: u32) -> Option<&[String]> {
        self.checklists.get(&group).map(Vec::as_slice)
    }

    /// Suggestion phrases for a bucket.
    pub fn suggestions(&self, group: u32) -> Option<&[String]> {
        self.suggestions.get(&group).map(Vec::as_slice)
    }
}

fn read_bucket_map(path: &Path) -> Result<BTreeMap<u32, Vec<String>>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read content file {}", path.display()))?;
    let parsed: BTreeMap<String, Vec<String>> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse content file {}", path.display()))?;
    parsed
        .into_iter()
        .map(|(key, phrases)| {
            let group: u32 = key
                .parse()
                .with_context(|| format!("non-numeric age group key '{}' in {}", key, path.display()))?;
            Ok((group, phrases))
        })
        .collect()
}
