//! Content config: paths of the checklist and suggestion files.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// CHECKLIST_FILE
    pub checklist_file: PathBuf,
    /// SUGGESTIONS_FILE
    pub suggestions_file: PathBuf,
}

impl ContentConfig {
    pub fn from_env() -> Result<Self> {
        let checklist_file = env::var("CHECKLIST_FILE")
            .unwrap_or_else(|_| "data/checklist_options.json".to_string())
            .into();
        let suggestions_file = env::var("SUGGESTIONS_FILE")
            .unwrap_or_else(|_| "data/suggestions.json".to_string())
            .into();
        Ok(Self {
            checklist_file,
            suggestions_file,
        })
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.checklist_file.exists(),
            "checklist file not found: {}",
            self.checklist_file.display()
        );
        anyhow::ensure!(
            self.suggestions_file.exists(),
            "suggestions file not found: {}",
            self.suggestions_file.display()
        );
        Ok(())
    }
}
