//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use tracing::{debug, info};

use super::embedded;

/// Loads prompt templates by name
#[derive(Debug, Clone, Default)]
pub struct PromptLoader {
    /// Configured override directory (`interview.prompts-dir`)
    override_dir: Option<PathBuf>,
    /// Project override directory (`.mombot/prompts/`)
    project_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader
    ///
    /// # Arguments
    /// * `prompts_dir` - Optional configured override directory
    /// * `worktree` - Directory searched for `.mombot/prompts/`
    pub fn new(prompts_dir: Option<&Path>, worktree: impl AsRef<Path>) -> Self {
        let project_dir = worktree.as_ref().join(".mombot/prompts");
        debug!(?prompts_dir, ?project_dir, "PromptLoader::new: called");

        let override_dir = prompts_dir.filter(|d| d.is_dir()).map(Path::to_path_buf);
        if prompts_dir.is_some() && override_dir.is_none() {
            debug!("PromptLoader::new: configured prompts-dir does not exist, ignoring");
        }

        Self {
            override_dir,
            project_dir: if project_dir.is_dir() { Some(project_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        Self::default()
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Configured override: `{prompts-dir}/{name}.pmt`
    /// 2. Project override: `.mombot/prompts/{name}.pmt`
    /// 3. Embedded fallback
    ///
    /// Trailing whitespace is trimmed so editors adding a final newline do
    /// not change what is sent to the backend.
    pub fn load(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load: called");
        for dir in [&self.override_dir, &self.project_dir].into_iter().flatten() {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                info!("Loading prompt '{}' from {}", name, path.display());
                return std::fs::read_to_string(&path)
                    .map(|s| s.trim_end().to_string())
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
            debug!(?path, "PromptLoader::load: not found");
        }

        match embedded::get_embedded(name) {
            Some(content) => {
                debug!(%name, "PromptLoader::load: using embedded");
                Ok(content.trim_end().to_string())
            }
            None => Err(eyre!(
                "Prompt template not found: {} (available: {})",
                name,
                embedded::NAMES.join(", ")
            )),
        }
    }
}
