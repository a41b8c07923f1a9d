//! Async discovery of PDF validation targets.

use globset::{GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{Result, ValidationError};

/// Recursive async discovery of validation targets under a path, filtered
/// by extension and optional include/exclude glob patterns.
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    extensions: Vec<String>,
    include_set: Option<GlobSet>,
    exclude_set: Option<GlobSet>,
}

impl FileDiscovery {
    pub fn new() -> Self {
        Self {
            extensions: vec!["pdf".to_string()],
            include_set: None,
            exclude_set: None,
        }
    }

    /// Set file extensions to discover
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Add include patterns (glob syntax)
    pub fn with_include_patterns(mut self, patterns: Vec<String>) -> Result<Self> {
        self.include_set = build_glob_set(patterns, "include")?;
        Ok(self)
    }

    /// Add exclude patterns (glob syntax)
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Result<Self> {
        self.exclude_set = build_glob_set(patterns, "exclude")?;
        Ok(self)
    }

    /// Discover target files under `path` (a file or a directory tree).
    pub async fn discover_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let metadata = fs::metadata(path).await?;

        let mut files = Vec::new();
        if metadata.is_file() {
            if self.should_process(path) {
                files.push(path.to_path_buf());
            }
            return Ok(files);
        }

        self.walk_directory(path, &mut files).await?;
        files.sort();
        Ok(files)
    }

    async fn walk_directory(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        // Recursion through directories needs boxing in async fns; an
        // explicit stack avoids it.
        let mut pending = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            let mut read_dir = fs::read_dir(&current).await?;
            while let Some(entry) = read_dir.next_entry().await? {
                let entry_path = entry.path();
                let file_type = entry.file_type().await?;

                if file_type.is_dir() {
                    pending.push(entry_path);
                } else if file_type.is_file() && self.should_process(&entry_path) {
                    files.push(entry_path);
                }
            }
        }

        Ok(())
    }

    fn should_process(&self, path: &Path) -> bool {
        let extension_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(e)))
            .unwrap_or(false);
        if !extension_matches {
            return false;
        }

        if let Some(ref include) = self.include_set
            && !include.is_match(path)
        {
            return false;
        }
        if let Some(ref exclude) = self.exclude_set
            && exclude.is_match(path)
        {
            return false;
        }

        true
    }
}

fn build_glob_set(patterns: Vec<String>, kind: &str) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = globset::Glob::new(&pattern).map_err(|e| {
            ValidationError::Config(format!("invalid {kind} glob pattern '{pattern}': {e}"))
        })?;
        builder.add(glob);
    }

    let set = builder
        .build()
        .map_err(|e| ValidationError::Config(format!("failed to build {kind} glob set: {e}")))?;
    Ok(Some(set))
}
