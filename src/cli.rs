use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only show critical errors
    Quiet,
    /// Show standard information
    #[default]
    Normal,
    /// Show detailed information
    Verbose,
}

/// Main application configuration derived from CLI
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub path: PathBuf,
    pub engine: PathBuf,
    pub extensions: Vec<String>,
    pub threads: usize,
    pub timeout: Duration,
    pub work_dir: PathBuf,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub verbose: bool,
    pub quiet: bool,
    pub json: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            path: cli.path.clone(),
            engine: cli.engine.clone(),
            extensions: cli.get_extensions(),
            threads: cli.get_thread_count(),
            timeout: Duration::from_secs(cli.timeout),
            work_dir: cli.get_work_dir(),
            include_patterns: cli.include_patterns.clone(),
            exclude_patterns: cli.exclude_patterns.clone(),
            verbose: cli.verbose,
            quiet: cli.quiet,
            json: cli.json,
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// PDF/A conformance validation tool
#[derive(Parser, Debug, Clone)]
#[command(name = "validate-pdfa")]
#[command(about = "Validate PDF documents against PDF/A profiles with an external veraPDF-style engine")]
#[command(version)]
pub struct Cli {
    /// Path to scan for PDF files (directory or file)
    #[arg(help = "Directory or file to validate")]
    pub path: PathBuf,

    /// Path to the validation engine binary
    #[arg(long = "engine", help = "Path to the veraPDF-style engine binary")]
    pub engine: PathBuf,

    /// File extensions to process (comma-separated)
    #[arg(
        short = 'e',
        long = "extensions",
        default_value = "pdf",
        help = "File extensions to process (e.g., 'pdf')"
    )]
    pub extensions: String,

    /// Number of concurrent validations
    #[arg(
        short = 't',
        long = "threads",
        help = "Number of concurrent validations"
    )]
    pub threads: Option<usize>,

    /// Engine wall-clock budget per document, in seconds
    #[arg(long = "timeout", default_value = "1200")]
    pub timeout: u64,

    /// Directory for per-invocation engine output files
    #[arg(long = "work-dir")]
    pub work_dir: Option<PathBuf>,

    /// Include file patterns (glob syntax)
    #[arg(long = "include", action = clap::ArgAction::Append)]
    pub include_patterns: Vec<String>,

    /// Exclude file patterns (glob syntax)
    #[arg(long = "exclude", action = clap::ArgAction::Append)]
    pub exclude_patterns: Vec<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Emit the aggregated results as JSON on stdout
    #[arg(long = "json")]
    pub json: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn get_extensions(&self) -> Vec<String> {
        self.extensions
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.path.exists() {
            return Err(format!("Path does not exist: {}", self.path.display()));
        }
        if !self.engine.exists() {
            return Err(format!(
                "Engine binary does not exist: {}",
                self.engine.display()
            ));
        }
        if let Some(threads) = self.threads
            && threads == 0
        {
            return Err("Number of threads must be greater than 0".to_string());
        }
        if self.timeout == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn get_thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }

    pub fn get_work_dir(&self) -> PathBuf {
        self.work_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("validate-pdfa"))
    }
}
