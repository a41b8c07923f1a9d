use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use validate_pdfa::{
    Cli, Config, FileDiscovery, Output, ValidationConfig, ValidationEngine, ViolationTally,
    render_json,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    if let Err(message) = cli.validate() {
        eprintln!("Error: {message}");
        return ExitCode::from(2);
    }
    let config = Config::from_cli(&cli);

    match run(config).await {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::from(2)
        }
    }
}

/// Run the whole validation batch; returns whether every target validated.
async fn run(config: Config) -> anyhow::Result<bool> {
    tokio::fs::create_dir_all(&config.work_dir)
        .await
        .with_context(|| format!("creating work directory {}", config.work_dir.display()))?;

    let discovery = FileDiscovery::new()
        .with_extensions(config.extensions.clone())
        .with_include_patterns(config.include_patterns.clone())?
        .with_exclude_patterns(config.exclude_patterns.clone())?;
    let files = discovery
        .discover_files(&config.path)
        .await
        .with_context(|| format!("discovering targets under {}", config.path.display()))?;

    if files.is_empty() {
        if !config.quiet {
            println!("No PDF files found under {}", config.path.display());
        }
        return Ok(true);
    }
    tracing::info!(count = files.len(), "discovered validation targets");

    let mut engine_config = ValidationConfig::new(config.engine.clone());
    engine_config.timeout = config.timeout;
    engine_config.max_concurrent_validations = config.threads;
    engine_config.work_dir = config.work_dir.clone();
    let engine = ValidationEngine::new(engine_config)?;

    let file_results = engine.validate_files(files).await?;
    let results = validate_pdfa::ValidationResults::aggregate(file_results);

    // The tally is batch-wide state: created empty here, folded once per
    // report, read only after the batch completes.
    let mut tally = ViolationTally::new();
    for report in results.reports() {
        tally.fold(report);
    }

    if config.json {
        println!("{}", render_json(&results, &tally)?);
    } else {
        print!(
            "{}",
            Output::new(config.verbosity()).format_results(&results, &tally)
        );
    }

    Ok(!results.has_failures())
}
