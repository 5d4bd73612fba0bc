mod args;
mod output;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};
use domaincheck_lib::{
    BatchOptions, BatchRunner, DomainValidator, JobState, JobStatus, ValidationOptions,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let invalid_seen = match &cli.cmd {
        Commands::Validate { domain } => validate_single(domain, &cli).await?,
        Commands::Batch {
            file,
            workers,
            timeout_ms,
            no_progress,
        } => run_batch(file, *workers, *timeout_ms, *no_progress, &cli).await?,
    };

    // codes de sortie : 0 OK, 2 invalids, 1 fatal
    if invalid_seen {
        std::process::exit(2);
    }
    Ok(())
}

async fn validate_single(domain: &str, cli: &Cli) -> Result<bool> {
    let validator = DomainValidator::new(ValidationOptions::default());
    let result = validator.validate(domain).await;
    output::write_results(std::slice::from_ref(&result), None, cli)?;
    Ok(!result.is_valid)
}

async fn run_batch(
    file: &str,
    workers: usize,
    timeout_ms: u64,
    no_progress: bool,
    cli: &Cli,
) -> Result<bool> {
    let content = std::fs::read_to_string(file).with_context(|| format!("read {file}"))?;
    let domains: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if domains.is_empty() {
        bail!("no domains found in {file}");
    }

    let workers = if (1..=200).contains(&workers) {
        workers
    } else {
        eprintln!("Warning: --workers should be between 1-200. Using 50.");
        50
    };

    let options = BatchOptions {
        unit_timeout_ms: timeout_ms,
        ..Default::default()
    };
    let validator = Arc::new(DomainValidator::new(ValidationOptions::default()));
    let runner = BatchRunner::new(validator, options);

    let id = runner.run_batch(domains, workers)?;
    let state = watch_until_completed(&runner, id, no_progress).await?;

    let summary = state.summary.as_ref();
    output::write_results(&state.results, summary, cli)?;
    Ok(output::any_invalid(&state.results))
}

async fn watch_until_completed(
    runner: &BatchRunner,
    id: domaincheck_lib::JobId,
    no_progress: bool,
) -> Result<JobState> {
    let total = runner
        .get_state(id)
        .map(|state| state.total)
        .unwrap_or_default();

    let bar = if no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .context("progress bar template")?,
        );
        bar
    };

    loop {
        let Some(state) = runner.get_state(id) else {
            bail!("job {id} disappeared");
        };
        bar.set_position(state.completed as u64);
        bar.set_message(format!(
            "{:.1}/sec, ETA {:.0}s",
            state.processing_rate, state.eta_seconds
        ));
        if state.status == JobStatus::Completed {
            bar.finish_and_clear();
            return Ok(state);
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}
