use std::fmt::Write as _;

use anyhow::{Result, bail};

use domaincheck_lib::{JobSummary, ValidationResult};

#[cfg(feature = "with-csv")]
use domaincheck_lib::categorize;

use crate::args::Cli;

pub fn write_results(
    results: &[ValidationResult],
    summary: Option<&JobSummary>,
    cli: &Cli,
) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(results, summary),
        "report" => emit(&render_report(results, summary), cli),
        "json" => write_json(results, summary, cli),
        "csv" => write_csv(results, cli),
        other => bail!("unknown --format '{other}', use: human|report|json|csv"),
    }
}

pub fn any_invalid(results: &[ValidationResult]) -> bool {
    results.iter().any(|r| !r.is_valid)
}

fn write_human(results: &[ValidationResult], summary: Option<&JobSummary>) -> Result<()> {
    for result in results {
        if result.is_valid {
            println!("[OK]      {} :: {}", result.domain, result.reason);
        } else {
            println!("[INVALID] {} :: {}", result.domain, result.reason);
        }
        if !result.details.mx_records.is_empty() {
            println!("          mx: {}", result.details.mx_records.join(", "));
        }
        if let Some(test) = &result.details.smtp_test {
            println!("          smtp: {test}");
        }
    }
    if let Some(summary) = summary {
        print_summary(summary, results);
    }
    Ok(())
}

fn print_summary(summary: &JobSummary, results: &[ValidationResult]) {
    println!();
    println!("{}", "=".repeat(80));
    println!("SUMMARY:");
    println!("Total domains processed: {}", summary.total);
    println!("Can receive emails: {}", summary.valid);
    println!("Cannot receive emails: {}", summary.invalid);
    println!("Success rate: {:.1}%", summary.success_rate);
    println!("Processing time: {:.1} seconds", summary.processing_time_secs);
    println!("Average rate: {:.1} domains/second", summary.average_rate);

    println!();
    println!("CATEGORIES:");
    for (category, count) in &summary.categories {
        let percentage = *count as f64 * 100.0 / summary.total.max(1) as f64;
        println!("  {category}: {count} ({percentage:.1}%)");
    }

    let failed: Vec<&ValidationResult> = results.iter().filter(|r| !r.is_valid).collect();
    if !failed.is_empty() {
        println!();
        println!("Sample of failed domains (showing first 10):");
        for (i, result) in failed.iter().take(10).enumerate() {
            println!("  {}. {}: {}", i + 1, result.domain, result.reason);
        }
    }
}

/// Plain-text export: summary, category breakdown, then one block per domain.
fn render_report(results: &[ValidationResult], summary: Option<&JobSummary>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Domain Email Capability Validation Results");
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out);

    if let Some(summary) = summary {
        let _ = writeln!(out, "SUMMARY:");
        let _ = writeln!(out, "Total domains: {}", summary.total);
        let _ = writeln!(out, "Can receive emails: {}", summary.valid);
        let _ = writeln!(out, "Cannot receive emails: {}", summary.invalid);
        let _ = writeln!(out, "Success rate: {:.1}%", summary.success_rate);
        let _ = writeln!(
            out,
            "Processing time: {:.1} seconds",
            summary.processing_time_secs
        );
        let _ = writeln!(
            out,
            "Processing rate: {:.1} domains/second",
            summary.average_rate
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "CATEGORIES:");
        for (category, count) in &summary.categories {
            let percentage = *count as f64 * 100.0 / summary.total.max(1) as f64;
            let _ = writeln!(out, "  {category}: {count} ({percentage:.1}%)");
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "DETAILED RESULTS:");
    let _ = writeln!(out, "{}", "-".repeat(80));
    for result in results {
        let status = if result.is_valid {
            "CAN_RECEIVE_EMAILS"
        } else {
            "CANNOT_RECEIVE_EMAILS"
        };
        let _ = writeln!(
            out,
            "{status:<21} | {:<35} | {}",
            result.domain, result.reason
        );
        if !result.details.mx_records.is_empty() {
            let _ = writeln!(
                out,
                "                      +- Mail Servers: {}",
                result.details.mx_records.join(", ")
            );
        }
        if let Some(test) = &result.details.smtp_test {
            let _ = writeln!(out, "                      +- SMTP Test: {test}");
        }
    }
    out
}

#[cfg(feature = "with-serde")]
fn write_json(
    results: &[ValidationResult],
    summary: Option<&JobSummary>,
    cli: &Cli,
) -> Result<()> {
    let payload = serde_json::json!({
        "results": results,
        "summary": summary,
    });
    emit(&serde_json::to_string_pretty(&payload)?, cli)
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[ValidationResult], _: Option<&JobSummary>, _: &Cli) -> Result<()> {
    bail!("format=json requires the 'with-serde' feature")
}

#[cfg(feature = "with-csv")]
fn write_csv(results: &[ValidationResult], cli: &Cli) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["domain", "is_valid", "reason", "category", "mx_servers", "smtp_test"])?;
    for result in results {
        let mx_servers = result.details.mx_records.join("|");
        wtr.write_record([
            result.domain.as_str(),
            if result.is_valid { "true" } else { "false" },
            result.reason.as_str(),
            categorize(result).label(),
            mx_servers.as_str(),
            result.details.smtp_test.as_deref().unwrap_or(""),
        ])?;
    }
    let data = wtr.into_inner()?;
    emit(&String::from_utf8(data)?, cli)
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[ValidationResult], _: &Cli) -> Result<()> {
    bail!("format=csv requires the 'with-csv' feature")
}

fn emit(content: &str, cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        write_all_atomically(path, content.as_bytes())?;
    } else {
        print!("{content}");
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}
