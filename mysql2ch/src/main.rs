//! MySQL to ClickHouse DDL generator.
//!
//! Connects once, reads column metadata for each requested table, and prints
//! one ClickHouse `CREATE TABLE` statement per table in the order given.
//!
//! # Guarantees
//! - Read-only catalog access, one query per table
//! - Credentials never appear in logs
//! - stdout carries only DDL

mod cli;

use anyhow::{Context, bail};
use clap::Parser;
use cli::Cli;
use mysql2ch_core::{
    BatchReport,
    adapters::{create_catalog, mysql::normalize_connection_string},
    error::redact_database_url,
    init_logging, parse_table_list, run_batch,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    let report = run(&cli).await.map_err(|e| {
        error!("{:#}", e);
        e
    })?;

    if cli.strict && report.has_failures() {
        bail!(
            "{} of {} tables failed",
            report.failed_count(),
            report.tables.len()
        );
    }

    Ok(())
}

/// Validates input, connects, processes every table and writes the results.
async fn run(cli: &Cli) -> anyhow::Result<BatchReport> {
    let tables = parse_table_list(&cli.tables)?;
    let renderer = cli.renderer()?;
    let url = normalize_connection_string(&cli.conn)?;

    info!("Target: {}", redact_database_url(&url));
    info!("Tables: {}", tables.join(", "));

    let catalog = create_catalog(&url).await?;
    info!(
        "Connected to {} catalog at {}",
        catalog.source_name(),
        catalog.connection_config()
    );

    let report = run_batch(catalog.as_ref(), &renderer, &tables).await;
    catalog.close().await;

    match &cli.output {
        Some(path) => write_statements_to_file(&report, path)?,
        None => report.write_statements(&mut std::io::stdout().lock())?,
    }

    if let Some(path) = &cli.report {
        let json = report.to_json_pretty()?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("✓ Report saved to {}", path.display());
    }

    Ok(report)
}

fn write_statements_to_file(report: &BatchReport, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    report.write_statements(&mut BufWriter::new(file))?;
    info!(
        "✓ {} statements saved to {}",
        report.statements().count(),
        path.display()
    );
    Ok(())
}
