// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! rrs-converter binary

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use class_migration::config::DEFAULT_REGION;
use class_migration::{MigrationError, Migrator};
use rrs_converter::args::Cli;
use rrs_converter::progress::ProgressObserver;
use rrs_converter::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER, report};
use s3_object_store::S3ObjectStore;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
        ))
        .with_writer(std::io::stderr)
        .init();

    let started = Instant::now();
    let code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    };

    println!(
        "Conversion took: {}",
        report::format_elapsed(started.elapsed())
    );
    code
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.run_config().context("Invalid configuration")?;
    if cli.region_defaulted() {
        println!("No region specified, using default region {}", DEFAULT_REGION);
    }

    let store = S3ObjectStore::connect(&config)
        .await
        .map_err(MigrationError::from)
        .context("Failed to connect to the object store")?;

    let progress = Arc::new(ProgressObserver::new());
    let migrator = Migrator::new(Arc::new(store), config);
    let result = migrator.run(progress.clone()).await;
    progress.finish();
    let summary = result.context("Conversion aborted")?;

    Ok(report::finish(
        &summary,
        migrator.config().bucket(),
        Path::new(""),
    ))
}
