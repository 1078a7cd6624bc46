// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use class_migration::config::{DEFAULT_CONCURRENCY_LIMIT, DEFAULT_PROFILE};
use class_migration::{ConfigError, RunConfig};

/// Change the storage class of every object in an S3 bucket
#[derive(Parser, Debug, Clone)]
#[command(name = "rrs-converter")]
#[command(version)]
pub struct Cli {
    /// Bucket whose objects are converted
    #[arg(short, long, env = "RRS_BUCKET")]
    pub bucket: String,

    /// Region of the bucket (default: us-east-1)
    #[arg(short, long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Shared credentials file (default: ~/.aws/credentials)
    #[arg(short, long, env = "AWS_SHARED_CREDENTIALS_FILE")]
    pub config: Option<PathBuf>,

    /// Section of the credentials file to use
    #[arg(short, long, env = "AWS_PROFILE", default_value = DEFAULT_PROFILE)]
    pub section: String,

    /// Storage class to convert objects to
    #[arg(long, default_value = "REDUCED_REDUNDANCY")]
    pub storage_class: String,

    /// Maximum number of concurrent copy requests
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_CONCURRENCY_LIMIT,
        allow_negative_numbers = true
    )]
    pub maxcon: i64,

    /// Custom endpoint for S3-compatible stores
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// True when the region falls back to the default.
    pub fn region_defaulted(&self) -> bool {
        self.region.as_deref().is_none_or(|r| r.trim().is_empty())
    }

    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let mut builder = RunConfig::builder(&self.bucket)
            .profile(&self.section)
            .target_class(&self.storage_class)
            .concurrency_limit(self.maxcon);

        if let Some(path) = self.config.clone().or_else(default_credentials_file) {
            builder = builder.credentials_file(path);
        }
        if let Some(region) = &self.region {
            builder = builder.region(region);
        }
        if let Some(endpoint) = &self.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        builder.build()
    }
}

/// `~/.aws/credentials`, if a home directory is known.
pub fn default_credentials_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".aws").join("credentials"))
}
