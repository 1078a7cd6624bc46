// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Run configuration

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::store::StorageClass;

/// Region used when none is given
pub const DEFAULT_REGION: &str = "us-east-1";

/// Credentials profile used when none is given
pub const DEFAULT_PROFILE: &str = "default";

/// Target class used when none is given
pub const DEFAULT_TARGET_CLASS: StorageClass = StorageClass::ReducedRedundancy;

/// Default number of concurrent copy operations
pub const DEFAULT_CONCURRENCY_LIMIT: i64 = 10;

/// Where credentials are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsSource {
    /// Shared credentials file
    pub file: PathBuf,
    /// Section of the file to use
    pub profile: String,
}

/// Settings for one migration run. Validated on construction and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    bucket: String,
    region: String,
    credentials: CredentialsSource,
    target_class: StorageClass,
    concurrency_limit: usize,
    endpoint_url: Option<String>,
}

impl RunConfig {
    pub fn builder(bucket: impl Into<String>) -> RunConfigBuilder {
        RunConfigBuilder {
            bucket: bucket.into(),
            region: None,
            credentials_file: None,
            profile: None,
            target_class: None,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            endpoint_url: None,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn credentials(&self) -> &CredentialsSource {
        &self.credentials
    }

    pub fn target_class(&self) -> StorageClass {
        self.target_class
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }
}

/// Collects raw operator input for a [`RunConfig`].
#[derive(Debug, Clone)]
pub struct RunConfigBuilder {
    bucket: String,
    region: Option<String>,
    credentials_file: Option<PathBuf>,
    profile: Option<String>,
    target_class: Option<String>,
    concurrency_limit: i64,
    endpoint_url: Option<String>,
}

impl RunConfigBuilder {
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn credentials_file(mut self, path: impl AsRef<Path>) -> Self {
        self.credentials_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn target_class(mut self, class: impl Into<String>) -> Self {
        self.target_class = Some(class.into());
        self
    }

    pub fn concurrency_limit(mut self, limit: i64) -> Self {
        self.concurrency_limit = limit;
        self
    }

    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let bucket = self.bucket.trim().to_string();
        if bucket.is_empty() {
            return Err(ConfigError::MissingBucket);
        }

        let target_class = match self.target_class.as_deref() {
            Some(class) => StorageClass::parse_target(class)?,
            None => DEFAULT_TARGET_CLASS,
        };

        let concurrency_limit = usize::try_from(self.concurrency_limit)
            .ok()
            .filter(|limit| *limit > 0)
            .ok_or(ConfigError::InvalidConcurrency(self.concurrency_limit))?;

        let file = self
            .credentials_file
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(ConfigError::MissingCredentialsPath)?;

        let region = self
            .region
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let profile = self
            .profile
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        Ok(RunConfig {
            bucket,
            region,
            credentials: CredentialsSource { file, profile },
            target_class,
            concurrency_limit,
            endpoint_url: self.endpoint_url.filter(|u| !u.is_empty()),
        })
    }
}
