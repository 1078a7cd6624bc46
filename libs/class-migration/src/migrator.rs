// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! One migration run: enumerate, plan, execute

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::RunConfig;
use crate::enumerator::list_all_objects;
use crate::error::MigrationError;
use crate::executor::BoundedExecutor;
use crate::observer::MigrationObserver;
use crate::outcome::OutcomeSet;
use crate::planner::plan_all;
use crate::store::ObjectStore;

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Objects returned by the listing
    pub listed: usize,
    /// Objects already at the target class
    pub skipped: usize,
    /// Copies issued
    pub attempted: usize,
    /// Copies that failed, by key
    pub failures: OutcomeSet,
    pub elapsed: Duration,
}

impl MigrationSummary {
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives a migration of one bucket against an [`ObjectStore`].
pub struct Migrator {
    store: Arc<dyn ObjectStore>,
    config: RunConfig,
}

impl Migrator {
    pub fn new(store: Arc<dyn ObjectStore>, config: RunConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the migration to completion.
    ///
    /// Fails only if the configuration is unusable or the bucket cannot be
    /// fully listed. Copy failures are reported in the summary.
    pub async fn run(
        &self,
        observer: Arc<dyn MigrationObserver>,
    ) -> Result<MigrationSummary, MigrationError> {
        let started = Instant::now();
        let bucket = self.config.bucket();
        let target = self.config.target_class();

        let executor = BoundedExecutor::new(self.config.concurrency_limit())?;

        let objects = list_all_objects(self.store.as_ref(), bucket).await?;
        let listed = objects.len();
        observer.on_listed(listed);

        let plan = plan_all(objects, target);
        for descriptor in &plan.skipped {
            observer.on_skipped(descriptor);
        }

        let skipped = plan.skipped.len();
        let attempted = plan.tasks.len();

        info!(
            bucket = %bucket,
            target = %target,
            listed,
            skipped,
            to_migrate = attempted,
            "Migration planned"
        );

        let failures = executor
            .execute(Arc::clone(&self.store), bucket, plan.tasks, observer)
            .await;

        let summary = MigrationSummary {
            listed,
            skipped,
            attempted,
            failures,
            elapsed: started.elapsed(),
        };

        info!(
            bucket = %bucket,
            succeeded = summary.succeeded(),
            failed = summary.failures.len(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Migration finished"
        );

        Ok(summary)
    }
}
