// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Bounded-concurrency execution of migration tasks
//!
//! Tasks are admitted in input order. A semaphore permit is taken *before*
//! a task is spawned, so at most `limit` copies exist at any moment and the
//! next pending task starts as soon as a running one releases its permit.
//! Spawned tasks live in a [`JoinSet`]; finished ones are reaped while
//! admitting and everything left is joined before `execute` returns.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{self, JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use crate::error::{ConfigError, CopyError, CopyErrorKind};
use crate::observer::MigrationObserver;
use crate::outcome::{OutcomeAggregator, OutcomeSet};
use crate::planner::MigrationTask;
use crate::store::ObjectStore;

/// Runs copies with a hard cap on how many are in flight.
#[derive(Debug, Clone, Copy)]
pub struct BoundedExecutor {
    limit: usize,
}

impl BoundedExecutor {
    /// A limit of zero is rejected; nothing could ever run.
    pub fn new(limit: usize) -> Result<Self, ConfigError> {
        if limit == 0 {
            return Err(ConfigError::InvalidConcurrency(0));
        }
        Ok(Self { limit })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run every task once and wait for all of them.
    ///
    /// Individual copy failures are collected into the returned
    /// [`OutcomeSet`]; they never stop the remaining tasks.
    pub async fn execute(
        &self,
        store: Arc<dyn ObjectStore>,
        bucket: &str,
        tasks: Vec<MigrationTask>,
        observer: Arc<dyn MigrationObserver>,
    ) -> OutcomeSet {
        if tasks.is_empty() {
            return OutcomeSet::default();
        }

        info!(
            bucket = %bucket,
            tasks = tasks.len(),
            limit = self.limit,
            "Starting copies"
        );

        let semaphore = Arc::new(Semaphore::new(self.limit));
        let aggregator = Arc::new(OutcomeAggregator::new());
        let bucket: Arc<str> = Arc::from(bucket);

        let mut running: JoinSet<()> = JoinSet::new();
        // Keys of spawned tasks, so a task that dies still gets accounted for
        let mut in_flight: HashMap<task::Id, String> = HashMap::new();

        for migration in tasks {
            while let Some(result) = running.try_join_next_with_id() {
                reap(result, &mut in_flight, &aggregator, observer.as_ref()).await;
            }

            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!(key = %migration.key(), error = %e, "Semaphore closed unexpectedly");
                    let err = CopyError::new(CopyErrorKind::Aborted, e.to_string());
                    observer.on_task_finished(migration.key(), Err(&err));
                    aggregator.record(migration.key(), err).await;
                    continue;
                }
            };

            let key = migration.key().to_string();
            let store = Arc::clone(&store);
            let bucket = Arc::clone(&bucket);
            let aggregator = Arc::clone(&aggregator);
            let observer = Arc::clone(&observer);

            let handle = running.spawn(async move {
                let _permit = permit;
                let key = migration.key();

                debug!(key = %key, target = %migration.target, "Copying object");

                match store.copy_in_place(&bucket, key, migration.target).await {
                    Ok(()) => {
                        debug!(key = %key, "Copy complete");
                        observer.on_task_finished(key, Ok(()));
                    }
                    Err(e) => {
                        warn!(key = %key, error = %e, "Copy failed");
                        observer.on_task_finished(key, Err(&e));
                        aggregator.record(key, e).await;
                    }
                }
            });
            in_flight.insert(handle.id(), key);
        }

        while let Some(result) = running.join_next_with_id().await {
            reap(result, &mut in_flight, &aggregator, observer.as_ref()).await;
        }

        let outcome = match Arc::try_unwrap(aggregator) {
            Ok(aggregator) => aggregator.into_outcome(),
            Err(shared) => shared.snapshot().await,
        };

        info!(
            bucket = %bucket,
            failed = outcome.len(),
            "All copies finished"
        );

        outcome
    }
}

/// Account for one finished task. Only a task that did not run to
/// completion needs recording here; normal failures record themselves.
///
/// A panicking worker only reaches this under `panic = "unwind"` (the test
/// harness). The workspace profiles abort on panic.
async fn reap(
    result: Result<(task::Id, ()), JoinError>,
    in_flight: &mut HashMap<task::Id, String>,
    aggregator: &OutcomeAggregator,
    observer: &dyn MigrationObserver,
) {
    match result {
        Ok((id, ())) => {
            in_flight.remove(&id);
        }
        Err(e) => {
            let Some(key) = in_flight.remove(&e.id()) else {
                error!(error = %e, "Unknown copy task ended abnormally");
                return;
            };
            error!(key = %key, error = %e, "Copy task ended abnormally");
            let err = CopyError::new(CopyErrorKind::Aborted, e.to_string());
            observer.on_task_finished(&key, Err(&err));
            aggregator.record(&key, err).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::ListError;
    use crate::observer::NoopObserver;
    use crate::store::{ListPage, ObjectDescriptor, StorageClass};

    /// Counts how many copies are inside `copy_in_place` at once.
    #[derive(Default)]
    struct GaugeStore {
        active: AtomicUsize,
        peak: AtomicUsize,
        calls: Mutex<Vec<String>>,
        fail: HashSet<String>,
    }

    #[async_trait]
    impl ObjectStore for GaugeStore {
        async fn list_page(
            &self,
            _bucket: &str,
            _continuation: Option<String>,
        ) -> Result<ListPage, ListError> {
            Ok(ListPage::default())
        }

        async fn copy_in_place(
            &self,
            _bucket: &str,
            key: &str,
            _target: StorageClass,
        ) -> Result<(), CopyError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            self.calls.lock().unwrap().push(key.to_string());
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            if self.fail.contains(key) {
                Err(CopyError::service(format!("InternalError on {key}")))
            } else {
                Ok(())
            }
        }
    }

    fn tasks(n: usize) -> Vec<MigrationTask> {
        (0..n)
            .map(|i| MigrationTask {
                descriptor: ObjectDescriptor::new(format!("obj-{i:03}"), StorageClass::Standard),
                target: StorageClass::Glacier,
            })
            .collect()
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert_eq!(
            BoundedExecutor::new(0).unwrap_err(),
            ConfigError::InvalidConcurrency(0)
        );
    }

    #[tokio::test]
    async fn test_empty_input() {
        let store = Arc::new(GaugeStore::default());
        let outcome = BoundedExecutor::new(4)
            .unwrap()
            .execute(store.clone(), "b", Vec::new(), Arc::new(NoopObserver))
            .await;
        assert!(outcome.is_empty());
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_never_exceeds_limit_and_fills_it() {
        for limit in [1, 2, 3, 8] {
            let store = Arc::new(GaugeStore::default());
            let outcome = BoundedExecutor::new(limit)
                .unwrap()
                .execute(store.clone(), "b", tasks(40), Arc::new(NoopObserver))
                .await;
            assert!(outcome.is_empty());
            assert_eq!(store.peak.load(Ordering::SeqCst), limit, "limit {limit}");
            assert_eq!(store.active.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_each_task_attempted_once() {
        let store = Arc::new(GaugeStore::default());
        BoundedExecutor::new(5)
            .unwrap()
            .execute(store.clone(), "b", tasks(57), Arc::new(NoopObserver))
            .await;

        let calls = store.calls.lock().unwrap();
        assert_eq!(calls.len(), 57);
        let unique: HashSet<_> = calls.iter().collect();
        assert_eq!(unique.len(), 57);
    }

    #[tokio::test]
    async fn test_limit_one_admits_in_order() {
        let store = Arc::new(GaugeStore::default());
        BoundedExecutor::new(1)
            .unwrap()
            .execute(store.clone(), "b", tasks(6), Arc::new(NoopObserver))
            .await;

        let expected: Vec<_> = (0..6).map(|i| format!("obj-{i:03}")).collect();
        assert_eq!(*store.calls.lock().unwrap(), expected);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_failures_collected_without_stopping_batch() {
        let store = Arc::new(GaugeStore {
            fail: ["obj-003", "obj-011"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        });
        let outcome = BoundedExecutor::new(3)
            .unwrap()
            .execute(store.clone(), "b", tasks(15), Arc::new(NoopObserver))
            .await;

        assert_eq!(store.calls.lock().unwrap().len(), 15);
        assert_eq!(outcome.keys().collect::<Vec<_>>(), vec!["obj-003", "obj-011"]);
        assert_eq!(
            outcome.get("obj-003").map(|e| e.kind),
            Some(CopyErrorKind::Service)
        );
    }

    /// Panics inside `copy_in_place` for one key.
    #[derive(Default)]
    struct PanickingStore {
        panic_on: String,
        copied: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ObjectStore for PanickingStore {
        async fn list_page(
            &self,
            _bucket: &str,
            _continuation: Option<String>,
        ) -> Result<ListPage, ListError> {
            Ok(ListPage::default())
        }

        async fn copy_in_place(
            &self,
            _bucket: &str,
            key: &str,
            _target: StorageClass,
        ) -> Result<(), CopyError> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            if key == self.panic_on {
                panic!("copy worker for {key} crashed");
            }
            self.copied.lock().unwrap().push(key.to_string());
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_panicking_worker_recorded_as_aborted() {
        let store = Arc::new(PanickingStore {
            panic_on: "obj-002".to_string(),
            ..Default::default()
        });
        let observer = Arc::new(CountingObserver::default());
        let outcome = BoundedExecutor::new(2)
            .unwrap()
            .execute(store.clone(), "b", tasks(6), observer.clone())
            .await;

        assert_eq!(outcome.keys().collect::<Vec<_>>(), vec!["obj-002"]);
        assert_eq!(
            outcome.get("obj-002").map(|e| e.kind),
            Some(CopyErrorKind::Aborted)
        );

        let mut copied = store.copied.lock().unwrap().clone();
        copied.sort();
        assert_eq!(
            copied,
            vec!["obj-000", "obj-001", "obj-003", "obj-004", "obj-005"]
        );
        assert_eq!(observer.ok.load(Ordering::SeqCst), 5);
        assert_eq!(observer.failed.load(Ordering::SeqCst), 1);
    }

    #[derive(Default)]
    struct CountingObserver {
        ok: AtomicUsize,
        failed: AtomicUsize,
    }

    impl MigrationObserver for CountingObserver {
        fn on_task_finished(&self, _key: &str, result: Result<(), &CopyError>) {
            match result {
                Ok(()) => self.ok.fetch_add(1, Ordering::SeqCst),
                Err(_) => self.failed.fetch_add(1, Ordering::SeqCst),
            };
        }
    }

    #[tokio::test]
    async fn test_observer_sees_every_completion() {
        let store = Arc::new(GaugeStore {
            fail: ["obj-000"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        });
        let observer = Arc::new(CountingObserver::default());
        BoundedExecutor::new(2)
            .unwrap()
            .execute(store, "b", tasks(9), observer.clone())
            .await;

        assert_eq!(observer.ok.load(Ordering::SeqCst), 8);
        assert_eq!(observer.failed.load(Ordering::SeqCst), 1);
    }
}
