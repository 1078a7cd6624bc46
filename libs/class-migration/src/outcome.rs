// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Per-object failure aggregation
//!
//! Workers append their own failure and never read anyone else's. The map is
//! only handed out as an [`OutcomeSet`] once every worker has been joined.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tokio::sync::Mutex;
use tracing::warn;

use crate::error::CopyError;

/// Failed keys and their errors. Objects that were copied or skipped are
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeSet {
    failures: BTreeMap<String, CopyError>,
}

impl OutcomeSet {
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn get(&self, key: &str) -> Option<&CopyError> {
        self.failures.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.failures.contains_key(key)
    }

    /// Failures ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CopyError)> {
        self.failures.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.failures.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a OutcomeSet {
    type Item = (&'a String, &'a CopyError);
    type IntoIter = std::collections::btree_map::Iter<'a, String, CopyError>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}

/// Shared collector that concurrently finishing workers record into.
#[derive(Debug, Default)]
pub struct OutcomeAggregator {
    failures: Mutex<BTreeMap<String, CopyError>>,
}

impl OutcomeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `key`. An existing entry is never overwritten;
    /// returns `false` if `key` had already been recorded.
    pub async fn record(&self, key: &str, error: CopyError) -> bool {
        let mut failures = self.failures.lock().await;
        match failures.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(error);
                true
            }
            Entry::Occupied(existing) => {
                warn!(
                    key = %key,
                    kept = %existing.get(),
                    dropped = %error,
                    "Duplicate failure report ignored"
                );
                false
            }
        }
    }

    /// Copy of everything recorded so far.
    pub async fn snapshot(&self) -> OutcomeSet {
        OutcomeSet {
            failures: self.failures.lock().await.clone(),
        }
    }

    /// Consume the aggregator once all workers are done.
    pub fn into_outcome(self) -> OutcomeSet {
        OutcomeSet {
            failures: self.failures.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    #[tokio::test]
    async fn test_record_and_read_back() {
        let agg = OutcomeAggregator::new();
        assert!(agg.record("b", CopyError::service("denied")).await);
        assert!(agg.record("a", CopyError::transport("reset")).await);

        let outcome = agg.into_outcome();
        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(outcome.get("b"), Some(&CopyError::service("denied")));
    }

    #[tokio::test]
    async fn test_first_report_wins() {
        let agg = OutcomeAggregator::new();
        assert!(agg.record("k", CopyError::service("first")).await);
        assert!(!agg.record("k", CopyError::service("second")).await);

        let outcome = agg.into_outcome();
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.get("k"), Some(&CopyError::service("first")));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers() {
        let agg = Arc::new(OutcomeAggregator::new());
        let mut handles = Vec::new();
        for i in 0..64 {
            let agg = Arc::clone(&agg);
            handles.push(tokio::spawn(async move {
                agg.record(&format!("key-{i:02}"), CopyError::service("boom"))
                    .await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        let agg = Arc::try_unwrap(agg).unwrap();
        let outcome = agg.into_outcome();
        assert_eq!(outcome.len(), 64);
        assert!(outcome.contains("key-00"));
        assert!(outcome.contains("key-63"));
    }

    #[test]
    fn test_empty_outcome() {
        let outcome = OutcomeAggregator::new().into_outcome();
        assert!(outcome.is_empty());
        assert_eq!(outcome.iter().count(), 0);
    }
}
