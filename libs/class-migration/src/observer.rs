// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Progress hooks
//!
//! Callbacks run on worker tasks and must not block.

use crate::error::CopyError;
use crate::store::ObjectDescriptor;

/// Receives progress events while a migration runs.
pub trait MigrationObserver: Send + Sync {
    /// The bucket listing is complete and holds `total` objects.
    fn on_listed(&self, _total: usize) {}

    /// `descriptor` is already at the target class.
    fn on_skipped(&self, _descriptor: &ObjectDescriptor) {}

    /// The copy for `key` finished.
    fn on_task_finished(&self, _key: &str, _result: Result<(), &CopyError>) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MigrationObserver for NoopObserver {}
