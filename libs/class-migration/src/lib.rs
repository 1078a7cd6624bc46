// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Storage Class Migration Engine
//!
//! Moves every object in a bucket to a target storage class by issuing
//! in-place server-side copies. The engine:
//!
//! - Lists the whole bucket, following pagination, before acting on it
//! - Skips objects that are already at the target class
//! - Runs the remaining copies with a hard cap on concurrent requests
//! - Collects per-object failures without stopping the rest of the batch
//!
//! # Modules
//!
//! - [`config`] - Validated run configuration
//! - [`enumerator`] - Paginated bucket listing
//! - [`planner`] - Skip-or-migrate decision
//! - [`executor`] - Bounded-concurrency copy execution
//! - [`outcome`] - Failure aggregation
//! - [`migrator`] - End-to-end run
//! - [`store`] - The object store capability the engine drives

pub mod config;
pub mod enumerator;
pub mod error;
pub mod executor;
pub mod migrator;
pub mod observer;
pub mod outcome;
pub mod planner;
pub mod store;

pub use config::{CredentialsSource, RunConfig};
pub use error::{AuthError, ConfigError, CopyError, CopyErrorKind, ListError, MigrationError};
pub use executor::BoundedExecutor;
pub use migrator::{MigrationSummary, Migrator};
pub use observer::{MigrationObserver, NoopObserver};
pub use outcome::{OutcomeAggregator, OutcomeSet};
pub use planner::{MigrationTask, Plan};
pub use store::{ListPage, ObjectDescriptor, ObjectStore, StorageClass};
