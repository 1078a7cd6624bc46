// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for class-migration
//!
//! Configuration, authentication and listing errors are fatal to a run.
//! A [`CopyError`] only ever affects the object it was raised for and ends up
//! in the [`OutcomeSet`](crate::OutcomeSet).

use std::fmt;

use thiserror::Error;

/// Invalid or missing run configuration. Raised before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No bucket was given
    #[error("bucket not specified")]
    MissingBucket,

    /// Target storage class is outside the store's closed set
    #[error("unknown storage class '{0}'")]
    UnknownStorageClass(String),

    /// Concurrency limit must be a positive integer
    #[error("concurrency limit must be at least 1, got {0}")]
    InvalidConcurrency(i64),

    /// No credentials file could be determined
    #[error("credentials file path could not be determined")]
    MissingCredentialsPath,
}

/// Credential resolution or validation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to load credentials from profile '{profile}': {message}")]
pub struct AuthError {
    pub profile: String,
    pub message: String,
}

/// Listing the bucket failed. Partial listings are never acted upon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to list objects in bucket '{bucket}': {message}")]
pub struct ListError {
    pub bucket: String,
    pub message: String,
}

/// Broad category of a failed copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyErrorKind {
    /// The store rejected the request
    Service,
    /// The request never got a response (DNS, connection, timeout)
    Transport,
    /// The worker running the copy did not finish
    Aborted,
}

impl fmt::Display for CopyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service => write!(f, "service"),
            Self::Transport => write!(f, "transport"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

/// A single object's copy operation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error: {message}")]
pub struct CopyError {
    pub kind: CopyErrorKind,
    pub message: String,
}

impl CopyError {
    pub fn new(kind: CopyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::new(CopyErrorKind::Service, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(CopyErrorKind::Transport, message)
    }
}

/// Errors that halt a migration run.
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("listing error: {0}")]
    List(#[from] ListError),
}
