// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Object store capability and the types that cross it

use async_trait::async_trait;
use strum::{
    AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr, VariantNames,
};

use crate::error::{ConfigError, CopyError, ListError};

/// Storage classes understood by the store.
///
/// Rendered in the store's canonical upper-snake form. Parsing ignores ASCII
/// case so operator input only has to be normalized once.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    VariantNames,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum StorageClass {
    Standard,
    ReducedRedundancy,
    StandardIa,
    OnezoneIa,
    IntelligentTiering,
    Glacier,
    GlacierIr,
    DeepArchive,
    Outposts,
    Snow,
    ExpressOnezone,
}

impl StorageClass {
    /// Parse an operator-supplied target class.
    pub fn parse_target(value: &str) -> Result<Self, ConfigError> {
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::UnknownStorageClass(value.to_string()))
    }

    /// Map a class string reported by the store. Unknown classes yield
    /// `None`; such objects never match a target.
    pub fn from_store(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    /// All canonical class names, in declaration order.
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(|c| c.into()).collect()
    }
}

/// Snapshot of one object, taken at enumeration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
    pub key: String,
    /// `None` when the store reported a class outside [`StorageClass`]
    pub current_storage_class: Option<StorageClass>,
}

impl ObjectDescriptor {
    pub fn new(key: impl Into<String>, class: StorageClass) -> Self {
        Self {
            key: key.into(),
            current_storage_class: Some(class),
        }
    }
}

/// One page of a bucket listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub objects: Vec<ObjectDescriptor>,
    /// Continuation token for the next page, `None` on the last page
    pub next: Option<String>,
}

/// The storage service a migration runs against.
///
/// Implementations must be safe to call concurrently; the executor issues up
/// to its concurrency limit of `copy_in_place` calls at once.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch one page of the bucket listing, starting at `continuation`.
    async fn list_page(
        &self,
        bucket: &str,
        continuation: Option<String>,
    ) -> Result<ListPage, ListError>;

    /// Rewrite `key` onto itself with storage class `target`.
    async fn copy_in_place(
        &self,
        bucket: &str,
        key: &str,
        target: StorageClass,
    ) -> Result<(), CopyError>;
}
