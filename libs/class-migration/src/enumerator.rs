// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Bucket enumeration
//!
//! Walks every page of a bucket listing and returns the complete set of
//! object descriptors in discovery order. A failure on any page discards
//! everything listed so far: the batch is only ever planned against a
//! complete listing.

use tracing::{debug, info};

use crate::error::ListError;
use crate::store::{ObjectDescriptor, ObjectStore};

/// List every object in `bucket`, following continuation tokens.
pub async fn list_all_objects(
    store: &dyn ObjectStore,
    bucket: &str,
) -> Result<Vec<ObjectDescriptor>, ListError> {
    let mut objects = Vec::new();
    let mut continuation: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = store.list_page(bucket, continuation.take()).await?;
        pages += 1;

        debug!(
            bucket = %bucket,
            page = pages,
            page_objects = page.objects.len(),
            has_more = page.next.is_some(),
            "Listed page"
        );

        objects.extend(page.objects);

        match page.next {
            Some(token) if !token.is_empty() => continuation = Some(token),
            _ => break,
        }
    }

    info!(
        bucket = %bucket,
        pages,
        objects = objects.len(),
        "Bucket enumeration complete"
    );

    Ok(objects)
}
