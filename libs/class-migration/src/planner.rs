// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Skip-or-migrate decision for each listed object

use crate::store::{ObjectDescriptor, StorageClass};

/// A copy that must be issued to move one object to the target class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationTask {
    pub descriptor: ObjectDescriptor,
    pub target: StorageClass,
}

impl MigrationTask {
    pub fn key(&self) -> &str {
        &self.descriptor.key
    }
}

/// Every listed object, classified exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Objects that need a copy, in discovery order
    pub tasks: Vec<MigrationTask>,
    /// Objects already at the target class
    pub skipped: Vec<ObjectDescriptor>,
}

/// Decide whether `descriptor` needs migrating to `target`.
pub fn plan(descriptor: &ObjectDescriptor, target: StorageClass) -> Option<MigrationTask> {
    if descriptor.current_storage_class == Some(target) {
        return None;
    }
    Some(MigrationTask {
        descriptor: descriptor.clone(),
        target,
    })
}

/// Classify a full listing.
pub fn plan_all(descriptors: Vec<ObjectDescriptor>, target: StorageClass) -> Plan {
    let mut result = Plan::default();
    for descriptor in descriptors {
        match plan(&descriptor, target) {
            Some(task) => result.tasks.push(task),
            None => result.skipped.push(descriptor),
        }
    }
    result
}
