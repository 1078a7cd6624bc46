// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! rrs-converter
//!
//! Command-line front end for the class-migration engine. Converts every
//! object in an S3 bucket to one storage class, reporting progress on the
//! terminal and writing failed keys to `<bucket>-error.log`.

pub mod args;
pub mod progress;
pub mod report;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "rrs_converter=info,class_migration=info,s3_object_store=info";

/// Log filter used with `--verbose` when `RUST_LOG` is unset
pub const VERBOSE_LOG_FILTER: &str =
    "rrs_converter=debug,class_migration=debug,s3_object_store=debug";
