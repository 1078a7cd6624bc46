// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2019 Joyent, Inc.
// Copyright 2026 Edgecast Cloud LLC.

/// This module provides helper functions that generate pseudorandom output.
pub mod random {
    use quickcheck::{Arbitrary, Gen};

    /// Class names as a store reports them, plus one it does not know.
    const CLASS_NAMES: &[&str] = &[
        "STANDARD",
        "REDUCED_REDUNDANCY",
        "STANDARD_IA",
        "ONEZONE_IA",
        "INTELLIGENT_TIERING",
        "GLACIER",
        "GLACIER_IR",
        "DEEP_ARCHIVE",
        "OUTPOSTS",
        "SNOW",
        "EXPRESS_ONEZONE",
        "UNLISTED_TIER",
    ];

    /// Generate a random [`String`] of size `len` containing only lowercase
    /// alphanumeric characters (a-z, 0-9) using the provided generator `g`.
    pub fn string(g: &mut Gen, len: usize) -> String {
        (0..len)
            .map(|_| {
                let c = u8::arbitrary(g);
                match c % 36 {
                    n @ 0..=25 => (b'a' + n) as char,
                    n => (b'0' + (n - 26)) as char,
                }
            })
            .collect()
    }

    /// Generate a slash-separated object key of one to four segments.
    pub fn object_key(g: &mut Gen) -> String {
        let segments = 1 + usize::arbitrary(g) % 4;
        (0..segments)
            .map(|_| {
                let len = 1 + usize::arbitrary(g) % 12;
                string(g, len)
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Pick a storage class name. `None` stands for a listing entry that
    /// carried no class at all.
    pub fn storage_class_name(g: &mut Gen) -> Option<&'static str> {
        if u8::arbitrary(g) % 16 == 0 {
            return None;
        }
        g.choose(CLASS_NAMES).copied()
    }
}
