// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Terminal progress for a conversion run

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use class_migration::{CopyError, MigrationObserver, ObjectDescriptor};

const TEMPLATE: &str = "{spinner} [{elapsed_precise}] {wide_bar} {pos}/{len} ({eta}) {msg}";

/// Advances one step per listed object, whether it was skipped or copied.
pub struct ProgressObserver {
    bar: ProgressBar,
    announce: bool,
}

impl ProgressObserver {
    /// Bar drawn on stdout. Logs own stderr.
    pub fn new() -> Self {
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stdout());
        bar.set_style(style);
        Self {
            bar,
            announce: true,
        }
    }

    /// Bar that tracks progress without drawing.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            announce: false,
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationObserver for ProgressObserver {
    fn on_listed(&self, total: usize) {
        if self.announce {
            println!("{total} objects in the bucket.");
        }
        self.bar.set_length(total as u64);
    }

    fn on_skipped(&self, _descriptor: &ObjectDescriptor) {
        self.bar.inc(1);
    }

    fn on_task_finished(&self, key: &str, result: Result<(), &CopyError>) {
        if result.is_err() {
            self.bar.set_message(format!("failed: {key}"));
        }
        self.bar.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use class_migration::StorageClass;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_object_advances_the_bar() {
        let progress = ProgressObserver::hidden();
        progress.on_listed(3);
        progress.on_skipped(&ObjectDescriptor::new("a", StorageClass::Glacier));
        progress.on_task_finished("b", Ok(()));
        progress.on_task_finished("c", Err(&CopyError::service("AccessDenied: denied")));

        assert_eq!(progress.bar.length(), Some(3));
        assert_eq!(progress.bar.position(), 3);
    }

    #[test]
    fn test_drawn_bar_tracks_listing() {
        let progress = ProgressObserver::new();
        progress.on_listed(2);
        progress.on_task_finished("a", Ok(()));
        progress.on_task_finished("b", Ok(()));

        assert_eq!(progress.bar.length(), Some(2));
        assert_eq!(progress.bar.position(), 2);
        progress.finish();
    }
}
