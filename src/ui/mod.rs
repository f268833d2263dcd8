//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting while resource packages are processed
//! - Interactive progress bars using indicatif
//! - Silent progress for headless automation runs
//! - The end-of-run outcome summary ([`display`])
//!
//! All progress reporting goes through the ProgressReporter trait, so the
//! pipeline never knows whether a terminal is attached.

pub mod display;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter trait for a pipeline run
pub trait ProgressReporter {
    /// Called once discovery knows how many packages will be processed
    fn start(&mut self, total_resources: u64);

    /// Show the package currently being processed
    fn update_resource(&mut self, resource: &str, current: usize, total: usize);

    /// Mark the current package as processed
    fn inc_resource(&mut self);

    /// Finish after the last package
    fn finish(&mut self);

    /// Abandon on a fatal error
    fn abandon(&mut self);
}

/// Interactive progress reporter with a visual progress bar
///
/// Draws to stderr so stdout keeps only trace lines.
#[derive(Default)]
pub struct InteractiveProgressReporter {
    resource_pb: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start(&mut self, total_resources: u64) {
        let resource_pb = ProgressBar::new(total_resources);
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            resource_pb.set_style(style.progress_chars("#>-"));
        }
        self.resource_pb = Some(resource_pb);
    }

    fn update_resource(&mut self, resource: &str, current: usize, total: usize) {
        if let Some(ref pb) = self.resource_pb {
            // Truncate long paths for display
            let display_path = if resource.chars().count() > 50 {
                let tail: String = resource.chars().rev().take(47).collect::<Vec<_>>().into_iter().rev().collect();
                format!("...{tail}")
            } else {
                resource.to_string()
            };
            pb.set_message(format!("({current}/{total}) {display_path}"));
        }
    }

    fn inc_resource(&mut self) {
        if let Some(ref pb) = self.resource_pb {
            pb.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(ref pb) = self.resource_pb {
            pb.finish_and_clear();
        }
    }

    fn abandon(&mut self) {
        if let Some(ref pb) = self.resource_pb {
            pb.abandon();
        }
    }
}

/// Silent progress reporter for headless runs
///
/// No-op implementation that does not display anything.
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start(&mut self, _total_resources: u64) {
        // No-op for silent mode
    }

    fn update_resource(&mut self, _resource: &str, _current: usize, _total: usize) {
        // No-op for silent mode
    }

    fn inc_resource(&mut self) {
        // No-op for silent mode
    }

    fn finish(&mut self) {
        // No-op for silent mode
    }

    fn abandon(&mut self) {
        // No-op for silent mode
    }
}
