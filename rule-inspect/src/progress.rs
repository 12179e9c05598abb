//! Progress sinks.
//!
//! Progress display is chosen by the caller through
//! [`InspectOptions::progress`](crate::InspectOptions) and never by looking at
//! the logger, so verbose logs and the bar can be switched independently.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str =
    "Determining Config: {percent}% [{bar:30}] {elapsed} elapsed, eta {eta}";

/// Receives inspection progress, one tick per completed file.
pub trait ProgressSink {
    fn start(&self, total: u64);
    fn tick(&self);
    fn finish(&self);
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&self, _total: u64) {}
    fn tick(&self) {}
    fn finish(&self) {}
}

/// Terminal progress bar.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let bar = ProgressBar::new(0);
        bar.set_style(style);
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarProgress {
    fn start(&self, total: u64) {
        println!();
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn tick(&self) {
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish();
    }
}
