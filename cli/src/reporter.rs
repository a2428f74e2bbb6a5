use std::fmt;

use indicatif::{ProgressBar, ProgressStyle};
use png2c_codec::Reporter;

/// Forwards conversion messages to the `log` facade and drives a progress
/// bar over the emitted columns.
#[derive(Default)]
pub struct LogReporter {
    progress: Option<ProgressBar>,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn progress_bar(&mut self, width: u32) -> &ProgressBar {
        self.progress.get_or_insert_with(|| {
            let pb = ProgressBar::new(width as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} columns ({eta})")
            {
                pb.set_style(style);
            }
            pb
        })
    }
}

impl Reporter for LogReporter {
    fn info(&mut self, args: fmt::Arguments<'_>) {
        log::info!("{}", args);
    }

    fn debug(&mut self, args: fmt::Arguments<'_>) {
        log::debug!("{}", args);
    }

    fn column_done(&mut self, column: u32, width: u32) {
        let pb = self.progress_bar(width);
        pb.set_position(column as u64 + 1);
        if column + 1 == width {
            pb.finish_and_clear();
        }
    }
}
