//! Progress bar display management and coordination.
//!
//! All console output of a run goes through one [`MultiProgress`]: the bars
//! are redrawn by it, and completion lines are printed with
//! [`MultiProgress::println`], which writes each line in one piece above the
//! bars. Concurrent items therefore never interleave their output. Without a
//! terminal the bars are not drawn and the lines are written to stderr.
//!
//! ```rust
//! use sfxdl::progress::{ProgressDisplay, StyleOptions};
//!
//! let display = ProgressDisplay::new(StyleOptions::hidden(), 3);
//! let pb = display.create_child_progress("boom.wav", Some(1024));
//! pb.inc(1024);
//! display.finish_child(pb);
//! display.finish();
//! ```

use crate::download::{DownloadResult, Outcome};
use crate::progress::StyleOptions;

use console::{style, Term};
use indicatif::{HumanBytes, MultiProgress, ProgressBar, ProgressDrawTarget};

/// Progress display manager that coordinates multiple progress bars.
pub struct ProgressDisplay {
    multi: MultiProgress,
    /// Counts finished items.
    main: ProgressBar,
    style_options: StyleOptions,
    /// Whether the main bar is attached to `multi`.
    show_main_progress: bool,
}

impl ProgressDisplay {
    /// Create a new progress display manager for `total_items` items.
    pub fn new(style_options: StyleOptions, total_items: usize) -> Self {
        let multi = match style_options.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };

        let show_main_progress = style_options.main().is_enabled();
        let main = if show_main_progress {
            multi.add(style_options.main().clone().to_progress_bar(total_items as u64))
        } else {
            // Kept out of `multi`, which would otherwise draw it.
            ProgressBar::hidden()
        };
        main.tick();

        Self {
            multi,
            main,
            style_options,
            show_main_progress,
        }
    }

    /// Create the byte bar of one item, labelled with `name`.
    ///
    /// Without a known `size` the bar is a spinner.
    pub fn create_child_progress(&self, name: &str, size: Option<u64>) -> ProgressBar {
        let opts = self.style_options.child().clone();
        if !opts.is_enabled() {
            return ProgressBar::hidden();
        }

        let pb = match size {
            Some(len) => opts.to_progress_bar(len),
            None => opts.to_byte_spinner(),
        };
        pb.set_message(name.to_string());
        if self.show_main_progress {
            self.multi.insert_before(&self.main, pb)
        } else {
            self.multi.add(pb)
        }
    }

    /// Finish a child progress bar based on configuration.
    pub fn finish_child(&self, pb: ProgressBar) {
        if self.style_options.child().clears() {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
    }

    /// Print the completion line of `result` and advance the main bar.
    pub fn report(&self, result: &DownloadResult) {
        let name = result.descriptor().local_name();
        let line = match result.outcome() {
            Outcome::Success { bytes } => format!(
                "{} {} ({})",
                style("Downloaded").for_stderr().green().bold(),
                name,
                HumanBytes(*bytes)
            ),
            Outcome::Failure(e) => format!(
                "{} {}: {}",
                style("Failed").for_stderr().red().bold(),
                name,
                e
            ),
        };

        if let Err(e) = self.print_line(&line) {
            tracing::debug!("Could not print progress line: {}", e);
        }
        self.main.inc(1);
    }

    /// Print one completion line in a single write.
    ///
    /// `MultiProgress::println` drops lines while its target is hidden, which
    /// is the case whenever stderr is not a terminal. Those lines go straight
    /// to stderr instead, unless the display was disabled.
    fn print_line(&self, line: &str) -> std::io::Result<()> {
        if !self.style_options.is_enabled() {
            return Ok(());
        }
        if self.multi.is_hidden() {
            Term::stderr().write_line(line)
        } else {
            self.multi.println(line)
        }
    }

    /// Number of items reported so far.
    pub fn completed(&self) -> u64 {
        self.main.position()
    }

    /// Finish the progress display, clearing or keeping bars based on configuration.
    pub fn finish(self) {
        if !self.show_main_progress {
            return;
        }
        if self.style_options.main().clears() {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }
}
