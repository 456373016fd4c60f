//! Search progress reporting
//!
//! Renders a progress bar over [`OrderFinder::total_checks`] /
//! [`OrderFinder::performed_checks`]. The caller polls the finder on its
//! own schedule and pushes the counter here; each poll takes the search
//! lock, so polling frequency trades against worker throughput.
//!
//! [`OrderFinder::total_checks`]: crate::search::OrderFinder::total_checks
//! [`OrderFinder::performed_checks`]: crate::search::OrderFinder::performed_checks

use std::io::{IsTerminal, stderr};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const SEARCH_BAR_TEMPLATE: &str =
    "[{bar:40}] {human_pos}/{human_len} combinations | {percent:>3}% | {elapsed_precise}<{eta_precise}";

/// A progress bar over evaluated search combinations.
#[derive(Debug)]
pub struct SearchProgress {
    bar: ProgressBar,
}

impl SearchProgress {
    /// Create a bar sized to the full cross product. Hidden automatically
    /// when stderr is not a terminal.
    #[must_use]
    pub fn new(total_checks: u64) -> Self {
        let target = if stderr().is_terminal() {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };

        Self::with_target(total_checks, target)
    }

    /// Create a bar that never draws. Used by tests.
    #[must_use]
    pub fn hidden(total_checks: u64) -> Self {
        Self::with_target(total_checks, ProgressDrawTarget::hidden())
    }

    fn with_target(total_checks: u64, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total_checks), target);

        bar.set_style(
            ProgressStyle::with_template(SEARCH_BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );

        Self { bar }
    }

    /// Push the latest `performed_checks` reading.
    pub fn update(&self, performed_checks: u64) {
        self.bar.set_position(performed_checks);
    }

    /// Complete and clear the bar.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
