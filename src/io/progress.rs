//! Progress display while strokes are replayed

use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::io::configuration::PROGRESS_BAR_WIDTH;

static STROKE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single bar counting replayed pointer events across all strokes
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a bar for `total_events` events
    pub fn new(total_events: usize) -> Self {
        let bar = ProgressBar::new(total_events as u64);
        bar.set_style(STROKE_STYLE.clone());
        Self { bar }
    }

    /// Label the bar with the stroke being replayed
    pub fn start_stroke(&self, index: usize, stroke_count: usize) {
        self.bar
            .set_message(format!("stroke {}/{stroke_count}", index + 1));
    }

    /// Count one replayed event
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    /// Count the events of a stroke that was not replayed
    pub fn skip(&self, events: usize) {
        self.bar.inc(events as u64);
    }

    /// Events counted so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
