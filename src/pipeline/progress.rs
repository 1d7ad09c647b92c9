//! Per-column progress bars drawn on stderr.

use futures::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};

/// Bar sized to one emotion column; hidden when stderr is not a terminal.
pub fn column_bar(total: usize, label: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::with_template(
        "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
    )
    .map(|s| s.progress_chars("█▓▒░ "))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(label.into());
    pb
}

/// Collect `outcomes` in order, advancing `bar` as each one arrives.
pub async fn collect_with_progress<S>(outcomes: S, bar: &ProgressBar) -> Vec<S::Item>
where
    S: Stream,
{
    let items = outcomes.inspect(|_| bar.inc(1)).collect::<Vec<_>>().await;
    bar.finish();
    items
}
