//! Terminal progress feedback while a request is in flight.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

fn spinner(label: &str, target: ProgressDrawTarget) -> ProgressBar {
    let bar = ProgressBar::with_draw_target(None, target);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .map(|style| style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "))
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(label.to_string());
    bar.enable_steady_tick(TICK);
    bar
}

/// Await `fut` behind a stderr spinner. The spinner is cleared before the
/// output is returned, so it never mixes with the listing on stdout.
pub async fn with_spinner<F: Future>(label: &str, fut: F) -> F::Output {
    run_behind(spinner(label, ProgressDrawTarget::stderr()), fut).await
}

async fn run_behind<F: Future>(bar: ProgressBar, fut: F) -> F::Output {
    let output = fut.await;
    bar.finish_and_clear();
    output
}
