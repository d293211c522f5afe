//! Fetch progress on stderr
//!
//! Hidden with `--quiet`, `GHDASH_QUIET=1`, or when stderr is not a TTY, so
//! piped `--format json` output stays clean.

use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

static QUIET: OnceLock<bool> = OnceLock::new();

pub fn init_quiet_mode(quiet_flag: bool) {
    let quiet = quiet_flag
        || std::env::var("GHDASH_QUIET").is_ok_and(|v| v == "1")
        || !std::io::stderr().is_terminal();
    QUIET.set(quiet).ok();
}

fn quiet() -> bool {
    QUIET.get().copied().unwrap_or(false)
}

/// Spinner for one remote lookup, labelled with what is being fetched
pub struct FetchProgress {
    bar: Option<ProgressBar>,
    subject: String,
}

impl FetchProgress {
    pub fn start(label: &str, subject: &str) -> Self {
        let bar = (!quiet()).then(|| {
            let bar = ProgressBar::new_spinner()
                .with_style(
                    ProgressStyle::with_template("{spinner} {prefix:.bold} {wide_msg:.dim}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                )
                .with_prefix(label.to_string())
                .with_message(subject.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });
        Self {
            bar,
            subject: subject.to_string(),
        }
    }

    /// Note that page `page` of the subject's collection is being requested
    pub fn page(&self, page: u32) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("{} · page {}", self.subject, page));
        }
    }
}

impl Drop for FetchProgress {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
