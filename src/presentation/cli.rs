// Command-line arguments and run-mode selection
use clap::Parser;
use std::time::Duration;

const DEFAULT_INTERVAL_MINUTES: u64 = 5;

#[derive(Debug, Parser)]
#[command(
    name = "pool-tracker",
    about = "Track pool guest counts and chart weekly trends"
)]
pub struct Cli {
    /// Minutes to sleep between passes in continuous mode
    #[arg(long, value_name = "MINUTES")]
    pub interval: Option<u64>,

    /// Run a single pass and exit
    #[arg(long, conflicts_with = "visualize_only")]
    pub once: bool,

    /// Only regenerate charts from existing data, then exit
    #[arg(long)]
    pub visualize_only: bool,

    /// Config file base path (extension resolved by the config loader)
    #[arg(long, default_value = "config/tracker")]
    pub config: String,
}

/// Selected once at startup, never changed mid-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Once,
    Continuous { interval: Duration },
    VisualizeOnly,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.visualize_only {
            Mode::VisualizeOnly
        } else if self.once {
            Mode::Once
        } else {
            let minutes = self.interval.unwrap_or(DEFAULT_INTERVAL_MINUTES);
            Mode::Continuous {
                interval: Duration::from_secs(minutes * 60),
            }
        }
    }
}
