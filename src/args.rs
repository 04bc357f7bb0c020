//! These structs provide the CLI interface for the lmw binary.

use crate::keys::Storage;
use crate::render::LayoutSize;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// lmw: A terminal widget for your Lunch Money budget.
///
/// The program fetches your personal-finance data from the Lunch Money API
/// (see https://lunchmoney.app), aggregates it into a small summary (income,
/// expenses, savings rate, pending reviews, account sync health, recent
/// transactions), caches the summary locally, and prints it in one of several
/// fixed widget layouts.
///
/// You will need a Lunch Money API key, found at
/// https://my.lunchmoney.app/developers. Run `lmw init` once to store it.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Store your Lunch Money API key and create the data directory.
    ///
    /// This is the first command you should run. It prompts for the API key,
    /// writes it to the chosen storage backend, and creates a default
    /// config.json in the data directory.
    Init(InitArgs),

    /// Fetch (or reuse cached) data and print the widget to stdout.
    Show(ShowArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. Logs go to stderr; the rendered
    /// widget goes to stdout.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where lmw data and configuration is held.
    /// Defaults to ~/.lm-widget
    #[arg(long, env = "LM_WIDGET_HOME", default_value_t = default_widget_home())]
    home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// (Not shown): Args for the `lmw init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Which storage backend holds the API key: the cloud-synced document
    /// root or the device-local one. Prompted for interactively when absent.
    #[arg(long)]
    storage: Option<Storage>,
}

impl InitArgs {
    pub fn storage(&self) -> Option<Storage> {
        self.storage
    }
}

/// (Not shown): Args for the `lmw show` command.
#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// The widget layout to render.
    #[arg(long, value_enum, default_value_t = LayoutSize::Medium)]
    size: LayoutSize,

    /// Aggregate over the current pay cycle instead of the whole response.
    ///
    /// The value is matched against transaction notes: the scan stops at the
    /// income transaction whose note equals this marker (your paycheck).
    #[arg(long, value_name = "MARKER")]
    pay_cycle: Option<String>,

    /// Ignore the freshness gate and fetch from the API even when a fresh
    /// cached snapshot exists.
    #[arg(long)]
    force_refresh: bool,
}

impl ShowArgs {
    pub fn size(&self) -> LayoutSize {
        self.size
    }

    pub fn pay_cycle(&self) -> Option<&str> {
        self.pay_cycle.as_deref()
    }

    pub fn force_refresh(&self) -> bool {
        self.force_refresh
    }
}

fn default_widget_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join(".lm-widget"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or LM_WIDGET_HOME instead of relying on the default \
                data directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from(".lm-widget")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
