//! Common processing logic shared between the user and packages commands.

use super::ProgressReporter;
use super::config::Config;
use crate::Result;
use crate::facts::{Client, HttpPackageLister, HttpStatsFetcher, Progress};
use crate::ranking::{PackageName, RankedResult, Ranker, Window};
use crate::reports::{generate_console, generate_csv, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{NaiveDate, Utc};
use clap::{Args, ValueEnum};
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "   common";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    fn use_colors(self, is_terminal: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Window selection flags
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct WindowArgs {
    /// Window to rank packages by
    #[arg(long, value_name = "WINDOW", help_heading = "Ranking")]
    pub window: Option<Window>,

    /// Rank by downloads over the last day (same as `--window day`)
    #[arg(long, help_heading = "Ranking")]
    pub day: bool,

    /// Rank by downloads over the last week (same as `--window week`)
    #[arg(long, help_heading = "Ranking")]
    pub week: bool,
}

impl WindowArgs {
    /// The selected window, the month unless a flag says otherwise
    #[must_use]
    pub fn window(&self) -> Window {
        if self.day {
            Window::Day
        } else if self.week {
            Window::Week
        } else {
            self.window.unwrap_or_default()
        }
    }
}

/// Common arguments shared between the user and packages commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Path to configuration file (default is `npm-rank.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Output the ranking to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output the ranking to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output the ranking to the console. If omitted, console output is shown only when no other reports are generated.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Include each package's daily downloads in the JSON report
    #[arg(long, help_heading = "Report Output")]
    pub show_series: bool,
}

pub struct Common<'a, H: super::Host> {
    pub config: Config,
    pub window: Window,
    pub reference_date: NaiveDate,
    host: &'a mut H,
    progress: ProgressReporter,
    color: ColorMode,
    console: bool,
    show_series: bool,
    csv: Option<Utf8PathBuf>,
    json: Option<Utf8PathBuf>,
}

impl<'a, H: super::Host> Common<'a, H> {
    /// Create a new Common processor with logger, config, and progress reporting
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;

        // Logging and the progress bar would interleave on stderr
        let delay = if args.log_level == LogLevel::None {
            Duration::from_millis(300)
        } else {
            Duration::from_hours(365 * 24)
        };

        let use_colors_for_progress = args.color.use_colors(|| {
            use std::io::{IsTerminal, stderr};
            stderr().is_terminal()
        });

        let reference_date = Utc::now().date_naive();
        let window = args.window.window();
        log::debug!(target: LOG_TARGET, "Ranking by {window} as of {reference_date}");

        Ok(Self {
            config,
            window,
            reference_date,
            host,
            progress: ProgressReporter::new(delay, use_colors_for_progress),
            color: args.color,
            console: args.console,
            show_series: args.show_series,
            csv: args.csv.clone(),
            json: args.json.clone(),
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // A second initialization (as happens when tests run several commands) is harmless
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .try_init();
    }

    /// Build a ranker over the registry endpoints named in the configuration
    fn ranker(&self) -> Result<Ranker<HttpPackageLister, HttpStatsFetcher>> {
        let client = Client::new(self.config.request_timeout)?;

        Ok(Ranker::new(
            HttpPackageLister::new(client.clone(), self.config.registry_url.clone()),
            HttpStatsFetcher::new(client, self.config.stats_hosts.clone()),
            self.config.planner()?,
            self.config.concurrency()?,
        ))
    }

    /// Rank every package maintained by `user`
    pub async fn rank_user(&self, user: &str) -> Result<RankedResult> {
        let ranker = self.ranker()?;
        let result = ranker.rank(user, self.window, self.reference_date, &self.progress).await;
        self.progress.done();

        result.into_app_err_with(|| format!("ranking the packages of npm user '{}'", user.trim()))
    }

    /// Rank the named packages
    pub async fn rank_packages(&self, names: &[PackageName]) -> Result<RankedResult> {
        let ranker = self.ranker()?;
        let result = ranker.rank_packages(names, self.window, self.reference_date, &self.progress).await;
        self.progress.done();

        result.into_app_err("ranking packages")
    }

    /// Write the ranking to the console and any requested report files
    pub fn report(&mut self, ranked: &RankedResult) -> Result<()> {
        let generating_reports = self.csv.is_some() || self.json.is_some();

        if self.console || !generating_reports {
            let use_colors = self.color.use_colors(|| {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            });

            let mut console_output = String::new();
            generate_console(ranked, use_colors, &mut console_output)?;
            let _ = write!(self.host.output(), "{console_output}");
        }

        if let Some(filename) = &self.csv {
            let mut csv_output = String::new();
            generate_csv(ranked, &mut csv_output)?;
            fs::write(filename, csv_output).into_app_err_with(|| format!("writing CSV report to '{filename}'"))?;
            log::debug!(target: LOG_TARGET, "Wrote CSV report to '{filename}'");
        }

        if let Some(filename) = &self.json {
            let mut json_output = String::new();
            generate_json(ranked, self.reference_date, self.show_series, &mut json_output)?;
            fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
            log::debug!(target: LOG_TARGET, "Wrote JSON report to '{filename}'");
        }

        Ok(())
    }
}

/// Report a failed command on the host's error stream and exit with status 1
pub fn exit_on_error<H: super::Host>(host: &mut H, result: Result<()>) -> Result<()> {
    if let Err(e) = &result {
        let _ = writeln!(host.error(), "{e:#}");
        host.exit(1);
    }

    result
}
