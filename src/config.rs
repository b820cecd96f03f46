// ⚙️ Console configuration - command line flags

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "braymatch")]
#[command(about = "BrayMatch dating console: an in-memory user directory with interest matching")]
#[command(version)]
pub struct Config {
    /// Tracing filter (e.g. "info", "braymatch=debug"). Logs go to stderr.
    #[arg(long, env = "BRAYMATCH_LOG", default_value = "warn")]
    pub log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Print without terminal colours
    #[arg(long)]
    pub no_color: bool,

    /// Start with a few sample profiles loaded
    #[arg(long)]
    pub demo: bool,
}

impl Config {
    /// Whether console output should be styled: stdout must be a terminal
    pub fn use_color(&self) -> bool {
        self.color_allowed(stdout_is_tty())
    }

    pub fn color_allowed(&self, is_tty: bool) -> bool {
        cfg!(feature = "color") && !self.no_color && is_tty
    }
}

#[cfg(feature = "color")]
fn stdout_is_tty() -> bool {
    use crossterm::tty::IsTty;
    std::io::stdout().is_tty()
}

#[cfg(not(feature = "color"))]
fn stdout_is_tty() -> bool {
    false
}
