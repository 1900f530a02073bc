//! # Output Configuration
//!
//! Controls how the `repo-publisher` CLI decorates its human-readable output.
//! Status lines are prefixed with a [`Marker`], rendered as an emoji on a
//! color-capable terminal and as a bracketed tag everywhere else, so logs
//! captured from cron jobs stay greppable.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```
//! use repo_publisher::output::{Marker, OutputConfig};
//!
//! let out = OutputConfig::from_env_and_flag("never");
//! assert_eq!(out.marker(Marker::Ok), "[OK]");
//! ```

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

/// Status prefixes used by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Scan,
    Ok,
    Warn,
    Err,
    Link,
    Info,
}

impl Marker {
    fn emoji(self) -> &'static str {
        match self {
            Marker::Scan => "🔍",
            Marker::Ok => "✅",
            Marker::Warn => "⚠️",
            Marker::Err => "❌",
            Marker::Link => "🔗",
            Marker::Info => "📊",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Marker::Scan => "[SCAN]",
            Marker::Ok => "[OK]",
            Marker::Warn => "[WARN]",
            Marker::Err => "[ERR]",
            Marker::Link => "[LINK]",
            Marker::Info => "[INFO]",
        }
    }
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: "always", "never", or "auto".
    /// In auto mode colors are disabled by `NO_COLOR`, `CLICOLOR=0`,
    /// `TERM=dumb`, or a non-TTY stdout (unless `CLICOLOR_FORCE=1`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Prefix for a status line
    pub fn marker(&self, marker: Marker) -> &'static str {
        if self.use_color {
            marker.emoji()
        } else {
            marker.plain()
        }
    }

    /// Render a path or identifier with emphasis when colors are enabled
    pub fn emphasize(&self, text: &str) -> String {
        if self.use_color {
            console::style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
