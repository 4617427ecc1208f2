//! Terminal output.
//!
//! [`OutputManager`] is also the [`Printer`] handed to core services, so a
//! deployment confirmation goes through the same terminal handle as every
//! other line the CLI writes.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Style};

use forge_core::{
    application::{ApplicationError, ports::Printer},
    error::ForgeResult,
};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// A command result. Never suppressed.
    pub fn result(&self, text: &str) -> io::Result<()> {
        self.term.write_line(text)
    }

    /// Supplementary text; suppressed in quiet mode.
    pub fn note(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓ <msg>`
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2713}', Style::new().green(), msg, false)
    }

    /// `✗ <msg>`, shown even when quiet.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2717}', Style::new().red(), msg, true)
    }

    /// `⚠ <msg>`
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{26a0}', Style::new().yellow(), msg, false)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.paint(text, Style::new().cyan().bold()))
    }

    fn marked(&self, glyph: char, style: Style, msg: &str, always: bool) -> io::Result<()> {
        if self.quiet && !always {
            return Ok(());
        }
        let glyph = self.paint(&glyph.to_string(), style.bold());
        self.term.write_line(&format!("{glyph} {}", self.paint(msg, style)))
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            text.style(style).to_string()
        }
    }

    /// A stderr spinner in human mode, a hidden bar otherwise.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

impl Printer for OutputManager {
    fn print(&self, text: &str) -> ForgeResult<()> {
        self.result(text).map_err(|e| {
            ApplicationError::PrintFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }
}
