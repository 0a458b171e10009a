//! Terminal console: dialoguer prompts, styled status lines, spinners

use crate::cli::style::{Stylize, cross, spinner_style};
use anstream::{eprintln, println};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use indicatif::ProgressBar;
use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::Duration;
use ticket_pr::error::{Error, Result};
use ticket_pr::workflow::{Console, Phase};

/// Console backed by the controlling terminal
///
/// A spinner shows the current phase and is cleared before any prompt or
/// status line is written.
pub struct TerminalConsole {
    spinner: Mutex<Option<ProgressBar>>,
    interactive: bool,
}

impl TerminalConsole {
    /// Create a console
    ///
    /// Without a terminal on stdin, prompts with a default answer it and
    /// other prompts fail.
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            interactive: std::io::stdin().is_terminal(),
        }
    }

    fn clear_spinner(&self) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(spinner) = guard.take() {
                spinner.finish_and_clear();
            }
        }
    }

    fn require_terminal(&self, prompt: &str) -> Result<()> {
        if self.interactive {
            Ok(())
        } else {
            Err(Error::Prompt(format!(
                "'{prompt}' needs an answer but stdin is not a terminal; pass it as a flag"
            )))
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        self.clear_spinner();
        if let (false, Some(default)) = (self.interactive, default) {
            return Ok(default.to_string());
        }
        self.require_terminal(prompt)?;

        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<String> {
        self.clear_spinner();
        self.require_terminal(prompt)?;

        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        items
            .get(index)
            .cloned()
            .ok_or_else(|| Error::Prompt(format!("no item at index {index}")))
    }

    fn phase(&self, phase: Phase) {
        self.clear_spinner();
        if phase == Phase::Complete {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(format!("{phase}..."));
        spinner.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(spinner);
        }
    }

    fn info(&self, message: &str) {
        self.clear_spinner();
        println!("{message}");
    }

    fn warn(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{}: {message}", "warning".warn());
    }

    fn error(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{} {message}", cross());
    }
}
