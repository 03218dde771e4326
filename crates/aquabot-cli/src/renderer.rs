//! Terminal rendering for markdown output.
//!
//! Rich mode styles markdown with termimad; plain mode (`--no-color`) prints
//! the markdown unchanged so output can be piped or asserted on in tests.

use anyhow::Result;
use aquabot_core::display::OperationStatus;
use termimad::{crossterm::style::Color, MadSkin};

const HEADER_COLOR: &str = "\x1b[36m";
const SUCCESS_COLOR: &str = "\x1b[32m";
const FAILURE_COLOR: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Prints markdown either styled or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Green);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Renders a markdown document.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        // Headers keep their hash marks so nesting stays visible
        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("{HEADER_COLOR}{line}{RESET}");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }

    /// Renders a one-line success or failure message.
    pub fn render_status(&self, status: &OperationStatus) -> Result<()> {
        if self.rich_enabled {
            let color = if status.success {
                SUCCESS_COLOR
            } else {
                FAILURE_COLOR
            };
            print!("{color}{status}{RESET}");
        } else {
            print!("{status}");
        }
        Ok(())
    }

    /// Renders a failure message on stderr.
    pub fn render_error(&self, status: &OperationStatus) -> Result<()> {
        if self.rich_enabled {
            eprint!("{FAILURE_COLOR}{status}{RESET}");
        } else {
            eprint!("{status}");
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
