//! Output format selection shared by every command.

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use fitsim_lib::RenderMode;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text tables.
    #[default]
    Text,
    /// Markdown tables.
    Markdown,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Table style for the textual formats; `None` for JSON.
    pub fn render_mode(self) -> Option<RenderMode> {
        match self {
            OutputFormat::Text => Some(RenderMode::PlainText),
            OutputFormat::Markdown => Some(RenderMode::Markdown),
            OutputFormat::Json => None,
        }
    }
}

/// Write `value` to stdout as pretty JSON followed by a newline.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_has_no_render_mode() {
        assert_eq!(OutputFormat::Json.render_mode(), None);
        assert_eq!(
            OutputFormat::Markdown.render_mode(),
            Some(RenderMode::Markdown)
        );
    }
}
