//! Command-line argument parsing
//!
//! The binary renders one frame of a delimited file the way an editor
//! window would show it, so the core can be exercised from a terminal.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{ColorMode, ConfigOverrides};
use crate::csv::{CursorPos, SamplingMode};
use crate::messages::CommandMsg;

/// Which view is drawn in the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewArg {
    /// Colored source lines
    #[default]
    Color,
    /// Padded, aligned table
    Clean,
}

/// Color the columns of a CSV/TSV file
#[derive(Parser, Debug)]
#[command(
    name = "csvcolumns",
    version,
    about = "Color the columns of a CSV/TSV file"
)]
pub struct CliArgs {
    /// File to render
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// View to draw
    #[arg(long, value_enum, default_value_t = ViewArg::Color)]
    pub view: ViewArg,

    /// First visible line (1-indexed)
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Horizontal scroll in display columns
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub left: usize,

    /// Window width in cells (defaults to the terminal width)
    #[arg(long, value_name = "N")]
    pub width: Option<usize>,

    /// Window height in rows (defaults to the terminal height)
    #[arg(long, value_name = "N")]
    pub height: Option<usize>,

    /// Sticky header line count
    #[arg(long, value_name = "N")]
    pub header_lines: Option<String>,

    /// Separator: a single character or comma, tab, semicolon, pipe, space
    #[arg(long, value_name = "SEP")]
    pub separator: Option<String>,

    /// Cursor position as LINE:COLUMN (both 1-indexed, column in bytes)
    #[arg(long, value_name = "LINE:COLUMN")]
    pub cursor: Option<String>,

    /// Do not show the sticky header
    #[arg(long)]
    pub no_header: bool,

    /// Color the whole column background instead of the text
    #[arg(long)]
    pub background: bool,

    /// Compute clean view widths from the visible lines only
    #[arg(long)]
    pub windowed: bool,

    /// Color the file even if it does not look delimited
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Print display instructions as JSON instead of drawing
    #[arg(long)]
    pub json: bool,

    /// Print the detected separator and exit
    #[arg(long)]
    pub detect: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// How the frame is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Frame,
    Json,
    Detect,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    /// Commands sent after the buffer is entered, in order
    pub commands: Vec<CommandMsg>,
    /// Top line, 0-indexed
    pub top_line: usize,
    pub left_column: usize,
    pub size: (Option<usize>, Option<usize>),
    /// Cursor position, 0-indexed
    pub cursor: Option<CursorPos>,
    pub output: OutputMode,
}

/// Parse `LINE:COLUMN` (1-indexed) into a 0-indexed cursor
pub fn parse_cursor(value: &str) -> Result<CursorPos, String> {
    let (line, column) = value
        .split_once(':')
        .ok_or_else(|| format!("Cursor must be LINE:COLUMN, got '{}'", value))?;
    let line: usize = line
        .trim()
        .parse()
        .map_err(|_| format!("Invalid cursor line '{}'", line))?;
    let column: usize = column
        .trim()
        .parse()
        .map_err(|_| format!("Invalid cursor column '{}'", column))?;
    Ok(CursorPos::new(
        line.saturating_sub(1),
        column.saturating_sub(1),
    ))
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let cursor = self.cursor.as_deref().map(parse_cursor).transpose()?;

        let output = match (self.detect, self.json) {
            (true, true) => return Err("--detect and --json cannot be combined".to_string()),
            (true, false) => OutputMode::Detect,
            (false, true) => OutputMode::Json,
            (false, false) => OutputMode::Frame,
        };

        let overrides = ConfigOverrides {
            sticky_header: self.no_header.then_some(false),
            color_mode: self.background.then_some(ColorMode::Background),
            width_sampling: self.windowed.then_some(SamplingMode::Windowed),
            ..Default::default()
        };

        // Header count and separator go through the user commands so bad
        // values are reported the same way an editor would report them
        let mut commands = Vec::new();
        if self.force {
            commands.push(CommandMsg::Enable);
        }
        if let Some(separator) = self.separator {
            commands.push(CommandMsg::SetSeparator(separator));
        }
        if let Some(lines) = self.header_lines {
            commands.push(CommandMsg::SetHeaderLines(lines));
        }
        if self.view == ViewArg::Clean {
            commands.push(CommandMsg::ToggleClean);
        }

        Ok(RunConfig {
            path: self.path,
            config_path: self.config,
            overrides,
            commands,
            // Convert from 1-indexed (user input) to 0-indexed (internal)
            top_line: self.top.unwrap_or(1).saturating_sub(1),
            left_column: self.left,
            size: (self.width, self.height),
            cursor,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(path: &str) -> CliArgs {
        CliArgs::parse_from(["csvcolumns", path])
    }

    #[test]
    fn test_defaults() {
        let config = args("data.csv").into_config().unwrap();
        assert_eq!(config.path, PathBuf::from("data.csv"));
        assert_eq!(config.top_line, 0);
        assert_eq!(config.output, OutputMode::Frame);
        assert!(config.commands.is_empty());
        assert_eq!(config.overrides, ConfigOverrides::default());
    }

    #[test]
    fn test_cursor_conversion() {
        // 1-indexed to 0-indexed: line 42 → 41, column 10 → 9
        assert_eq!(parse_cursor("42:10"), Ok(CursorPos::new(41, 9)));
        assert_eq!(parse_cursor("1:1"), Ok(CursorPos::new(0, 0)));
        assert!(parse_cursor("42").is_err());
        assert!(parse_cursor("a:1").is_err());
    }

    #[test]
    fn test_clean_view_and_separator_become_commands() {
        let args = CliArgs::parse_from([
            "csvcolumns",
            "data.txt",
            "--view",
            "clean",
            "--separator",
            "tab",
            "--header-lines",
            "2",
            "--force",
        ]);
        let config = args.into_config().unwrap();
        assert_eq!(
            config.commands,
            vec![
                CommandMsg::Enable,
                CommandMsg::SetSeparator("tab".into()),
                CommandMsg::SetHeaderLines("2".into()),
                CommandMsg::ToggleClean,
            ]
        );
    }

    #[test]
    fn test_flags_become_overrides() {
        let args = CliArgs::parse_from([
            "csvcolumns",
            "data.csv",
            "--no-header",
            "--windowed",
            "--top",
            "5",
        ]);
        let config = args.into_config().unwrap();
        assert_eq!(config.overrides.sticky_header, Some(false));
        assert_eq!(config.overrides.width_sampling, Some(SamplingMode::Windowed));
        assert_eq!(config.top_line, 4);
    }

    #[test]
    fn test_detect_and_json_conflict() {
        let args = CliArgs::parse_from(["csvcolumns", "data.csv", "--detect", "--json"]);
        assert!(args.into_config().is_err());
    }
}
