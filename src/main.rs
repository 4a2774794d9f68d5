use anyhow::{Context, Result};
use clap::Parser;

use csvcolumns::cli::{CliArgs, OutputMode, RunConfig};
use csvcolumns::host::BufferInfo;
use csvcolumns::terminal::{terminal_size, write_frame};
use csvcolumns::{ColumnsConfig, Session};

fn buffer_info(run: &RunConfig) -> BufferInfo {
    let filetype = run
        .path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    BufferInfo::new(filetype, run.path.display().to_string())
}

fn main() -> Result<()> {
    csvcolumns::tracing::init();

    let args = CliArgs::parse();
    let run = args.into_config().map_err(anyhow::Error::msg)?;

    let config = match &run.config_path {
        Some(path) => ColumnsConfig::load_from(path),
        None => ColumnsConfig::load(),
    }
    .apply(run.overrides.clone());

    let text = std::fs::read_to_string(&run.path)
        .with_context(|| format!("Failed to read {}", run.path.display()))?;

    let (term_width, term_height) = terminal_size();
    let width = run.size.0.unwrap_or(term_width);
    let height = run.size.1.unwrap_or(term_height);

    tracing::info!(
        path = %run.path.display(),
        width,
        height,
        "Rendering frame"
    );

    let mut session = Session::open(config.clone(), &text, buffer_info(&run), width, height);
    for command in run.commands.iter().cloned() {
        session.command(command);
    }
    session.scroll(run.top_line, run.left_column);
    if let Some(cursor) = run.cursor {
        session.move_cursor(cursor);
    }

    for warning in session.warnings() {
        eprintln!("warning: {}", warning);
    }

    match run.output {
        OutputMode::Detect => match session.separator() {
            Some('\t') => println!("tab"),
            Some(separator) => println!("{}", separator),
            None => println!("none"),
        },
        OutputMode::Json => {
            let dump = serde_json::to_string_pretty(&session.dump())
                .context("Failed to serialize frame")?;
            println!("{}", dump);
        }
        OutputMode::Frame => {
            if !session.is_enabled() {
                tracing::info!("File does not look delimited, printing it uncolored");
            }
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_frame(&mut out, &session.compose(), &config).context("Failed to write frame")?;
        }
    }

    Ok(())
}
