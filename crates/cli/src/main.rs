use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rubrics_engine::{PageConfig, RubricPage};
use rubrics_tui::{THEME_DEFINITIONS, TuiOptions};
use rubrics_types::{FormSnapshot, RubricDefinitionFile};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Terminal editor for scoring rubrics.
#[derive(Debug, Parser)]
#[command(name = "rubrics", version, about)]
struct Cli {
    /// Theme id or alias (see `rubrics themes`)
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Rubric definition file (JSON or YAML) to preload
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Write the form snapshot to this path as JSON on exit
    #[arg(long)]
    export: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a definition file without the terminal UI and print its form snapshot
    Preview {
        #[arg(long, short)]
        file: PathBuf,
    },
    /// List available themes
    Themes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => run_tui(cli.theme, cli.file, cli.export).await,
        Some(Command::Preview { file }) => {
            init_tracing_stderr();
            preview(&file)
        }
        Some(Command::Themes) => {
            list_themes();
            Ok(())
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_tracing_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs go to a file while the terminal UI owns the screen.
fn init_tracing_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn load_definitions(path: &Path) -> Result<RubricDefinitionFile> {
    RubricDefinitionFile::load(path).with_context(|| format!("failed to load rubric definitions from {}", path.display()))
}

async fn run_tui(theme: Option<String>, file: Option<PathBuf>, export: Option<PathBuf>) -> Result<()> {
    let log_path = rubrics_util::default_log_path();
    init_tracing_file(&log_path)?;

    let definitions = file.as_deref().map(load_definitions).transpose()?;
    let snapshot = rubrics_tui::run(TuiOptions { theme, definitions }).await?;

    if let Some(path) = export {
        write_snapshot(&snapshot, &path)?;
        info!(path = %path.display(), fields = snapshot.len(), "exported form snapshot");
    }
    Ok(())
}

fn preview(file: &Path) -> Result<()> {
    let definitions = load_definitions(file)?;
    let mut page = RubricPage::new(PageConfig::default()).context("failed to build rubric page")?;
    page.load_definitions(&definitions).context("failed to place rubric definitions")?;
    println!("{}", page.form_snapshot().to_json_pretty()?);
    Ok(())
}

fn write_snapshot(snapshot: &FormSnapshot, path: &Path) -> Result<()> {
    let json = snapshot.to_json_pretty()?;
    fs::write(path, json).with_context(|| format!("failed to write form snapshot to {}", path.display()))
}

fn list_themes() {
    for definition in THEME_DEFINITIONS {
        println!("{:<8} {:<8} {}", definition.id, definition.label, definition.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_starts_the_editor() {
        let cli = Cli::try_parse_from(["rubrics", "--theme", "nord", "--file", "rubrics.yaml"]).expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.theme.as_deref(), Some("nord"));
        assert_eq!(cli.file, Some(PathBuf::from("rubrics.yaml")));
    }

    #[test]
    fn preview_requires_a_file() {
        assert!(Cli::try_parse_from(["rubrics", "preview"]).is_err());
        let cli = Cli::try_parse_from(["rubrics", "preview", "-f", "r.json"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Preview { file }) if file == Path::new("r.json")));
    }
}
