use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use scope_model::{Roster, Theme};
use scope_overlay::VisibilityOptions;
use tracing_subscriber::EnvFilter;

use scope_console::console::run_console;
use scope_console::ConsoleConfig;

#[derive(Parser, Debug)]
#[command(name = "scope-console", version, about = "NSG Scope tactical terminal")]
struct Cli {
    /// Config file (defaults to <config dir>/nsg-scope/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start in night mode
    #[arg(long)]
    night: bool,

    /// JSON roster replacing the built-in mock roster
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Print the dashboard scene as JSON and exit
    #[arg(long)]
    dump_scene: bool,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to `log_file` when set. Without one, logs go to stderr for headless
/// commands and nowhere while the TUI owns the terminal.
fn init_tracing(log_file: Option<&Path>, headless: bool) -> anyhow::Result<()> {
    if let Some(path) = log_file {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn dump_scene(config: &ConsoleConfig, roster: &Roster) -> anyhow::Result<()> {
    let selected = roster.troops.first().map(|t| t.entity.id.as_str());
    let frame = config.viewport().frame(
        &roster.troops,
        &roster.targets,
        selected,
        config.theme,
        VisibilityOptions::default(),
    );
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ConsoleConfig::load_or_default(cli.config.as_deref())?;
    if cli.night {
        config.theme = Theme::Night;
    }
    if cli.roster.is_some() {
        config.roster_path = cli.roster;
    }

    init_tracing(config.log_file.as_deref(), cli.dump_scene)?;
    let roster = config.load_roster()?;

    if cli.dump_scene {
        return dump_scene(&config, &roster);
    }
    run_console(config, roster).await
}
