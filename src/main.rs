use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::info;

use speedgauge::cli::Args;
use speedgauge::config::Config;
use speedgauge::display::plain::PlainSurface;
use speedgauge::display::terminal::TerminalSurface;
use speedgauge::display::{self, DisplayMode, DrawingSurface};
use speedgauge::gauge;

fn main() -> Result<()> {
    // Initialize logging on stderr so plain output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("speedgauge=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "speedgauge", &mut std::io::stdout());
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote config template to {}", path.display());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);
    config.validate()?;

    let gauge = gauge::render(&config)?;

    // Only settings that actually rendered are written back
    if args.save {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => Config::default_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
        };
        config.save(&path)?;
    }

    info!("Presenting gauge in {} mode", config.display.mode.name());
    let resolution = config.display.arc_resolution;
    let mut surface: Box<dyn DrawingSurface> = match config.display.mode {
        DisplayMode::Terminal => Box::new(TerminalSurface::new(resolution)),
        DisplayMode::Plain => Box::new(PlainSurface::new(std::io::stdout().lock(), resolution)),
    };
    display::draw_gauge(&gauge, surface.as_mut())?;

    Ok(())
}
