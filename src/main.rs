mod app;
mod cli;
mod config;
mod gpu;
mod pacing;
mod simulation;

use anyhow::Context;
use winit::event_loop::EventLoop;

use crate::app::App;
use crate::cli::Cli;
use crate::config::{Config, GRID_COLS, GRID_ROWS};
use crate::simulation::patterns;

fn main() -> anyhow::Result<()> {
    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    keep_cli_diagnostics(&mut logger);
    logger.init();

    let config = Config::from_cli(Cli::parse_lenient());
    log::debug!("Resolved configuration: {:?}", config);

    // Seed the grid before any window exists
    let grid = patterns::seed(
        &config.pattern,
        config.threshold,
        GRID_ROWS,
        GRID_COLS,
        &mut rand::thread_rng(),
    )
    .with_edge_wrap(config.edge_wrap);

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config, grid);
    event_loop.run_app(&mut app).context("Event loop failed")?;

    app.finish()
}

/// Argument warnings always reach stderr, whatever RUST_LOG selects
fn keep_cli_diagnostics(logger: &mut env_logger::Builder) {
    for module in ["gl_life::cli", "gl_life::config"] {
        logger.filter_module(module, log::LevelFilter::Warn);
    }
}
