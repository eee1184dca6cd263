use anyhow::Result;
use log::info;
use winit::event_loop::EventLoop;

mod app;
mod config;
mod core;
mod engine;
mod game;

use app::App;
use config::GameConfig;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = GameConfig::from_env();
    info!(
        "Starting {} (assets: {})",
        config.title,
        config.asset_root.display()
    );

    let event_loop = EventLoop::new()?;
    let app = App::new(config, &event_loop)?;
    app.run(event_loop)?;

    info!("Goodbye");
    Ok(())
}
