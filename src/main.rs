//=========================================================================
// Prism Lab — Binary
//
//   prism_lab [config.toml]
//
// Log filtering follows RUST_LOG (default `info`).
//
//=========================================================================

use std::process::ExitCode;

use log::{error, info};
use tracing_subscriber::EnvFilter;

use prism_lab::config::LabConfig;
use prism_lab::scenes::{self, LabAction, LabScene};
use prism_lab::EngineBuilder;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match LabConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            info!("No config file given, using defaults");
            LabConfig::default()
        }
    };

    let engine = &config.engine;
    EngineBuilder::<LabScene, LabAction>::new()
        .with_tps(engine.tps)
        .with_channel_capacity(engine.channel_capacity)
        .with_window_title(engine.title.clone())
        .with_window_size(engine.width, engine.height)
        .build()
        .init(|systems| scenes::register(systems, &config))
        .run();

    ExitCode::SUCCESS
}
