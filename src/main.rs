use clap::Parser;
use log::info;

use safe_path::config::Config;
use safe_path::registry::ObstacleRegistry;
use safe_path::scenario;
use safe_path::session::Session;
use std::io::{self, Write};

fn main() {
    let config = Config::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let mut registry = ObstacleRegistry::new();
    if config.random_obstacles > 0 {
        for obstacle in scenario::generate(config.random_obstacles, config.spread, config.seed) {
            registry.add(obstacle);
        }
        println!(
            "Placed {} random obstacles within {} cells of the origin",
            registry.len(),
            config.spread
        );
    }

    let engine = config.build_engine();
    info!(
        "Using {} search, node budget {:?}",
        engine.name(),
        config.search_budget()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), engine).with_registry(registry);

    if let Err(e) = session.run() {
        eprintln!("Session failed: {}", e);
        std::process::exit(1);
    }
}
