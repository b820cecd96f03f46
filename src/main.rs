use anyhow::Result;
use clap::Parser;
use std::io;

use braymatch::{telemetry, Config, Console, UserRegistry};

fn main() -> Result<()> {
    let config = Config::parse();
    telemetry::init(&config);

    let registry = if config.demo {
        UserRegistry::with_demo_profiles()
    } else {
        UserRegistry::new()
    };
    tracing::info!(
        version = braymatch::VERSION,
        users = registry.len(),
        "console starting"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(registry, stdin.lock(), stdout.lock())
        .with_color(config.use_color());
    console.run()?;

    tracing::info!(users = console.registry().len(), "console closed");
    Ok(())
}
