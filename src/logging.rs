//! Logging configuration using tracing

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Windowing crates are chatty at info level; keep them to warnings
const QUIET_DEPENDENCIES: &str = "eframe=warn,egui_glow=warn,winit=warn,reqwest=warn";

fn build_filter(verbose: bool, env_filter: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new(format!("debug,{}", QUIET_DEPENDENCIES));
    }
    match env_filter {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(format!("info,{}", QUIET_DEPENDENCIES)),
    }
}

/// Initialize the logging system. `RUST_LOG` applies unless `verbose` is set.
pub fn init(verbose: bool, json: bool) -> anyhow::Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(verbose, env.as_deref());

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}
