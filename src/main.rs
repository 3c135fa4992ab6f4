use anyhow::{Context, Result};
use clap::Parser;
use split_tests::cli::Cli;
use split_tests::config::{FileConfig, RunMode, DEFAULT_CONFIG_FILE};
use split_tests::pipeline;
use std::io::IsTerminal;
use std::path::Path;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Initialize the stderr subscriber; stdout is reserved for the file list
fn init_tracing(debug: bool) {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    if debug {
        filter = filter.add_directive(tracing::Level::TRACE.into());
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    // Update mode never reads split-tests.toml
    let file_config = if args.wants_update() {
        None
    } else {
        FileConfig::locate(args.config.as_deref(), Path::new(DEFAULT_CONFIG_FILE))?
    };

    match RunMode::resolve(&args, file_config)? {
        RunMode::Split(config) => {
            let outcome = pipeline::run_split(&config).context("failed to split test files")?;
            if outcome.is_authoritative() {
                info!("expected test time: {:.1}s", outcome.expected_time());
            }
            println!("{}", outcome.line());
        }
        RunMode::Update(config) => {
            pipeline::run_update(&config).context("failed to update JUnit timings")?;
        }
    }

    Ok(())
}
