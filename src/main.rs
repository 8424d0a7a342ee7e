use clap::Parser;
use std::path::Path;

use relcut::{
    cli,
    command::SystemRunner,
    config::ReleaseConfig,
    confirm::LineConfirm,
    orchestrator::Orchestrator,
    result::Result,
    version::ReleaseVersion,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("relcut")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = cli::Args::parse();

    initialize_logger(args.debug)?;

    let version = ReleaseVersion::parse(&args.version)?;
    let release_date = chrono::Local::now().date_naive();
    let config =
        ReleaseConfig::resolve(version, Path::new(&args.path), release_date)?;

    let runner = SystemRunner::new(config.root.clone());
    let mut confirm = LineConfirm::stdio();

    Orchestrator::new(&config, &runner, &mut confirm).execute()?;

    Ok(())
}
