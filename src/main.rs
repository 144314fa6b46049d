//! Monogram - initials avatar generator CLI.

mod cli;
mod config;
mod output;

use std::process;

use clap::Parser;
use log::{debug, info, LevelFilter};
use monogram::{initials_for, AvatarConfig, AvatarError, AvatarGenerator, CosmicRasterizer};

use crate::cli::Cli;
use crate::config::Config;
use crate::output::{resolve_destination, write_avatar, Destination};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<(), AvatarError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    debug!("Config: {}", config_path.display());
    let config = Config::load(&config_path).map_err(AvatarError::Config)?;

    let text = cli.resolve_text().map_err(|e| AvatarError::InvalidArgument(e.to_string()))?;
    let options = config.options_with(&cli.options());

    if cli.initials {
        println!("{}", initials_for(&text, &options));
        return Ok(());
    }

    let avatar_config = AvatarConfig::from_options(&options)?;
    let generator = AvatarGenerator::new(CosmicRasterizer::new());
    let data = generator.generate_with_config(&text, &avatar_config)?;

    let destination = resolve_destination(cli.output.as_deref(), &text, avatar_config.format);
    write_avatar(&data, &destination)?;
    match destination {
        Destination::Stdout => info!("Wrote {} bytes to stdout", data.len()),
        Destination::File(path) => eprintln!("Saved: {}", path.display()),
    }

    Ok(())
}
