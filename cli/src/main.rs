mod cli;
mod commands;
mod config;
mod logging;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands};
use config::{ensure_dirs, LogLevel, UserConfig};
use logging::LogMode;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = ensure_dirs();

    let cli = Cli::parse();
    let config = UserConfig::load();
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);

    let mode = LogMode::for_command(cli.command.as_ref());
    let _guard = logging::init(config.log_level, mode, log_level_override);

    match cli.command {
        Some(Commands::Generate {
            prompt,
            variations,
            json,
        }) => commands::generate::run(&config, &Cli::prompt_text(&prompt), variations, json),
        Some(Commands::Session { css_out }) => commands::session::run(&config, css_out),
        Some(Commands::Theme { command }) => commands::theme::run(command),
        Some(Commands::Config { path, reset }) => commands::config::run(path, reset),
        None => commands::session::run(&config, None),
    }
}
