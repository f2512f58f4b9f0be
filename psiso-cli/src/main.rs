mod cli_types;
mod commands;
mod error;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Inspect {
            platform,
            patch,
            title_db,
            images,
        } => commands::inspect::run_inspect(platform, patch, title_db, &images),
        Commands::Sfo { file, key } => commands::sfo::run_sfo(&file, key.as_deref()),
        Commands::List => {
            commands::list::run_list();
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show();
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetDb { platform, file } => {
                commands::config::run_config_set_db(platform, &file)
            }
            ConfigAction::ClearDb { platform } => commands::config::run_config_clear_db(platform),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Cannot set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
