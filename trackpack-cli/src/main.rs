use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use trackpack_cli::commands::Command;
use trackpack_cli::config::Settings;
use trackpack_cli::error::Error;
use trackpack_cli::logging::{self, LogOutputFormat};

/// Command line arguments for trackpack.
#[derive(Debug, Parser)]
#[clap(name = "trackpack", version, about = "Pack music platform ids into QR payloads")]
struct Cli {
    /// Optional path to the configuration file. If not provided, defaults
    /// and environment variables are used.
    #[clap(short = 'c', long, required = false)]
    config: Option<PathBuf>,

    /// Overrides `logging.format` from the configuration.
    #[clap(short = 'o', long = "output-format")]
    output_format: Option<LogOutputFormat>,

    #[clap(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let settings = match Settings::new(args.config.as_ref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("{}", Error::from(error));
            return ExitCode::FAILURE;
        }
    };

    let format = args.output_format.unwrap_or(settings.logging.format);
    logging::setup_logging(&settings.logging.directives, format);

    match args.command.run(&settings) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) if error.is_codec_defect() => {
            tracing::error!(%error, "internal codec defect, the payload must not be used");
            ExitCode::from(2)
        }
        Err(error) => {
            tracing::error!(%error, "command failed");
            ExitCode::FAILURE
        }
    }
}
