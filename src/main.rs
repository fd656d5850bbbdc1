use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Text,
}

mod commands;
mod output;
mod tty;

use commands::{config, standardize};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "renumber")]
#[command(version = VERSION)]
#[command(about = "Renumber ex<number>.py exercise files to a zero-padded sequence")]
struct Cli {
    /// Defaults to `standardize` on the configured directory
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename ex<number>.py files to ex01.py, ex02.py, ... in name order
    Standardize(standardize::StandardizeArgs),
    /// Inspect renumber.json configuration
    Config(config::ConfigArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Standardize(args) if !args.json => ResponseMode::Text,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Standardize(standardize::StandardizeArgs::default()));

    let global = GlobalArgs {};

    let exit_code = match response_mode(&command) {
        ResponseMode::Text => match commands::run_text(command, &global) {
            Ok((content, exit_code)) => {
                if let Err(err) = output::write_stdout(&content) {
                    output::print_error_text(&err);
                    1
                } else {
                    exit_code
                }
            }
            Err(err) => {
                output::print_error_text(&err);
                output::exit_code_for_error(err.code)
            }
        },
        ResponseMode::Json => {
            let (json_result, exit_code) = commands::run_json(command, &global);
            match output::print_json_result(json_result) {
                Ok(()) => exit_code,
                Err(_) => 1,
            }
        }
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
