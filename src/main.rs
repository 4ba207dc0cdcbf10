use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{debug, error, info};
use std::process::ExitCode;

use watermark_payload::config::{OutputMode, Settings};
use watermark_payload::handlers::{self, ConvertTarget};
use watermark_payload::models::{MessageFormat, PayloadError};

#[derive(Debug, Parser)]
#[command(name = "watermark-payload", version, about = "Normalize watermark messages into 5-byte payloads")]
struct Cli {
    /// Output mode, overrides PAYLOAD_OUTPUT
    #[arg(long, global = true)]
    output: Option<OutputMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize a message: numeric "100,150,200,50,75", text "Hello" or 40 binary digits
    Normalize {
        #[arg(long, short)]
        format: Option<MessageFormat>,

        /// Fail instead of printing a zeroed payload when validation errors are present
        #[arg(long)]
        strict: bool,

        message: String,
    },
    /// Generate a random numeric message
    Random,
    /// Render a comma-separated byte list as text, binary or hex
    Convert {
        #[arg(long, value_enum)]
        to: ConvertTarget,

        bytes: String,
    },
}

fn run(cli: Cli, settings: &Settings) -> Result<String, PayloadError> {
    match cli.command {
        Command::Normalize {
            format,
            strict,
            message,
        } => handlers::normalize_message(settings, format, &message, strict),
        Command::Random => handlers::random_message(settings, &mut rand::thread_rng()),
        Command::Convert { to, bytes } => handlers::convert_bytes(settings, to, &bytes),
    }
}

fn report(err: &PayloadError, output: OutputMode) {
    match output {
        OutputMode::Json => match serde_json::to_string_pretty(&err.to_response()) {
            Ok(body) => eprintln!("{}", body),
            Err(_) => eprintln!("Error: {}", err),
        },
        OutputMode::Text => eprintln!("Error: {}", err),
    }
}

fn main() -> ExitCode {
    // Load .env file
    dotenv().ok();

    let cli = Cli::parse();

    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(output) = cli.output {
        settings.output = output;
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(settings.log_level.clone()));
    debug!("Loaded settings: {:?}", settings);

    match run(cli, &settings) {
        Ok(body) => {
            println!("{}", body);
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Command failed: {}", e);
            report(&e, settings.output);
            ExitCode::FAILURE
        }
    }
}
