use crate::demo::{run_catalog, run_demo, run_payload, DemoArgs, PayloadArgs};
use clap::{Parser, Subcommand};
use license_portal::config::AppConfig;
use license_portal::error::AppError;
use license_portal::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "License Portal Client",
    about = "Exercise the driver's-license application portal workflows from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk a scripted application from empty draft to submission (default command)
    Demo(DemoArgs),
    /// Map stored draft sections into the backend submission payload
    Payload(PayloadArgs),
    /// Print the reference data the wizard's dropdowns are built from
    Catalog,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, &config).await,
        Command::Payload(args) => run_payload(args),
        Command::Catalog => run_catalog(),
    }
}
