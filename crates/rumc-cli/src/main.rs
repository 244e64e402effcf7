mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Parse CLI, load config, init logging, dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("rumc error: {:#}", err);
        std::process::exit(1);
    }
}
