mod arguments;
mod command_line;
mod contracts;
mod deploy;
mod error;
mod pipeline;
mod profile;
mod report;

use std::process::ExitCode;

use clap::Parser;
use command_line::CommandLine;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cmd = CommandLine::parse();
    match cmd.execute().await {
        Ok(outcome) => report::report(outcome),
        Err(err) => report::setup_failure(err),
    }
}
