/* src/cli/core/src/main.rs */

mod build;
mod cli;
mod config;
mod error;
mod logging;
mod manifest;
mod platform;
mod process;
mod shell;
mod ui;

use anyhow::{Context, Result};

use error::BuildError;
use process::SystemRunner;
use ui::{RED, RESET};

#[tokio::main]
async fn main() {
  logging::init();

  if let Err(e) = run().await {
    match e.downcast_ref::<BuildError>() {
      Some(BuildError::Help) => println!("{}", cli::help_text()),
      Some(BuildError::Usage(reason)) => {
        eprintln!("{RED}error{RESET}: {reason}");
        eprintln!();
        println!("{}", cli::help_text());
      }
      _ => {
        ui::blank();
        ui::fail(&format!("{e:#}"));
      }
    }
    std::process::exit(1);
  }
}

async fn run() -> Result<()> {
  let request = cli::parse_request(std::env::args())?;
  let base_dir = std::env::current_dir().context("failed to get current directory")?;
  build::run_build(&request, &base_dir, &mut SystemRunner).await
}
