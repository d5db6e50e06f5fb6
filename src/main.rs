use std::process::ExitCode;

use clap::Parser;

use flowgraph::cli::{self, Cli};
use flowgraph::observability::init_logging_with;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging_with(cli.log.as_deref());

    match cli::run(cli).await {
        Ok(Some(output)) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
