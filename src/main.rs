// src/main.rs

use fswatch::errors::Result;
use fswatch::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        match err.exit_code() {
            2 => eprintln!("fswatch: {err}"),
            _ => eprintln!("exit reason: {err}"),
        }
        std::process::exit(err.exit_code());
    }
}

async fn run_main() -> Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
