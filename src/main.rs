// src/main.rs

use watchrun::cli::{self, CliArgs};
use watchrun::{logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = start(args).await {
        eprintln!("watchrun error: {err:?}");
        std::process::exit(1);
    }
}

async fn start(args: CliArgs) -> anyhow::Result<()> {
    logging::init_logging(args.log_level)?;
    run(args).await
}
