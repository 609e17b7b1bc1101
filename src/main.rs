use airq_dashboard::cli::{run, Cli};
use airq_dashboard::error::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
