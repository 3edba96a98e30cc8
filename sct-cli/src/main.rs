//! SCT CLI - Command line tool for the smart city traffic dashboard.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "sct-cli",
    version,
    about = "Smart city traffic dashboard toolkit"
)]
struct Cli {
    #[command(flatten)]
    api: sct_cmd::ApiArgs,

    #[command(subcommand)]
    command: sct_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    sct_cmd::run(cli.api, cli.command).await
}
