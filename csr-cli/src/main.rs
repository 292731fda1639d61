//! CSR CLI - Command line tool for support-case report generation.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "csr-cli",
    version,
    about = "Support-case reporting toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: csr_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    csr_cmd::run(cli.command)
}
