use anyhow::Result;
use clap::Parser;
use sheet_relay::cli;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let payload = cli::run_command(args.command)?;
    cli::emit_value(&payload, args.compact)?;
    Ok(())
}
