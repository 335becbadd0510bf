use std::io::Write;

use anyhow::Result;
use clap::Parser;
use huekit::{logging, run, Cli, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::resolve(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &config, &mut out)?;
    out.flush()?;
    Ok(())
}
