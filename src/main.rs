use clap::Parser;
use dat2csv::cli::{run, Cli};
use dat2csv::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
