use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dat2csv")]
#[command(about = "Convert mesh climate DAT files into per-mesh-cell CSV time series")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every DAT file in a directory into CSV files grouped by mesh
    Convert {
        #[arg(help = "Directory containing MS<variable><year>.dat files")]
        src_dir: PathBuf,

        #[arg(help = "Output directory, must not exist yet [default: output next to the executable]")]
        output_dir: Option<PathBuf>,

        #[arg(short, long, help = "TOML settings file")]
        config: Option<PathBuf>,

        #[arg(long, help = "Write English column names instead of Japanese")]
        english_headers: bool,

        #[arg(long, help = "Memory-map DAT files while reading")]
        mmap: bool,

        #[arg(short, long, help = "Hide the progress bar")]
        quiet: bool,
    },

    /// Print the mesh headers of a DAT file as JSON lines
    Inspect {
        #[arg(help = "DAT file to inspect")]
        file: PathBuf,

        #[arg(short, long, help = "Maximum number of mesh headers to print")]
        limit: Option<usize>,

        #[arg(short, long, help = "TOML settings file")]
        config: Option<PathBuf>,
    },
}
