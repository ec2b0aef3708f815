use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sprig_cli::BuildMode;

#[derive(Parser)]
#[command(name = "sprig", version, about = "Sprig template compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a template into a DOM mount program.
    Build {
        /// Path to the template file
        input: PathBuf,
        /// Output directory (default: target/sprig-gen)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Build mode: readable dev output or minified release output
        #[arg(long, value_enum, default_value_t = BuildMode::Dev)]
        mode: BuildMode,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            input,
            out_dir,
            mode,
        } => sprig_cli::build_cmd(&input, out_dir.as_deref(), mode)?,
    }
    Ok(())
}
