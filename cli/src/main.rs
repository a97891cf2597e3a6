mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ladder-diff")]
#[command(about = "Index and compare PLC ladder logic program revisions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Index every program revision under a root directory")]
    Index {
        #[arg(help = "Root directory containing program-revision directories")]
        root: String,
        #[arg(long, help = "Use the legacy joined-text END filter and skip ladder rollup hashes")]
        legacy: bool,
    },
    #[command(about = "Build a fleet-wide alignment index from per-revision documents")]
    Align {
        #[arg(help = "Root directory to scan for likeaversion.json documents")]
        root: String,
        #[arg(long, short, value_name = "PATH", help = "Write the alignment index to this path instead of stdout")]
        output: Option<String>,
    },
    #[command(about = "Compare two per-revision index documents")]
    Compare {
        #[arg(help = "Path to the left likeaversion.json")]
        left: String,
        #[arg(help = "Path to the right likeaversion.json")]
        right: String,
        #[arg(long, short, value_name = "PATH", help = "Write the report to this path instead of stdout")]
        output: Option<String>,
        #[arg(long, help = "Include every rung in the drilldown, not just differing ones")]
        all_rungs: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Index { root, legacy } => commands::index::run(&root, legacy),
        Commands::Align { root, output } => commands::align::run(&root, output.as_deref()),
        Commands::Compare {
            left,
            right,
            output,
            all_rungs,
        } => commands::compare::run(&left, &right, output.as_deref(), all_rungs),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
