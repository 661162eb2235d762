#![allow(clippy::all)]
use clap::{Parser, Subcommand};
use clap_markdown;

use canal_cli::{launch, spawn, vis};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Spawn(spawn::SpawnArgs),
    Vis(vis::VisArgs),
    Launch(launch::LaunchArgs),
}

fn main() {
    clap_markdown::print_help_markdown::<Cli>();
}
