// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use clap::{Parser, Subcommand};
use canal_cli::{launch, spawn, vis};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
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
    let cli = Cli::parse();

    match &cli.command {
        Commands::Spawn(spawn_args) => spawn::spawn(spawn_args),
        Commands::Vis(vis_args) => vis::vis(vis_args),
        Commands::Launch(launch_args) => launch::launch(launch_args),
    }
}
