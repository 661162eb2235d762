// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use clap::Args;
use colored::Colorize;

use canal_core::constant;
use canal_core::job::{self, JobSpec, SlurmResources};
use canal_core::ut::{env, track};

#[derive(Debug, Args)]
#[command(about = "Write a SLURM script that segments and renders an overlay, then submit it.")]
pub struct LaunchArgs {
    #[arg(short = 'i', long, help = "Input image volume.")]
    pub image: String,

    #[arg(short = 'o', long, help = "Output segmentation mask path.")]
    pub output: String,

    #[arg(short = 'j', long, help = "SLURM job name.")]
    pub job_name: String,

    #[arg(short = 'e', long, help = "Conda environment to activate.")]
    pub env: String,

    #[arg(
        short = 'n',
        long,
        help = "Compute nodes (comma-separated or repeated).",
        value_delimiter = ',',
        required = true
    )]
    pub nodes: Vec<String>,

    #[arg(short = 'p', long, help = "SLURM partition.")]
    pub partition: String,

    #[arg(
        short = 's',
        long,
        help = "Path of the generated batch script.",
        default_value = constant::SCRIPT_FILENAME
    )]
    pub script: String,

    #[arg(long, help = "Submission executable [env: CANAL_SEG_SBATCH, default: sbatch].")]
    pub sbatch: Option<String>,

    #[arg(
        long,
        help = "Program invoked on the compute node.",
        default_value = constant::PROGRAM_NAME
    )]
    pub program: String,

    #[arg(long, help = "Wall-clock limit.", default_value = constant::SLURM_TIME)]
    pub time: String,

    #[arg(long, help = "Memory request.", default_value = constant::SLURM_MEMORY)]
    pub mem: String,

    #[arg(
        long,
        help = "CPUs per task.",
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub cpus: u32,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn launch(args: &LaunchArgs) {
    let sbatch = args.sbatch.to_owned().unwrap_or_else(env::sbatch_executable);

    let mut spec = JobSpec::new(
        &args.image,
        &args.output,
        &args.job_name,
        &args.env,
        args.nodes.to_owned(),
        &args.partition,
    );

    spec.resources = SlurmResources {
        cpus_per_task: args.cpus,
        memory: args.mem.to_owned(),
        time: args.time.to_owned(),
        ..SlurmResources::default()
    };
    spec.program = args.program.to_owned();

    let script = job::write_script(&spec, &args.script).unwrap_or_else(|err| {
        eprintln!("[canal::launch] ERROR: {}", err);
        std::process::exit(1);
    });

    track::progress_log(
        &format!("Wrote batch script for {} to {}", spec.job_name, script.display()),
        args.verbose,
    );

    let submission = job::submit(&sbatch, &script).unwrap_or_else(|err| {
        eprintln!("[canal::launch] ERROR: {}", err);
        std::process::exit(1);
    });

    track::progress_log(&format!("Ran `{}`", submission.command), args.verbose);
    track::print_captured("stdout:", &submission.stdout);
    track::print_captured("stderr:", &submission.stderr);

    if !submission.success() {
        eprintln!(
            "[canal::launch] ERROR: Submission failed with {}.",
            submission.status.to_string().red()
        );
        std::process::exit(1);
    }

    match submission.job_id() {
        Some(id) => track::progress_log(&format!("Submitted job {}.", id), args.verbose),
        None => track::progress_log("Submitted.", args.verbose),
    }
}
