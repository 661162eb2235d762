// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use clap::Args;

use canal_core::seg::Deepseg;
use canal_core::ut::{env, track};

#[derive(Debug, Args)]
#[command(about = "Segment the spinal canal from an image volume with sct_deepseg.")]
pub struct SpawnArgs {
    #[arg(help = "Input image volume (.nii or .nii.gz).")]
    pub img_path: String,

    #[arg(help = "Output segmentation mask path.")]
    pub seg_path: String,

    #[arg(long, help = "Segmentation executable [env: CANAL_SEG_SCT, default: sct_deepseg].")]
    pub sct: Option<String>,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn spawn(args: &SpawnArgs) {
    let executable = args.sct.to_owned().unwrap_or_else(env::sct_executable);
    let deepseg = Deepseg::with_executable(&executable);

    track::progress_log(
        &format!(
            "Segmenting {} with {} ({})",
            args.img_path, deepseg.model, deepseg.executable
        ),
        args.verbose,
    );

    deepseg
        .run(&args.img_path, &args.seg_path)
        .unwrap_or_else(|err| {
            eprintln!("[canal::spawn] ERROR: {}", err);
            std::process::exit(1);
        });

    track::progress_log(
        &format!("Complete. Segmentation written to {}.", args.seg_path),
        args.verbose,
    );
}
