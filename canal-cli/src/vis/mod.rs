// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use clap::Args;

use canal_core::im::{OverlayStyle, save_overlay};
use canal_core::ut::track;

#[derive(Debug, Args)]
#[command(about = "Write a seg_qc.png overlay of a segmentation next to the mask.")]
pub struct VisArgs {
    #[arg(help = "Input image volume (.nii or .nii.gz).")]
    pub img_path: String,

    #[arg(help = "Segmentation mask volume (.nii or .nii.gz).")]
    pub seg_path: String,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn vis(args: &VisArgs) {
    track::progress_log(
        &format!("Rendering overlay of {} on {}", args.seg_path, args.img_path),
        args.verbose,
    );

    let output = save_overlay(&args.img_path, &args.seg_path, &OverlayStyle::default())
        .unwrap_or_else(|err| {
            eprintln!("[canal::vis] ERROR: {}", err);
            std::process::exit(1);
        });

    track::progress_log(
        &format!("Complete. Overlay written to {}.", output.display()),
        args.verbose,
    );
}
