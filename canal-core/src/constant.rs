// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

// Pre-trained spinal canal model passed to sct_deepseg
pub const MODEL_NAME: &str = "sc_canal_t2";

// Default external executables
pub const SCT_EXECUTABLE: &str = "sct_deepseg";
pub const SBATCH_EXECUTABLE: &str = "sbatch";
pub const PROGRAM_NAME: &str = "canal-seg";

// Environment variables overriding the default executables
pub const SCT_ENV: &str = "CANAL_SEG_SCT";
pub const SBATCH_ENV: &str = "CANAL_SEG_SBATCH";

// Generated file names
pub const QC_FILENAME: &str = "seg_qc.png";
pub const SCRIPT_FILENAME: &str = "canal_seg.slurm";

// All currently supported volume formats
pub const SUPPORTED_VOLUME_FORMATS: [&str; 2] = ["nii", "nii.gz"];

// Overlay display windows (min, max) for the image and the mask
pub const IMAGE_WINDOW: (f32, f32) = (0.0, 150.0);
pub const MASK_WINDOW: (f32, f32) = (0.9, 1.0);
pub const MASK_ALPHA: f32 = 0.5;

// An 8x8 inch figure at 100 dpi
pub const FIGURE_SIZE: u32 = 800;

// Axes box as fractions of the figure (left, bottom, right, top)
pub const AXES_BOX: (f32, f32, f32, f32) = (0.125, 0.11, 0.9, 0.88);

// ColorBrewer "Reds" ramp from light to dark
pub const REDS: [[u8; 3]; 9] = [
    [255, 245, 240],
    [254, 224, 210],
    [252, 187, 161],
    [252, 146, 114],
    [251, 106, 74],
    [239, 59, 44],
    [203, 24, 29],
    [165, 15, 21],
    [103, 0, 13],
];

// Hard default SLURM resource requests
pub const SLURM_NODES: u32 = 1;
pub const SLURM_CPUS_PER_TASK: u32 = 1;
pub const SLURM_MEMORY: &str = "11G";
pub const SLURM_TIME: &str = "0:20:00";
