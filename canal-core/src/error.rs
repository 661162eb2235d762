// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::fmt;

#[derive(Debug, Clone)]
pub enum CanalError {
    VolumeReadError(String),
    VolumeExtensionError,
    VolumeShapeError(Vec<usize>),
    ShapeMismatchError((usize, usize), (usize, usize)),
    ImageWriteError(String),
    ScriptWriteError(String),
    ProcessError(String),
    SegmentationError(Option<i32>),
    JobError(&'static str),
    NoFileError(String),
    DirError(String),
    OtherError(String),
}

impl fmt::Display for CanalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CanalError::VolumeReadError(message) => {
                write!(
                    f,
                    "[canal::VolumeReadError] Failed to read volume. {}",
                    message
                )
            }
            CanalError::VolumeExtensionError => {
                write!(
                    f,
                    "[canal::VolumeExtensionError] Only .nii and .nii.gz volumes are currently supported."
                )
            }
            CanalError::VolumeShapeError(shape) => {
                write!(
                    f,
                    "[canal::VolumeShapeError] Could not reduce volume of shape {:?} to a single 2D plane.",
                    shape
                )
            }
            CanalError::ShapeMismatchError(image, mask) => {
                write!(
                    f,
                    "[canal::ShapeMismatchError] Image plane {:?} and mask plane {:?} must have the same shape.",
                    image, mask
                )
            }
            CanalError::ImageWriteError(message) => {
                write!(
                    f,
                    "[canal::ImageWriteError] Failed to write image. {}",
                    message
                )
            }
            CanalError::ScriptWriteError(message) => {
                write!(
                    f,
                    "[canal::ScriptWriteError] Failed to write batch script. {}",
                    message
                )
            }
            CanalError::ProcessError(message) => {
                write!(
                    f,
                    "[canal::ProcessError] Failed to start external command. {}",
                    message
                )
            }
            CanalError::SegmentationError(code) => match code {
                Some(code) => write!(
                    f,
                    "[canal::SegmentationError] Segmentation exited with status {}.",
                    code
                ),
                None => write!(
                    f,
                    "[canal::SegmentationError] Segmentation was terminated by a signal."
                ),
            },
            CanalError::JobError(message) => {
                write!(f, "[canal::JobError] Invalid job. {}", message)
            }
            CanalError::NoFileError(message) => {
                write!(
                    f,
                    "[canal::NoFileError] File could not be found. {}.",
                    message
                )
            }
            CanalError::DirError(message) => {
                write!(
                    f,
                    "[canal::DirError] Directory could not be created. {}.",
                    message
                )
            }
            CanalError::OtherError(message) => {
                write!(f, "[canal::OtherError] Error: {}.", message)
            }
        }
    }
}

impl std::error::Error for CanalError {}
