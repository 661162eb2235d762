// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::constant;
use crate::error::CanalError;
use crate::ut::{env, path};

/// The Spinal Cord Toolbox deep learning segmentation command
///
/// # Examples
///
/// ```no_run
/// use canal_core::seg::Deepseg;
///
/// Deepseg::default().run("t2.nii.gz", "out/t2_canal.nii.gz").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Deepseg {
    pub executable: String,
    pub model: String,
}

impl Default for Deepseg {
    fn default() -> Self {
        Deepseg {
            executable: env::sct_executable(),
            model: constant::MODEL_NAME.to_string(),
        }
    }
}

impl Deepseg {
    /// Use a specific segmentation executable with the default model
    pub fn with_executable(executable: &str) -> Self {
        Deepseg {
            executable: executable.to_string(),
            model: constant::MODEL_NAME.to_string(),
        }
    }

    /// Arguments passed to the segmentation executable
    ///
    /// # Examples
    ///
    /// ```
    /// use canal_core::seg::Deepseg;
    ///
    /// let args = Deepseg::default().args("a.nii", "out/seg.nii");
    /// assert_eq!(args, ["sc_canal_t2", "-i", "a.nii", "-o", "out/seg.nii"]);
    /// ```
    pub fn args<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Vec<OsString> {
        vec![
            OsString::from(&self.model),
            OsString::from("-i"),
            input.as_ref().as_os_str().to_owned(),
            OsString::from("-o"),
            output.as_ref().as_os_str().to_owned(),
        ]
    }

    /// Segment the spinal canal from `input` and write the mask to `output`
    ///
    /// The command inherits stdout and stderr. A non-zero exit status is
    /// returned as an error.
    ///
    /// # Arguments
    ///
    /// * `input` - Path to an existing image volume
    /// * `output` - Path to the output mask volume
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<(), CanalError> {
        let input = input.as_ref();
        let output = output.as_ref();

        if !input.is_file() {
            return Err(CanalError::NoFileError(input.display().to_string()));
        }

        path::ensure_parent(output)?;

        let status = Command::new(&self.executable)
            .args(self.args(input, output))
            .status()
            .map_err(|err| CanalError::ProcessError(format!("{}: {}", self.executable, err)))?;

        if !status.success() {
            return Err(CanalError::SegmentationError(status.code()));
        }

        Ok(())
    }
}
