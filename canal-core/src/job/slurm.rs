// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::constant;
use crate::error::CanalError;
use crate::ut::path::shell_quote;

/// Resource requests written as `#SBATCH` directives
#[derive(Debug, Clone, PartialEq)]
pub struct SlurmResources {
    pub nodes: u32,
    pub cpus_per_task: u32,
    pub memory: String,
    pub time: String,
}

impl Default for SlurmResources {
    fn default() -> Self {
        SlurmResources {
            nodes: constant::SLURM_NODES,
            cpus_per_task: constant::SLURM_CPUS_PER_TASK,
            memory: constant::SLURM_MEMORY.to_string(),
            time: constant::SLURM_TIME.to_string(),
        }
    }
}

/// A segmentation + overlay job to be run on a cluster node
///
/// The rendered script activates a conda environment and re-invokes
/// `program` twice: once to segment and once to write the overlay.
///
/// # Examples
///
/// ```
/// use canal_core::job::JobSpec;
///
/// let job = JobSpec::new(
///     "a.nii",
///     "out/seg.nii",
///     "job1",
///     "sct",
///     vec!["node01".to_string(), "node02".to_string()],
///     "gpu",
/// );
///
/// let script = job.render();
/// assert!(script.contains("#SBATCH --nodelist=node01,node02\n"));
/// assert!(script.contains("conda activate sct\n"));
/// ```
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub image: PathBuf,
    pub segmentation: PathBuf,
    pub job_name: String,
    pub environment: String,
    pub nodes: Vec<String>,
    pub partition: String,
    pub resources: SlurmResources,
    pub program: String,
}

impl JobSpec {
    /// Initialize a job with default resources and program name
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        image: P,
        segmentation: Q,
        job_name: &str,
        environment: &str,
        nodes: Vec<String>,
        partition: &str,
    ) -> Self {
        JobSpec {
            image: image.as_ref().to_path_buf(),
            segmentation: segmentation.as_ref().to_path_buf(),
            job_name: job_name.to_string(),
            environment: environment.to_string(),
            nodes,
            partition: partition.to_string(),
            resources: SlurmResources::default(),
            program: constant::PROGRAM_NAME.to_string(),
        }
    }

    /// Check that every field written into the script is non-empty
    pub fn validate(&self) -> Result<(), CanalError> {
        if self.job_name.trim().is_empty() {
            return Err(CanalError::JobError("Job name must not be empty."));
        }

        if self.environment.trim().is_empty() {
            return Err(CanalError::JobError("Environment name must not be empty."));
        }

        if self.partition.trim().is_empty() {
            return Err(CanalError::JobError("Partition must not be empty."));
        }

        if self.nodes.is_empty() || self.nodes.iter().any(|node| node.trim().is_empty()) {
            return Err(CanalError::JobError(
                "Node list must contain at least one non-empty node.",
            ));
        }

        if self.program.trim().is_empty() {
            return Err(CanalError::JobError("Program must not be empty."));
        }

        Ok(())
    }

    /// Path of the job log with the given extension
    ///
    /// Logs live next to the segmentation output. A segmentation path with
    /// no directory gives a bare file name.
    pub fn log_path(&self, extension: &str) -> PathBuf {
        let file_name = format!("{}.{}", self.job_name, extension);

        match self.segmentation.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
            _ => PathBuf::from(file_name),
        }
    }

    /// Render the batch script
    pub fn render(&self) -> String {
        let image = shell_quote(&self.image);
        let segmentation = shell_quote(&self.segmentation);

        let mut script = String::from("#!/bin/bash\n");

        // Writing into a String never fails
        let _ = writeln!(script, "#SBATCH --job-name={}", self.job_name);
        let _ = writeln!(script, "#SBATCH --output={}", self.log_path("out").display());
        let _ = writeln!(script, "#SBATCH --error={}", self.log_path("err").display());
        let _ = writeln!(script, "#SBATCH --time={}", self.resources.time);
        let _ = writeln!(script, "#SBATCH -N {}", self.resources.nodes);
        let _ = writeln!(script, "#SBATCH --cpus-per-task={}", self.resources.cpus_per_task);
        let _ = writeln!(script, "#SBATCH --mem={}", self.resources.memory);
        let _ = writeln!(script, "#SBATCH --nodelist={}", self.nodes.join(","));
        let _ = writeln!(script, "#SBATCH --partition={}", self.partition);
        let _ = writeln!(script, "conda activate {}", self.environment);
        let _ = writeln!(script, "{} spawn {} {}", self.program, image, segmentation);
        let _ = writeln!(script, "{} vis {} {}", self.program, image, segmentation);

        script
    }
}

/// Write a rendered job script, replacing any existing file
///
/// # Arguments
///
/// * `job` - Job to render
/// * `path` - Destination of the script (e.g. `canal_seg.slurm`)
pub fn write_script<P: AsRef<Path>>(job: &JobSpec, path: P) -> Result<PathBuf, CanalError> {
    job.validate()?;

    let path = path.as_ref();
    std::fs::write(path, job.render())
        .map_err(|err| CanalError::ScriptWriteError(format!("{}: {}", path.display(), err)))?;

    Ok(path.to_path_buf())
}
