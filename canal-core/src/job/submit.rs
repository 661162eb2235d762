// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::error::CanalError;
use crate::ut::path::shell_quote;

/// Captured result of a batch submission
#[derive(Debug, Clone)]
pub struct Submission {
    pub command: String,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Submission {
    /// True if the submission command exited with status zero
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Job identifier from a `Submitted batch job <id>` line, if present
    pub fn job_id(&self) -> Option<u64> {
        parse_job_id(&self.stdout)
    }
}

/// Extract the job identifier printed by `sbatch`
///
/// # Examples
///
/// ```
/// use canal_core::job::parse_job_id;
///
/// assert_eq!(parse_job_id("Submitted batch job 4821\n"), Some(4821));
/// assert_eq!(parse_job_id("sbatch: error: invalid partition"), None);
/// ```
pub fn parse_job_id(stdout: &str) -> Option<u64> {
    stdout.lines().find_map(|line| {
        line.trim()
            .strip_prefix("Submitted batch job")
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|id| id.parse::<u64>().ok())
    })
}

/// Shell command line used to submit a script
///
/// `sbatch` is kept as raw shell text and the script path is quoted.
pub fn submit_command<P: AsRef<Path>>(sbatch: &str, script: P) -> String {
    format!("{} {}", sbatch, shell_quote(script))
}

/// Submit a batch script through the shell and capture its output
///
/// The command runs as `sh -c '<sbatch> "$1"' sh <script>` with the current
/// environment, so the script path reaches the shell as a single argument.
/// Output is collected after the submission command exits, which happens
/// once the job is queued, not when it finishes.
///
/// # Arguments
///
/// * `sbatch` - Submission executable (e.g. `sbatch`)
/// * `script` - Path to the batch script
pub fn submit<P: AsRef<Path>>(sbatch: &str, script: P) -> Result<Submission, CanalError> {
    let script = script.as_ref();
    let command = submit_command(sbatch, script);

    let output = Command::new("sh")
        .arg("-c")
        .arg(format!("{} \"$1\"", sbatch))
        .arg("sh")
        .arg(script)
        .output()
        .map_err(|err| CanalError::ProcessError(format!("{}: {}", command, err)))?;

    Ok(Submission {
        command,
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_submit_command() {
        assert_eq!(
            submit_command("sbatch", "canal_seg.slurm"),
            "sbatch canal_seg.slurm"
        );
    }

    #[test]
    fn test_parse_job_id() {
        assert_eq!(parse_job_id("Submitted batch job 12345"), Some(12345));
        assert_eq!(
            parse_job_id("sbatch: warning: x\nSubmitted batch job 7 on cluster a\n"),
            Some(7)
        );
        assert_eq!(parse_job_id(""), None);
        assert_eq!(parse_job_id("Submitted batch job abc"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_submit_captures_output() {
        let submission = submit("echo Submitted batch job 99 for", "canal_seg.slurm").unwrap();

        assert!(submission.success());
        assert_eq!(
            submission.stdout.trim(),
            "Submitted batch job 99 for canal_seg.slurm"
        );
        assert_eq!(submission.job_id(), Some(99));
        assert!(submission.command.starts_with("echo Submitted"));
    }

    #[test]
    fn test_submit_command_quotes_script() {
        assert_eq!(
            submit_command("sbatch", "jobs/my job.slurm"),
            "sbatch 'jobs/my job.slurm'"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_submit_script_path_with_space() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("my job.slurm");
        std::fs::write(&script, "#!/bin/bash\n").unwrap();

        let submission = submit("ls", &script).unwrap();

        assert!(submission.success(), "{}", submission.stderr);
        assert_eq!(submission.stdout.trim(), script.display().to_string());
    }

    #[cfg(unix)]
    #[test]
    fn test_submit_script_path_is_not_evaluated() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("marker");
        let script = format!("missing.slurm; touch {}", marker.display());

        let submission = submit("ls", &script).unwrap();

        assert!(!submission.success());
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_submit_failure_status() {
        let submission = submit("echo rejected >&2; false", "canal_seg.slurm").unwrap();

        assert!(!submission.success());
        assert_eq!(submission.stderr.trim(), "rejected");
        assert_eq!(submission.job_id(), None);
    }
}
