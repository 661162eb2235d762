mod slurm;
mod submit;

pub use slurm::JobSpec;
pub use slurm::SlurmResources;
pub use slurm::write_script;

pub use submit::Submission;
pub use submit::parse_job_id;
pub use submit::submit;
pub use submit::submit_command;
