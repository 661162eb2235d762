// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::path::{Path, PathBuf};

use crate::constant;
use crate::error::CanalError;

/// Directory holding a file, with an empty parent resolved to `.`
///
/// # Arguments
///
/// * `path` - Path to a file
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use canal_core::ut::path::output_dir;
///
/// assert_eq!(output_dir("out/seg.nii.gz"), Path::new("out"));
/// assert_eq!(output_dir("seg.nii.gz"), Path::new("."));
/// ```
pub fn output_dir<P: AsRef<Path>>(path: P) -> PathBuf {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Check if a path ends with a supported volume extension
///
/// Matching is case-sensitive, as the NIfTI reader only decompresses files
/// ending in a lowercase `.gz`.
///
/// # Examples
///
/// ```
/// use canal_core::ut::path::has_volume_extension;
///
/// assert!(has_volume_extension("t2.nii"));
/// assert!(has_volume_extension("T2.nii.gz"));
/// assert!(!has_volume_extension("T2.NII.GZ"));
/// assert!(!has_volume_extension("t2.png"));
/// ```
pub fn has_volume_extension<P: AsRef<Path>>(path: P) -> bool {
    let name = path.as_ref().file_name().and_then(|name| name.to_str());

    match name {
        Some(name) => constant::SUPPORTED_VOLUME_FORMATS
            .iter()
            .any(|ext| name.ends_with(&format!(".{}", ext))),
        None => false,
    }
}

/// Create the parent directory of a file path if it does not exist
///
/// # Arguments
///
/// * `path` - Path to a file that is about to be written
pub fn ensure_parent<P: AsRef<Path>>(path: P) -> Result<(), CanalError> {
    let directory = output_dir(path);

    if !directory.exists() {
        std::fs::create_dir_all(&directory)
            .map_err(|err| CanalError::DirError(format!("{}: {}", directory.display(), err)))?;
    }

    Ok(())
}

/// Quote a path for a POSIX shell command line
///
/// Paths made only of characters the shell treats literally are returned
/// unchanged. Anything else is wrapped in single quotes.
///
/// # Examples
///
/// ```
/// use canal_core::ut::path::shell_quote;
///
/// assert_eq!(shell_quote("out/seg.nii.gz"), "out/seg.nii.gz");
/// assert_eq!(shell_quote("my job.slurm"), "'my job.slurm'");
/// ```
pub fn shell_quote<P: AsRef<Path>>(path: P) -> String {
    let text = path.as_ref().to_string_lossy();

    let literal = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./,:=+@%".contains(c));

    if literal {
        return text.into_owned();
    }

    format!("'{}'", text.replace('\'', "'\\''"))
}
