// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use crate::constant;

/// Read a non-empty environment variable or fall back to a default
fn env_or(key: &str, default: &str) -> String {
    if let Ok(value) = std::env::var(key) {
        if !value.is_empty() {
            return value;
        }
    }

    default.to_string()
}

/// Segmentation executable, overridable with `CANAL_SEG_SCT`
pub fn sct_executable() -> String {
    env_or(constant::SCT_ENV, constant::SCT_EXECUTABLE)
}

/// Batch submission executable, overridable with `CANAL_SEG_SBATCH`
pub fn sbatch_executable() -> String {
    env_or(constant::SBATCH_ENV, constant::SBATCH_EXECUTABLE)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_env_or_fallback() {
        assert_eq!(
            env_or("CANAL_SEG_TEST_UNSET_VARIABLE", "sbatch"),
            "sbatch".to_string()
        );
    }

    #[test]
    fn test_env_or_path() {
        // PATH is set in any environment running the tests
        let path = std::env::var("PATH").unwrap();
        assert_eq!(env_or("PATH", "fallback"), path);
    }
}
