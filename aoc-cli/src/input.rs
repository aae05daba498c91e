//! Puzzle input resolution
//!
//! Inputs live under `inputs/<year>/day_<day>[_test].txt` unless the caller
//! overrides the path with `--input`.

use crate::error::CliError;
use std::path::{Path, PathBuf};

/// Conventional path for a day's input file.
pub fn input_path(inputs_dir: &Path, year: u16, day: u8, test: bool) -> PathBuf {
    let suffix = if test { "_test" } else { "" };
    inputs_dir
        .join(year.to_string())
        .join(format!("day_{day}{suffix}.txt"))
}

/// Read an input file, mapping a missing file to a dedicated error.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    if !path.exists() {
        return Err(CliError::InputMissing(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| CliError::InputRead {
        path: path.to_path_buf(),
        source,
    })
}
