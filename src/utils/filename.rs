use crate::utils::constants::INPUT_EXTENSION;
use std::path::Path;

/// Derive the source identifier from a file name: the stem up to the first
/// underscore, or the whole stem (e.g. `Library_jan.csv` -> `Library`).
pub fn source_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    match stem.split_once('_') {
        Some((source, _)) => source.to_string(),
        None => stem.into_owned(),
    }
}

/// Whether a path names an input file (`*.csv`, any case)
pub fn is_input_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION))
}
