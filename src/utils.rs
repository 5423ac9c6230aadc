use std::path::PathBuf;

/// Expand a leading `~` and require the given extension (case-insensitive).
pub fn path_with_ext(s: &str, ext: &str) -> Result<PathBuf, String> {
    if !s.to_lowercase().ends_with(ext) {
        return Err(format!("{s} must end with {ext}"));
    }
    Ok(PathBuf::from(&*shellexpand::tilde(s)))
}

pub fn fix_path(s: &str) -> Result<PathBuf, String> {
    path_with_ext(s, ".fix")
}

pub fn csv_path(s: &str) -> Result<PathBuf, String> {
    path_with_ext(s, ".csv")
}
