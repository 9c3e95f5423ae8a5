use crate::archive::ArchiveError;
use std::path::{Path, PathBuf};

/// Where payloads and staged archives go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Directory receiving extracted payloads
    pub output_folder: PathBuf,

    /// Directory archives are downloaded into
    pub staging_dir: PathBuf,

    /// Remove staged archives once they have been processed
    pub discard_archives: bool,
}

impl OutputLayout {
    /// Builds the layout relative to the process working directory
    pub fn new(output_folder: &str, discard_archives: bool) -> Result<Self, ArchiveError> {
        let cwd = std::env::current_dir().map_err(|e| ArchiveError::io(".", e))?;
        Ok(Self::with_cwd(output_folder, discard_archives, &cwd))
    }

    /// Builds the layout relative to `cwd`
    ///
    /// Archives are staged in the shared temp directory when they are to be
    /// discarded, and under `<output>/zip/` when they are kept.
    pub fn with_cwd(output_folder: &str, discard_archives: bool, cwd: &Path) -> Self {
        let output_folder = resolve_output_folder(output_folder, cwd);
        let staging_dir = if discard_archives {
            std::env::temp_dir()
        } else {
            output_folder.join("zip")
        };

        Self {
            output_folder,
            staging_dir,
            discard_archives,
        }
    }

    /// Creates the staging directory if it does not exist yet
    pub fn prepare(&self) -> Result<(), ArchiveError> {
        std::fs::create_dir_all(&self.staging_dir)
            .map_err(|e| ArchiveError::io(&self.staging_dir, e))
    }
}

/// Resolves the configured output folder against `cwd`
///
/// `"./"` becomes `cwd` itself and `"./rest"` becomes `cwd/rest`. Any other
/// value is used unchanged.
pub fn resolve_output_folder(output_folder: &str, cwd: &Path) -> PathBuf {
    if output_folder == "./" {
        return cwd.to_path_buf();
    }

    match output_folder.strip_prefix("./") {
        Some(rest) => cwd.join(rest),
        None => PathBuf::from(output_folder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_current_dir_marker() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_output_folder("./", cwd), PathBuf::from("/work"));
    }

    #[test]
    fn test_dot_relative_folder() {
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_output_folder("./acm/out", cwd),
            PathBuf::from("/work/acm/out")
        );
    }

    #[test]
    fn test_other_folders_unchanged() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_output_folder("/srv/acm", cwd), PathBuf::from("/srv/acm"));
        assert_eq!(resolve_output_folder("acm", cwd), PathBuf::from("acm"));
    }

    #[test]
    fn test_kept_archives_stage_under_output() {
        let layout = OutputLayout::with_cwd("./out", false, Path::new("/work"));
        assert_eq!(layout.output_folder, PathBuf::from("/work/out"));
        assert_eq!(layout.staging_dir, PathBuf::from("/work/out/zip"));
        assert!(!layout.discard_archives);
    }

    #[test]
    fn test_discarded_archives_stage_in_temp() {
        let layout = OutputLayout::with_cwd("./out", true, Path::new("/work"));
        assert_eq!(layout.staging_dir, std::env::temp_dir());
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let layout = OutputLayout::with_cwd(temp.path().to_str().unwrap(), false, temp.path());

        layout.prepare().unwrap();
        layout.prepare().unwrap();
        assert!(temp.path().join("zip").is_dir());
    }
}
