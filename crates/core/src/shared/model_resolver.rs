use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{EYE_CASCADE_NAME, FACE_CASCADE_NAME, SYSTEM_CASCADE_DIRS};

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("cascade file {name} not found (searched: {searched})")]
    NotFound { name: String, searched: SearchList },
}

/// Directories that were checked for a missing file, for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchList(pub Vec<PathBuf>);

impl fmt::Display for SearchList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dirs: Vec<String> = self.0.iter().map(|d| d.display().to_string()).collect();
        write!(f, "{}", dirs.join(", "))
    }
}

/// Paths of the two classifier models loaded at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadePaths {
    pub face: PathBuf,
    pub eye: PathBuf,
}

/// Resolve a cascade file by name.
///
/// Resolution order:
/// 1. `primary_dir` (the features directory)
/// 2. Each of `fallback_dirs`, in order
pub fn resolve(
    name: &str,
    primary_dir: &Path,
    fallback_dirs: &[PathBuf],
) -> Result<PathBuf, ModelResolveError> {
    let mut searched = Vec::with_capacity(fallback_dirs.len() + 1);
    for dir in std::iter::once(primary_dir).chain(fallback_dirs.iter().map(PathBuf::as_path)) {
        let candidate = dir.join(name);
        if candidate.is_file() {
            log::debug!("Resolved {name} to {}", candidate.display());
            return Ok(candidate);
        }
        searched.push(dir.to_path_buf());
    }
    Err(ModelResolveError::NotFound {
        name: name.to_string(),
        searched: SearchList(searched),
    })
}

/// Resolves both the face and eye cascades, checking OpenCV's install
/// locations after `features_dir`.
pub fn resolve_cascades(features_dir: &Path) -> Result<CascadePaths, ModelResolveError> {
    let fallbacks = system_cascade_dirs();
    Ok(CascadePaths {
        face: resolve(FACE_CASCADE_NAME, features_dir, &fallbacks)?,
        eye: resolve(EYE_CASCADE_NAME, features_dir, &fallbacks)?,
    })
}

pub fn system_cascade_dirs() -> Vec<PathBuf> {
    SYSTEM_CASCADE_DIRS.iter().map(PathBuf::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_finds_file_in_primary_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cascade.xml");
        fs::write(&path, b"<opencv_storage/>").unwrap();

        let resolved = resolve("cascade.xml", tmp.path(), &[]).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn test_resolve_prefers_primary_over_fallback() {
        let primary = TempDir::new().unwrap();
        let fallback = TempDir::new().unwrap();
        fs::write(primary.path().join("cascade.xml"), b"primary").unwrap();
        fs::write(fallback.path().join("cascade.xml"), b"fallback").unwrap();

        let resolved = resolve(
            "cascade.xml",
            primary.path(),
            &[fallback.path().to_path_buf()],
        )
        .unwrap();
        assert_eq!(fs::read(resolved).unwrap(), b"primary");
    }

    #[test]
    fn test_resolve_falls_back_in_order() {
        let primary = TempDir::new().unwrap();
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(second.path().join("cascade.xml"), b"second").unwrap();

        let resolved = resolve(
            "cascade.xml",
            primary.path(),
            &[first.path().to_path_buf(), second.path().to_path_buf()],
        )
        .unwrap();
        assert_eq!(resolved, second.path().join("cascade.xml"));
    }

    #[test]
    fn test_resolve_ignores_directories_with_the_same_name() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("cascade.xml")).unwrap();

        let result = resolve("cascade.xml", tmp.path(), &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_not_found_lists_searched_dirs() {
        let primary = TempDir::new().unwrap();
        let fallback = TempDir::new().unwrap();

        let err = resolve(
            "missing.xml",
            primary.path(),
            &[fallback.path().to_path_buf()],
        )
        .unwrap_err();

        let ModelResolveError::NotFound { name, searched } = &err;
        assert_eq!(name, "missing.xml");
        assert_eq!(searched.0.len(), 2);
        let message = err.to_string();
        assert!(message.contains("missing.xml"));
        assert!(message.contains(&primary.path().display().to_string()));
        assert!(message.contains(&fallback.path().display().to_string()));
    }

    #[test]
    fn test_resolve_cascades_from_features_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(FACE_CASCADE_NAME), b"face").unwrap();
        fs::write(tmp.path().join(EYE_CASCADE_NAME), b"eye").unwrap();

        let paths = resolve_cascades(tmp.path()).unwrap();
        assert_eq!(paths.face, tmp.path().join(FACE_CASCADE_NAME));
        assert_eq!(paths.eye, tmp.path().join(EYE_CASCADE_NAME));
    }

    #[test]
    fn test_system_dirs_include_opencv4() {
        let dirs = system_cascade_dirs();
        assert!(dirs
            .iter()
            .any(|d| d.to_string_lossy().contains("opencv4/haarcascades")));
    }
}
