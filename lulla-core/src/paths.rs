// lulla-core/src/paths.rs

//! Small filesystem helpers shared by every utility.

use glob::Pattern;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub fn is_file(location: impl AsRef<Path>) -> bool {
    location.as_ref().is_file()
}

pub fn is_dir(location: impl AsRef<Path>) -> bool {
    location.as_ref().is_dir()
}

pub fn combine(first: impl AsRef<Path>, second: impl AsRef<Path>) -> PathBuf {
    first.as_ref().join(second)
}

/// Resolves a relative path against the current directory without touching
/// symlinks. Falls back to the path as given if the current directory is gone.
pub fn absolute(location: impl AsRef<Path>) -> PathBuf {
    let location = location.as_ref();
    if location.is_absolute() {
        return location.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(location),
        Err(e) => {
            warn!(path = %location.display(), error = %e, "Could not read current directory");
            location.to_path_buf()
        }
    }
}

/// `<directory>/<name>.<extension>`
pub fn file_path(directory: impl AsRef<Path>, name: &str, extension: &str) -> PathBuf {
    combine(directory, format!("{}.{}", name, extension))
}

/// The containing directory of a file, the directory itself, or `None` when
/// the path does not exist.
pub fn directory_of(location: impl AsRef<Path>) -> Option<PathBuf> {
    let location = location.as_ref();
    if location.is_file() {
        return Some(match location.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        });
    }
    if location.is_dir() {
        return Some(location.to_path_buf());
    }
    None
}

/// Lazily matches `pattern` relative to `root`.
///
/// The root is taken literally, so brackets or stars in a directory name do not
/// turn into wildcards. Entries that cannot be read are skipped.
pub fn glob(root: impl AsRef<Path>, pattern: &str) -> impl Iterator<Item = PathBuf> {
    let root = root.as_ref();
    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let full_pattern = Path::new(&escaped_root).join(pattern);
    let full_pattern = full_pattern.to_string_lossy().into_owned();
    debug!("Globbing {}", full_pattern);

    let paths = match glob::glob(&full_pattern) {
        Ok(paths) => Some(paths),
        Err(e) => {
            warn!(pattern = %full_pattern, error = %e, "Invalid glob pattern");
            None
        }
    };

    paths.into_iter().flatten().filter_map(|entry| match entry {
        Ok(path) => Some(path),
        Err(e) => {
            debug!(error = %e, "Skipping unreadable glob entry");
            None
        }
    })
}

/// [`glob`] rooted at the current working directory.
pub fn glob_cwd(pattern: &str) -> impl Iterator<Item = PathBuf> {
    let root = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    glob(root, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_directory_of_file_dir_and_missing() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Game.sln");
        fs::write(&file, "").unwrap();

        assert_eq!(directory_of(&file), Some(dir.path().to_path_buf()));
        assert_eq!(directory_of(dir.path()), Some(dir.path().to_path_buf()));
        assert_eq!(directory_of(dir.path().join("missing.sln")), None);
    }

    #[test]
    fn test_file_path_and_combine() {
        assert_eq!(
            file_path("bin/Debug", "Lib", "dll"),
            Path::new("bin/Debug").join("Lib.dll")
        );
        assert_eq!(combine("a", "b"), Path::new("a").join("b"));
    }

    #[test]
    fn test_absolute_keeps_absolute_paths() {
        let dir = tempdir().unwrap();
        assert_eq!(absolute(dir.path()), dir.path().to_path_buf());

        let relative = absolute("results.xml");
        assert!(relative.is_absolute());
        assert!(relative.ends_with("results.xml"));
    }

    #[test]
    fn test_existence_checks() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        assert!(is_file(&file));
        assert!(!is_dir(&file));
        assert!(is_dir(dir.path()));
        assert!(!is_file(dir.path()));
    }

    #[test]
    fn test_glob_is_non_recursive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("TestResults-1.xml"), "").unwrap();
        fs::write(dir.path().join("other.xml"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/TestResults-2.xml"), "").unwrap();

        let found: Vec<PathBuf> = glob(dir.path(), "TestResults-*.xml").collect();
        assert_eq!(found, vec![dir.path().join("TestResults-1.xml")]);
    }

    #[test]
    fn test_glob_cwd_restarts_on_each_call() {
        // Tests run from the crate directory.
        let first: Vec<PathBuf> = glob_cwd("Cargo.toml").collect();
        let second: Vec<PathBuf> = glob_cwd("Cargo.toml").collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert!(first[0].is_absolute());
    }

    #[test]
    fn test_glob_escapes_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("[weird]");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.dll"), "").unwrap();

        let found: Vec<PathBuf> = glob(&root, "*.dll").collect();
        assert_eq!(found, vec![root.join("a.dll")]);
    }

    #[test]
    fn test_glob_can_be_restarted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.dll"), "").unwrap();
        assert_eq!(glob(dir.path(), "*.dll").count(), 1);
        assert_eq!(glob(dir.path(), "*.dll").count(), 1);
    }
}
