use crate::error::{Result, StoreError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "cwlog";

pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("XDG_DATA_HOME") {
        let path = PathBuf::from(dir);
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidDataPath(path));
        }
        return Ok(path.join(APP_DIR));
    }

    let home = dirs::home_dir().ok_or(StoreError::MissingHomeDir)?;
    Ok(home.join(".local").join("share").join(APP_DIR))
}

/// Picks `custom` when given, otherwise the default data directory.
pub fn resolve_data_dir(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) if path.as_os_str().is_empty() => Err(StoreError::InvalidDataPath(path)),
        Some(path) => Ok(path),
        None => data_dir(),
    }
}

/// Creates `dir` owner-only. A directory that already exists keeps its
/// permissions.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;
    restrict_dir_permissions(dir)
}

#[cfg(unix)]
fn restrict_dir_permissions(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perms = fs::Permissions::from_mode(0o700);
    fs::set_permissions(dir, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_dir_permissions(_dir: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_dir, resolve_data_dir};
    use crate::error::StoreErrorKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn explicit_dir_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/cwlog-test"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/cwlog-test"));
    }

    #[test]
    fn empty_explicit_dir_is_rejected() {
        let err = resolve_data_dir(Some(PathBuf::new())).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::InvalidDataPath);
    }

    #[test]
    fn ensure_dir_creates_nested_dirs() {
        let temp = TempDir::new().expect("tempdir");
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).expect("ensure");
        assert!(nested.is_dir());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&nested).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }

    #[cfg(unix)]
    #[test]
    fn ensure_dir_leaves_existing_dir_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let shared = temp.path().join("shared");
        std::fs::create_dir(&shared).expect("mkdir");
        std::fs::set_permissions(&shared, std::fs::Permissions::from_mode(0o755))
            .expect("chmod");

        ensure_dir(&shared).expect("ensure");
        let mode = std::fs::metadata(&shared).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
