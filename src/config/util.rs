//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// Returns the path to the config file if found.
///
/// # Example
/// ```text
/// /home/user/plugin/src/components/  ← start
/// /home/user/plugin/figpack.toml     ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("src/components");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("figpack.toml"), "").unwrap();

        let found = find_config_file(&nested, Path::new("figpack.toml"));
        assert_eq!(found, Some(temp.path().join("figpack.toml")));
    }

    #[test]
    fn test_find_config_absolute() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "").unwrap();

        assert_eq!(find_config_file(Path::new("/"), &path), Some(path.clone()));
        assert_eq!(
            find_config_file(Path::new("/"), &temp.path().join("missing.toml")),
            None
        );
    }

    #[test]
    fn test_find_config_ignores_directories() {
        let temp = TempDir::new().unwrap();
        let inner = temp.path().join("inner");
        std::fs::create_dir_all(inner.join("figpack-dir-only.toml")).unwrap();

        let found = find_config_file(&inner, Path::new("figpack-dir-only.toml"));
        assert_ne!(found, Some(inner.join("figpack-dir-only.toml")));
    }
}
