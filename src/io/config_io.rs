use std::fs;
use std::path::{Path, PathBuf};

use crate::io::table_io::LoadError;
use crate::model::config::EditorConfig;

pub const CONFIG_FILE: &str = "mgrid.toml";

/// Find `mgrid.toml` by walking up from the given directory
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read and parse a config file
pub fn read_config(path: &Path) -> Result<EditorConfig, LoadError> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| LoadError::ConfigParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the explicit config if given, else the discovered one, else defaults
pub fn load_config(explicit: Option<&Path>, start: &Path) -> Result<EditorConfig, LoadError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match discover_config(start) {
            Some(p) => p,
            None => {
                log::debug!("no {CONFIG_FILE} above {}, using defaults", start.display());
                return Ok(EditorConfig::default());
            }
        },
    };
    log::debug!("using config {}", path.display());
    read_config(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn discover_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
        let sub = tmp.path().join("surveys/2024");
        fs::create_dir_all(&sub).unwrap();

        assert_eq!(discover_config(&sub), Some(tmp.path().join(CONFIG_FILE)));
    }

    #[test]
    fn defaults_when_nothing_found() {
        let tmp = TempDir::new().unwrap();
        // The temp dir may sit under a directory with its own config; only
        // assert on the explicit-path branch for that case.
        if discover_config(tmp.path()).is_none() {
            let config = load_config(None, tmp.path()).unwrap();
            assert!(config.table.propagate_on_keystroke);
        }
    }

    #[test]
    fn explicit_path_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[table]\nkey_column = \"site\"\n").unwrap();
        let other = tmp.path().join("other.toml");
        fs::write(&other, "[table]\nkey_column = \"name\"\n").unwrap();

        let config = load_config(Some(&other), tmp.path()).unwrap();
        assert_eq!(config.table.key_column.as_deref(), Some("name"));
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.table.key_column.as_deref(), Some("site"));
    }

    #[test]
    fn bad_config_is_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "[table]\ndate_columns = 3\n").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, LoadError::ConfigParseError { .. }));
    }
}
