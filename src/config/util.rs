//! Configuration utility functions.

use std::path::{Path, PathBuf};

use url::Url;

/// Parse an absolute `http`/`https` URL.
///
/// # Examples
/// ```ignore
/// parse_http_url("https://example.org/site/") -> Some(..)
/// parse_http_url("ftp://example.org")         -> None
/// parse_http_url("example.org")               -> None
/// ```
pub fn parse_http_url(url_str: &str) -> Option<Url> {
    let parsed = Url::parse(url_str).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(parsed)
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/content/        ← cwd
/// /home/user/site/canopy.toml     ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }
    find_config_file_from(&std::env::current_dir().ok()?, config_name)
}

/// Walk up from `start` looking for `config_name`.
fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_http_url() {
        assert!(parse_http_url("https://example.org/site/").is_some());
        assert!(parse_http_url("http://localhost:8080").is_some());
        assert!(parse_http_url("ftp://example.org").is_none());
        assert!(parse_http_url("example.org").is_none());
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("content").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("canopy.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("canopy.toml")).unwrap();
        assert_eq!(found, dir.path().join("canopy.toml"));
    }

    #[test]
    fn test_find_config_file_missing() {
        let dir = TempDir::new().unwrap();
        assert!(find_config_file_from(dir.path(), Path::new("no-such-config.toml")).is_none());
        assert!(find_config_file(&dir.path().join("absent.toml")).is_none());
    }
}
