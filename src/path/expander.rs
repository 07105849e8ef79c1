use crate::error::ShellError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.len() == 1 {
            // Just "~"
            dirs::home_dir().ok_or(ShellError::HomeDirNotFound)
        } else if let Some(stripped) = path[1..].strip_prefix('/') {
            // "~/path"
            let mut home_path = dirs::home_dir().ok_or(ShellError::HomeDirNotFound)?;
            for part in stripped.split('/') {
                if !part.is_empty() {
                    home_path.push(part);
                }
            }
            Ok(home_path)
        } else {
            // "~username/path" is not supported; pass it through untouched
            Ok(Path::new(path).to_path_buf())
        }
    }

    pub fn home_dir(&self) -> Result<PathBuf, ShellError> {
        dirs::home_dir().ok_or(ShellError::HomeDirNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_pass_through() {
        let expander = PathExpander::new();
        let expanded = expander.expand("/usr/bin").expect("expand plain path");
        assert_eq!(expanded, PathBuf::from("/usr/bin"));
    }

    #[test]
    fn bare_tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return; // no home in this environment, nothing to check
        };
        let expander = PathExpander::new();
        assert_eq!(expander.expand("~").expect("expand ~"), home);
    }

    #[test]
    fn tilde_slash_prefix_expands_under_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let expander = PathExpander::new();
        let expanded = expander.expand("~/a/b").expect("expand ~/a/b");
        assert_eq!(expanded, home.join("a").join("b"));
    }

    #[test]
    fn tilde_username_is_left_untouched() {
        let expander = PathExpander::new();
        let expanded = expander.expand("~someone/x").expect("expand ~someone/x");
        assert_eq!(expanded, PathBuf::from("~someone/x"));
    }
}
