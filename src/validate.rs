//! Checks on a loaded config.
//!
//! Loading only guarantees both fields are strings. These checks catch values
//! that parse fine but would break a build.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single finding about the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    StaticDirEmpty,
    IndexFileEmpty,
    /// `index_file` is a file name, not a path
    IndexFileHasDirectory(String),
    IndexFileNotHtml(String),
    StaticDirAbsolute(String),
    StaticDirMissing(PathBuf),
    StaticDirNotADirectory(PathBuf),
    /// Looked for in each of the listed locations
    IndexFileMissing(String, Vec<PathBuf>),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::IndexFileHasDirectory(_)
            | Self::IndexFileNotHtml(_)
            | Self::StaticDirAbsolute(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaticDirEmpty => write!(f, "app.static_dir is empty"),
            Self::IndexFileEmpty => write!(f, "app.index_file is empty"),
            Self::IndexFileHasDirectory(name) => write!(
                f,
                "app.index_file '{}' contains a directory; expected a file name",
                name
            ),
            Self::IndexFileNotHtml(name) => {
                write!(f, "app.index_file '{}' is not an .html file", name)
            }
            Self::StaticDirAbsolute(dir) => write!(
                f,
                "app.static_dir '{}' is absolute; the build will not be portable",
                dir
            ),
            Self::StaticDirMissing(path) => {
                write!(f, "static directory {} does not exist", path.display())
            }
            Self::StaticDirNotADirectory(path) => {
                write!(f, "static directory {} is not a directory", path.display())
            }
            Self::IndexFileMissing(name, searched) => {
                let searched: Vec<String> =
                    searched.iter().map(|p| p.display().to_string()).collect();
                write!(
                    f,
                    "index file '{}' not found (looked in {})",
                    name,
                    searched.join(", ")
                )
            }
        }
    }
}

/// Checks that need nothing but the config itself.
pub fn validate(config: &ProjectConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    let app = &config.app;

    if app.static_dir.trim().is_empty() {
        issues.push(Issue::StaticDirEmpty);
    } else if Path::new(&app.static_dir).is_absolute() {
        issues.push(Issue::StaticDirAbsolute(app.static_dir.clone()));
    }

    if app.index_file.trim().is_empty() {
        issues.push(Issue::IndexFileEmpty);
    } else {
        if app.index_file.contains(['/', '\\']) {
            issues.push(Issue::IndexFileHasDirectory(app.index_file.clone()));
        }
        let is_html = Path::new(&app.index_file)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"));
        if !is_html {
            issues.push(Issue::IndexFileNotHtml(app.index_file.clone()));
        }
    }

    issues
}

/// Checks against the project directory. Fields that are empty are skipped,
/// `validate` already reports them.
pub fn check_paths(config: &ProjectConfig, root: &Path) -> Vec<Issue> {
    let mut issues = Vec::new();
    let app = &config.app;

    let static_dir = if app.static_dir.trim().is_empty() {
        None
    } else {
        let path = app.static_dir_path(root);
        if !path.exists() {
            issues.push(Issue::StaticDirMissing(path));
            None
        } else if !path.is_dir() {
            issues.push(Issue::StaticDirNotADirectory(path));
            None
        } else {
            Some(path)
        }
    };

    if !app.index_file.trim().is_empty() {
        let mut searched = vec![root.to_path_buf()];
        searched.extend(static_dir);
        if !searched.iter().any(|dir| dir.join(&app.index_file).is_file()) {
            issues.push(Issue::IndexFileMissing(app.index_file.clone(), searched));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overrides;

    fn with(static_dir: &str, index_file: &str) -> ProjectConfig {
        let mut config = ProjectConfig::default();
        config.apply(Overrides {
            static_dir: Some(static_dir.into()),
            index_file: Some(index_file.into()),
        });
        config
    }

    #[test]
    fn test_defaults_are_clean() {
        assert!(validate(&ProjectConfig::default()).is_empty());
    }

    #[test]
    fn test_empty_fields_are_errors() {
        let issues = validate(&with("", "index.html"));
        assert_eq!(issues, vec![Issue::StaticDirEmpty]);

        let issues = validate(&with("public", "  "));
        assert_eq!(issues, vec![Issue::IndexFileEmpty]);
        assert_eq!(issues[0].severity(), Severity::Error);
    }

    #[test]
    fn test_warnings() {
        let issues = validate(&with("public", "pages/main.txt"));
        assert_eq!(
            issues,
            vec![
                Issue::IndexFileHasDirectory("pages/main.txt".into()),
                Issue::IndexFileNotHtml("pages/main.txt".into()),
            ]
        );
        assert!(issues.iter().all(|i| i.severity() == Severity::Warning));
        assert!(validate(&with("public", "INDEX.HTM")).is_empty());
    }

    #[test]
    fn test_check_paths() {
        let root = std::env::temp_dir().join("dxconf-validate-paths");
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("public")).unwrap();
        std::fs::write(root.join("assets"), "not a dir").unwrap();

        // index.html is nowhere yet
        let issues = check_paths(&ProjectConfig::default(), &root);
        assert_eq!(
            issues,
            vec![Issue::IndexFileMissing(
                "index.html".into(),
                vec![root.clone(), root.join("public")]
            )]
        );

        // found inside static_dir
        std::fs::write(root.join("public/index.html"), "<html></html>").unwrap();
        assert!(check_paths(&ProjectConfig::default(), &root).is_empty());

        let issues = check_paths(&with("assets", "index.html"), &root);
        assert_eq!(
            issues[0],
            Issue::StaticDirNotADirectory(root.join("assets"))
        );

        let issues = check_paths(&with("missing", ""), &root);
        assert_eq!(issues, vec![Issue::StaticDirMissing(root.join("missing"))]);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_index_file_in_root_is_enough() {
        let root = std::env::temp_dir().join("dxconf-validate-root-index");
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("public")).unwrap();
        std::fs::write(root.join("index.html"), "<html></html>").unwrap();

        assert!(check_paths(&ProjectConfig::default(), &root).is_empty());

        std::fs::remove_dir_all(&root).unwrap();
    }
}
