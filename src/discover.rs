use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::formats::{self, Format};

/// Config file names looked for in the project root, most preferred first.
pub const CANDIDATES: &[(&str, Format)] = &[
    ("Dioxus.toml", Format::Toml),
    ("dioxus.config.toml", Format::Toml),
    ("dioxus.config.json", Format::Json),
    ("dioxus.config.js", Format::Js),
];

/// The file name `init` writes for a format.
pub fn file_name_for(format: Format) -> &'static str {
    CANDIDATES
        .iter()
        .find(|(_, f)| *f == format)
        .map(|(name, _)| *name)
        .unwrap_or("Dioxus.toml")
}

/// First candidate that exists in `root`.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|(name, _)| root.join(name))
        .find(|path| path.is_file())
}

/// A config together with where it came from.
#[derive(Debug)]
pub struct Loaded {
    pub config: ProjectConfig,
    /// `None` when no file was found and defaults are in use.
    pub source: Option<PathBuf>,
}

impl Loaded {
    /// Directory the config's paths are relative to: the one holding the
    /// config file, or `fallback` when running on defaults.
    pub fn root(&self, fallback: &Path) -> PathBuf {
        config_root(self.source.as_deref(), fallback)
    }
}

/// The directory holding `config`, or `fallback` when there is no file.
pub fn config_root(config: Option<&Path>, fallback: &Path) -> PathBuf {
    config
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(fallback)
        .to_path_buf()
}

/// Load the config for a project.
///
/// An explicit path always wins (relative paths are taken from `root`).
/// Otherwise the first discovered candidate is read, and with no file at all
/// the defaults are returned.
pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Loaded> {
    let path = match explicit {
        Some(path) => Some(root.join(path)),
        None => find_config(root),
    };

    match path {
        Some(path) => Ok(Loaded {
            config: formats::read_file(&path)?,
            source: Some(path),
        }),
        None => Ok(Loaded {
            config: ProjectConfig::default(),
            source: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dxconf-discover-{}", name));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_no_file_means_defaults() {
        let dir = scratch("empty");
        let loaded = load(&dir, None).unwrap();
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config, ProjectConfig::default());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_toml_preferred_over_js() {
        let dir = scratch("priority");
        std::fs::write(
            dir.join("dioxus.config.js"),
            "module.exports = { app: { static_dir: 'from-js' } };",
        )
        .unwrap();
        std::fs::write(dir.join("Dioxus.toml"), "[app]\nstatic_dir = \"from-toml\"\n").unwrap();

        assert_eq!(find_config(&dir).unwrap(), dir.join("Dioxus.toml"));
        let loaded = load(&dir, None).unwrap();
        assert_eq!(loaded.config.app.static_dir, "from-toml");

        let loaded = load(&dir, Some(Path::new("dioxus.config.js"))).unwrap();
        assert_eq!(loaded.config.app.static_dir, "from-js");
        assert_eq!(loaded.source.unwrap(), dir.join("dioxus.config.js"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = scratch("missing");
        let err = load(&dir, Some(Path::new("nope.json"))).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.json"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_names_for_formats() {
        assert_eq!(file_name_for(Format::Toml), "Dioxus.toml");
        assert_eq!(file_name_for(Format::Json), "dioxus.config.json");
        assert_eq!(file_name_for(Format::Js), "dioxus.config.js");
    }

    #[test]
    fn test_root_follows_the_config_file() {
        let project = Path::new("proj");
        assert_eq!(
            config_root(Some(Path::new("proj/sub/dioxus.config.json")), project),
            PathBuf::from("proj/sub")
        );
        assert_eq!(config_root(Some(Path::new("Dioxus.toml")), project), project);
        assert_eq!(config_root(None, project), project);
    }
}
