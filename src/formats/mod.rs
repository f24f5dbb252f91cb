//! On-disk formats for the configuration file.
//!
//! Each `Format` knows how to read its text into a `ProjectConfig` and how to
//! write one back out. The format of a file is decided by its extension alone.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;

use crate::config::ProjectConfig;

mod js_module;

/// A supported config file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Format {
    /// `Dioxus.toml` style, with an `[app]` table
    Toml,
    /// A plain JSON object
    Json,
    /// A CommonJS or ES module exporting an object literal
    Js,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Js => "js",
        }
    }

    /// Pick the format from a file's extension.
    pub fn from_path(path: &Path) -> Result<Format> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .with_context(|| format!("{} has no file extension", path.display()))?;

        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "js" | "cjs" | "mjs" => Ok(Self::Js),
            other => anyhow::bail!(
                "Unsupported config format '.{}' for {} (expected .toml, .json or .js)",
                other,
                path.display()
            ),
        }
    }

    pub fn parse(&self, text: &str) -> Result<ProjectConfig> {
        match self {
            Self::Toml => toml::from_str(text).context("Failed to parse TOML config"),
            Self::Json => serde_json::from_str(text).context("Failed to parse JSON config"),
            Self::Js => {
                let json = js_module::to_json(text)?;
                serde_json::from_str(&json).context("Failed to read JS config object")
            }
        }
    }

    pub fn render(&self, config: &ProjectConfig) -> Result<String> {
        match self {
            Self::Toml => toml::to_string_pretty(config).context("Failed to render TOML config"),
            Self::Json => {
                let mut out = serde_json::to_string_pretty(config)
                    .context("Failed to render JSON config")?;
                out.push('\n');
                Ok(out)
            }
            Self::Js => js_module::render(config),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read and parse a config file, picking the format from its extension.
pub fn read_file(path: &Path) -> Result<ProjectConfig> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    format
        .parse(&text)
        .with_context(|| format!("Invalid config in {}", path.display()))
}

/// Render and write a config file, picking the format from its extension.
pub fn write_file(path: &Path, config: &ProjectConfig) -> Result<()> {
    let format = Format::from_path(path)?;
    let text = format.render(config)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppAssets;
    use serde_json::json;
    use std::path::PathBuf;

    fn sample() -> ProjectConfig {
        let mut config = ProjectConfig {
            app: AppAssets {
                static_dir: "assets".into(),
                index_file: "app.html".into(),
                ..AppAssets::default()
            },
            ..ProjectConfig::default()
        };
        config
            .app
            .extra
            .insert("base_path".into(), json!("/calc"));
        config
            .extra
            .insert("features".into(), json!({ "web": true, "desktop": false }));
        config.extra.insert("plugins".into(), json!(["tailwind"]));
        config
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("Dioxus.toml")).unwrap(), Format::Toml);
        assert_eq!(
            Format::from_path(Path::new("dioxus.config.JSON")).unwrap(),
            Format::Json
        );
        assert_eq!(
            Format::from_path(Path::new("conf/dioxus.config.mjs")).unwrap(),
            Format::Js
        );
        assert!(Format::from_path(Path::new("dioxus.yaml")).is_err());
        assert!(Format::from_path(Path::new("Makefile")).is_err());
    }

    #[test]
    fn test_every_format_reads_back_what_it_wrote() {
        let config = sample();
        for format in [Format::Toml, Format::Json, Format::Js] {
            let text = format.render(&config).unwrap();
            let parsed = format.parse(&text).unwrap();
            assert_eq!(parsed, config, "format {} lost data:\n{}", format, text);
        }
    }

    #[test]
    fn test_parse_toml() {
        let config = Format::Toml
            .parse(
                r#"
[app]
static_dir = "public"
index_file = "index.html"

[bundle]
identifier = "com.example.calc"
"#,
            )
            .unwrap();
        assert_eq!(config.app, AppAssets::default());
        assert_eq!(config.extra["bundle"]["identifier"], json!("com.example.calc"));
    }

    #[test]
    fn test_toml_cannot_hold_null() {
        let mut config = ProjectConfig::default();
        config.extra.insert("plugin".into(), json!(null));
        assert!(Format::Toml.render(&config).is_err());
        assert!(Format::Json.render(&config).is_ok());
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let err = Format::Json
            .parse(r#"{ "app": { "index_file": ["index.html"] } }"#)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("JSON"));
    }

    #[test]
    fn test_read_and_write_file() {
        let dir = std::env::temp_dir().join("dxconf-formats-file");
        let _ = std::fs::remove_dir_all(&dir);
        let path: PathBuf = dir.join("nested").join("dioxus.config.json");

        write_file(&path, &sample()).unwrap();
        assert_eq!(read_file(&path).unwrap(), sample());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
