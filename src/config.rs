use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Default directory for static assets, relative to the project root.
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Default entry HTML file.
pub const DEFAULT_INDEX_FILE: &str = "index.html";

/// The whole configuration file.
///
/// Only `app` is interpreted. Every other top-level key is carried through
/// untouched in `extra`, in the order it was read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub app: AppAssets,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Where the static assets and the HTML entry point live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppAssets {
    /// Directory containing styles, images, etc. copied verbatim into the build.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// HTML file that bootstraps the application.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AppAssets {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            index_file: default_index_file(),
            extra: Map::new(),
        }
    }
}

fn default_static_dir() -> String {
    DEFAULT_STATIC_DIR.into()
}

fn default_index_file() -> String {
    DEFAULT_INDEX_FILE.into()
}

impl AppAssets {
    /// `static_dir` resolved against the project root.
    pub fn static_dir_path(&self, root: &Path) -> PathBuf {
        root.join(&self.static_dir)
    }
}

/// Field replacements coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub static_dir: Option<String>,
    pub index_file: Option<String>,
}

impl Overrides {
    /// Rewrite an absolute `static_dir` that points inside `root` as a path
    /// relative to it. Paths outside the root are left alone.
    pub fn relative_to(mut self, root: &Path) -> Self {
        if let Some(dir) = &self.static_dir {
            let path = Path::new(dir);
            if path.is_absolute() {
                let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
                if path.starts_with(&root) {
                    if let Some(rel) = pathdiff::diff_paths(path, &root) {
                        let rel = rel.to_string_lossy().into_owned();
                        self.static_dir = Some(if rel.is_empty() { ".".into() } else { rel });
                    }
                }
            }
        }
        self
    }
}

impl ProjectConfig {
    /// Replace only the fields that are set in `overrides`.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(static_dir) = overrides.static_dir {
            self.app.static_dir = static_dir;
        }
        if let Some(index_file) = overrides.index_file {
            self.app.index_file = index_file;
        }
    }
}
