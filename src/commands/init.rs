use anyhow::Result;

use super::Project;
use crate::config::{Overrides, ProjectConfig};
use crate::discover;
use crate::formats::{self, Format};

/// Write a fresh config file into the project root.
///
/// With `--config` the file's extension decides the format, and an explicit
/// `--format` has to agree with it.
pub fn run(
    project: &Project,
    format: Option<Format>,
    overrides: Overrides,
    force: bool,
) -> Result<()> {
    let path = match &project.config {
        Some(path) => {
            let path = project.root.join(path);
            let from_path = Format::from_path(&path)?;
            if let Some(format) = format.filter(|f| *f != from_path) {
                anyhow::bail!(
                    "--format {} does not match {} (a {} file)",
                    format,
                    path.display(),
                    from_path
                );
            }
            path
        }
        None => project
            .root
            .join(discover::file_name_for(format.unwrap_or(Format::Toml))),
    };

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let root = discover::config_root(Some(&path), &project.root);
    let mut config = ProjectConfig::default();
    config.apply(overrides.relative_to(&root));

    formats::write_file(&path, &config)?;
    println!("Wrote {}", path.display());
    println!("  static_dir = {}", config.app.static_dir);
    println!("  index_file = {}", config.app.index_file);

    Ok(())
}
