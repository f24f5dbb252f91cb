use anyhow::Result;

use super::Project;
use crate::config::Overrides;
use crate::discover;
use crate::formats::Format;

/// Print the resolved config: defaults, then the file, then overrides.
pub fn run(project: &Project, format: Format, overrides: Overrides) -> Result<()> {
    let loaded = discover::load(&project.root, project.config.as_deref())?;
    let root = loaded.root(&project.root);
    let mut config = loaded.config;
    config.apply(overrides.relative_to(&root));

    match &loaded.source {
        Some(path) => eprintln!("# from {}", path.display()),
        None => eprintln!("# no config file found, using defaults"),
    }
    print!("{}", format.render(&config)?);

    Ok(())
}
