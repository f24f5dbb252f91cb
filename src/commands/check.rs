use anyhow::Result;

use super::Project;
use crate::config::Overrides;
use crate::discover;
use crate::validate::{self, Severity};

pub fn run(project: &Project, overrides: Overrides, filesystem: bool, strict: bool) -> Result<()> {
    let loaded = discover::load(&project.root, project.config.as_deref())?;
    let root = loaded.root(&project.root);
    let mut config = loaded.config;
    config.apply(overrides.relative_to(&root));

    match &loaded.source {
        Some(path) => println!("Checking {}", path.display()),
        None => println!("Checking defaults (no config file found)"),
    }

    let mut issues = validate::validate(&config);
    if filesystem {
        issues.extend(validate::check_paths(&config, &root));
    }

    for issue in &issues {
        eprintln!("  {}: {}", issue.severity(), issue);
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warnings = issues.len() - errors;

    if errors > 0 || (strict && warnings > 0) {
        anyhow::bail!(
            "config check failed with {} error(s) and {} warning(s)",
            errors,
            warnings
        );
    }

    println!(
        "Config OK: static_dir = {}, index_file = {} ({} warning(s))",
        config.app.static_dir, config.app.index_file, warnings
    );
    Ok(())
}
