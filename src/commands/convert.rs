use anyhow::Result;
use std::path::Path;

use super::Project;
use crate::formats::{self, Format};

/// Re-render a config file in the format of `output`'s extension.
pub fn run(project: &Project, input: &Path, output: &Path, force: bool) -> Result<()> {
    let input = project.root.join(input);
    let output = project.root.join(output);

    // Reject an unknown output extension before touching anything.
    let to = Format::from_path(&output)?;
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let config = formats::read_file(&input)?;
    formats::write_file(&output, &config)?;
    println!(
        "Converted {} -> {} ({})",
        input.display(),
        output.display(),
        to
    );

    Ok(())
}
