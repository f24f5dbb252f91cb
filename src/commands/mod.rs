use anyhow::Result;
use std::path::PathBuf;

use crate::config::Overrides;
use crate::formats::Format;

mod check;
mod convert;
mod init;
mod show;

/// Where the project is and which config file to use.
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
}

#[derive(Debug)]
pub enum Command {
    Init {
        format: Option<Format>,
        overrides: Overrides,
        force: bool,
    },
    Show {
        format: Format,
        overrides: Overrides,
    },
    Check {
        overrides: Overrides,
        filesystem: bool,
        strict: bool,
    },
    Convert {
        input: PathBuf,
        output: PathBuf,
        force: bool,
    },
}

pub fn run(project: Project, command: Command) -> Result<()> {
    match command {
        Command::Init {
            format,
            overrides,
            force,
        } => init::run(&project, format, overrides, force),
        Command::Show { format, overrides } => show::run(&project, format, overrides),
        Command::Check {
            overrides,
            filesystem,
            strict,
        } => check::run(&project, overrides, filesystem, strict),
        Command::Convert {
            input,
            output,
            force,
        } => convert::run(&project, &input, &output, force),
    }
}
