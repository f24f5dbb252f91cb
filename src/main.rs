use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod discover;
mod formats;
mod validate;

use commands::{Command, Project};
use config::Overrides;
use formats::Format;

#[derive(Parser)]
#[command(name = "dxconf")]
#[command(about = "Load, check and convert the static-asset config read by wasm app bundlers")]
struct Cli {
    /// Project root the config and its paths are relative to
    #[arg(long, global = true, default_value = ".")]
    project: PathBuf,

    /// Config file to use instead of searching the project root
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OverrideArgs {
    /// Replace app.static_dir
    #[arg(long)]
    static_dir: Option<String>,

    /// Replace app.index_file
    #[arg(long)]
    index_file: Option<String>,
}

impl From<OverrideArgs> for Overrides {
    fn from(args: OverrideArgs) -> Self {
        Overrides {
            static_dir: args.static_dir,
            index_file: args.index_file,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a new config file with the default values
    Init {
        /// File format to write [default: from --config's extension, else toml]
        #[arg(long, value_enum)]
        format: Option<Format>,

        #[command(flatten)]
        overrides: OverrideArgs,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved config
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "toml")]
        format: Format,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Validate the config and the paths it names
    Check {
        #[command(flatten)]
        overrides: OverrideArgs,

        /// Skip checks against the filesystem
        #[arg(long)]
        no_fs: bool,

        /// Fail on warnings too
        #[arg(long)]
        strict: bool,
    },

    /// Convert a config file to another format (chosen by extension)
    Convert {
        input: PathBuf,
        output: PathBuf,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let project = Project {
        root: cli.project,
        config: cli.config,
    };

    let command = match cli.command {
        Commands::Init {
            format,
            overrides,
            force,
        } => Command::Init {
            format,
            overrides: overrides.into(),
            force,
        },
        Commands::Show { format, overrides } => Command::Show {
            format,
            overrides: overrides.into(),
        },
        Commands::Check {
            overrides,
            no_fs,
            strict,
        } => Command::Check {
            overrides: overrides.into(),
            filesystem: !no_fs,
            strict,
        },
        Commands::Convert {
            input,
            output,
            force,
        } => Command::Convert {
            input,
            output,
            force,
        },
    };

    commands::run(project, command)
}
