//! Command-line interface definitions.

use clap::{ArgGroup, ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::asset::FormatKey;

/// Course dashboard CLI: asset status, registration and curriculum drafts
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: coursedeck.toml)
    #[arg(short = 'C', long, global = true, default_value = "coursedeck.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Verify every asset of the course and report its status
    #[command(visible_alias = "s")]
    Status {
        #[command(flatten)]
        args: StatusArgs,
    },

    /// Register an asset's standardized location in the session manifest
    #[command(visible_alias = "r")]
    Register {
        #[command(flatten)]
        args: RegisterArgs,
    },

    /// Derive or check a standardized asset path
    #[command(visible_alias = "p")]
    Path {
        #[command(flatten)]
        args: PathArgs,
    },

    /// Write the session manifest out as a course document
    #[command(visible_alias = "e")]
    Export {
        #[command(flatten)]
        args: ExportArgs,
    },

    /// Draft a curriculum from source material with the generator service
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },
}

/// Status command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct StatusArgs {
    /// Only report this week
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub week: Option<u32>,

    /// Print settled statuses as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Register command arguments.
#[derive(clap::Args, Debug, Clone)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "location"])))]
pub struct RegisterArgs {
    /// Week number
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub week: u32,

    /// Asset format (video, slides, infographic, quiz)
    #[arg(short, long)]
    pub format: FormatKey,

    /// Uploaded file name; its extension picks the standardized path
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub file: Option<String>,

    /// Explicit location (e.g. a quiz URL), registered as given
    #[arg(short, long, value_hint = clap::ValueHint::Url)]
    pub location: Option<String>,
}

/// Path command arguments.
#[derive(clap::Args, Debug, Clone)]
#[command(group(ArgGroup::new("mode").required(true).args(["check", "week"])))]
pub struct PathArgs {
    /// Week number
    #[arg(short, long, requires_all = ["format", "ext"])]
    pub week: Option<u32>,

    /// Asset format name; unknown names use the generic `assets` folder
    #[arg(short, long, requires = "week")]
    pub format: Option<String>,

    /// File extension, without the dot
    #[arg(short, long, requires = "week")]
    pub ext: Option<String>,

    /// Report whether PATH is a standardized asset path
    #[arg(long, value_name = "PATH", conflicts_with = "week")]
    pub check: Option<String>,
}

/// Export command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output file (default: print to stdout)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Generate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Course topic
    #[arg(short, long)]
    pub topic: String,

    /// File with source material (`-` reads stdin)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub source: PathBuf,

    /// Print the curriculum as JSON
    #[arg(short, long)]
    pub json: bool,
}
